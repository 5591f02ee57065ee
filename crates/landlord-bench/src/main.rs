use std::path::PathBuf;

use clap::Parser;

use landlord_bench::config::{BenchConfig, ResolvedOutputs};
use landlord_bench::logging::init_logging;
use landlord_bench::runner::GameRunner;
use landlord_bot::BotStyle;
use landlord_core::AppInfo;

/// Self-play harness for landlord bots.
#[derive(Debug, Parser)]
#[command(
    name = "landlord-bench",
    author,
    version,
    about = "Deterministic three-seat landlord self-play harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed that derives each game's shuffle seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Give every seat this bot style (cautious or aggressive).
    #[arg(long, value_name = "STYLE")]
    style: Option<BotStyle>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    if let Some(style) = cli.style {
        config.override_styles(style);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let games = config.games.count;
    let seats: Vec<String> = config
        .seats
        .iter()
        .map(|seat| format!("{} ({})", seat.name, seat.style.as_str()))
        .collect();

    println!(
        "{} {} ({})",
        AppInfo::name(),
        AppInfo::version(),
        AppInfo::codename()
    );
    println!(
        "Loaded configuration '{run_id}' with {games} game{} for {}",
        if games == 1 { "" } else { "s" },
        seats.join(", ")
    );

    let _logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = GameRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: no games played.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Run complete for '{run_id}': {} games, landlord won {} → {} rows at {}",
        summary.games_played,
        summary.landlord_wins,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
