use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use landlord_bot::{BidPlanner, BotContext, BotStyle, Decision, PlayPlanner};
use landlord_core::game::engine::Game;
use landlord_core::model::pattern::{PatternKind, Play};
use landlord_core::model::round::{GameError, Phase};
use landlord_core::model::seat::{SEAT_COUNT, Seat};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{BenchConfig, ResolvedOutputs};
use crate::logging::telemetry_path;
use crate::summary::{SummaryCollector, SummaryError};

/// Plays seeded bot-versus-bot games and records one row per game.
pub struct GameRunner {
    config: BenchConfig,
    outputs: ResolvedOutputs,
    styles: [BotStyle; SEAT_COUNT],
    logging_enabled: bool,
}

/// Summary details returned after a run.
#[derive(Debug)]
pub struct RunSummary {
    pub games_played: usize,
    pub rows_written: usize,
    pub landlord_wins: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
}

/// Everything observed while playing one game to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub game_index: usize,
    pub game_seed: u64,
    pub deals: u32,
    pub landlord: Seat,
    pub bid: i32,
    pub winner: Seat,
    pub turns: usize,
    pub bombs: usize,
    pub rockets: usize,
    pub cards_left: [usize; SEAT_COUNT],
}

impl GameOutcome {
    pub fn landlord_won(&self) -> bool {
        self.winner == self.landlord
    }
}

impl GameRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        if config.seats.len() != SEAT_COUNT {
            return Err(RunnerError::SeatCount {
                found: config.seats.len(),
            });
        }

        let mut styles = [BotStyle::default(); SEAT_COUNT];
        for (slot, seat) in styles.iter_mut().zip(&config.seats) {
            *slot = seat.style;
        }

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
            styles,
        })
    }

    /// Execute every configured game, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut summary = SummaryCollector::new(&self.config);
        let mut rows_written = 0usize;

        event!(
            target: "landlord_bench::run",
            Level::INFO,
            run_id = %self.config.run_id,
            games = self.config.games.count,
            "run started"
        );

        for game_index in 0..self.config.games.count {
            let game_seed = rng.next_u64();
            let outcome = self.play_game(game_index, game_seed)?;
            summary.record(&outcome);
            write_game_row(&mut writer, &self.config, &outcome)?;
            rows_written += 1;
        }

        writer.flush()?;

        let report = summary.finalize();
        report.write_markdown(&self.outputs.summary_md)?;

        let telemetry_path = self
            .logging_enabled
            .then(|| telemetry_path(&self.outputs));

        Ok(RunSummary {
            games_played: self.config.games.count,
            rows_written,
            landlord_wins: report.landlord_wins,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path,
        })
    }

    /// Play one game from the deal through bidding to the first empty hand.
    pub fn play_game(&self, game_index: usize, game_seed: u64) -> Result<GameOutcome, RunnerError> {
        let mut game = Game::with_seed(game_seed);
        game.deal()?;

        let mut turns = 0usize;
        let mut bombs = 0usize;
        let mut rockets = 0usize;

        while game.phase() == Phase::Calling {
            self.take_turn(game_index, &mut turns)?;
            let snapshot = game.state();
            let seat = snapshot.current_caller;
            let hand = game
                .hand(seat)
                .ok_or(RunnerError::MissingHand { game: game_index })?;
            let ctx = BotContext::new(seat, hand, &snapshot, self.styles[seat.index()]);
            let bid = BidPlanner::choose(&ctx);
            game.call_landlord(seat, bid)?;
        }

        let landlord = game
            .landlord()
            .ok_or(RunnerError::MissingLandlord { game: game_index })?;
        let bid = game.state().bids[landlord.index()];

        while game.phase() == Phase::Playing {
            self.take_turn(game_index, &mut turns)?;
            let snapshot = game.state();
            let seat = snapshot.current_player;
            let hand = game
                .hand(seat)
                .ok_or(RunnerError::MissingHand { game: game_index })?;
            let ctx = BotContext::new(seat, hand, &snapshot, self.styles[seat.index()]);
            match PlayPlanner::choose(&ctx) {
                Decision::Play(cards) => {
                    match Play::classify(&cards).map(|play| play.kind) {
                        Some(PatternKind::Bomb) => bombs += 1,
                        Some(PatternKind::Rocket) => rockets += 1,
                        _ => {}
                    }
                    game.play_cards(seat, &cards)?;
                }
                Decision::Pass => {
                    game.pass(seat)?;
                }
            }
        }

        let winner = game
            .winner()
            .ok_or(RunnerError::MissingWinner { game: game_index })?;
        let cards_left = game.state().hand_counts;

        event!(
            target: "landlord_bench::game",
            Level::DEBUG,
            game_index,
            game_seed,
            landlord = landlord.index(),
            winner = winner.index(),
            turns,
            "game finished"
        );

        Ok(GameOutcome {
            game_index,
            game_seed,
            deals: game.deals(),
            landlord,
            bid,
            winner,
            turns,
            bombs,
            rockets,
            cards_left,
        })
    }

    fn take_turn(&self, game_index: usize, turns: &mut usize) -> Result<(), RunnerError> {
        if *turns >= self.config.games.max_turns {
            return Err(RunnerError::TurnLimit {
                game: game_index,
                limit: self.config.games.max_turns,
            });
        }
        *turns += 1;
        Ok(())
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_game_row(
    writer: &mut BufWriter<File>,
    config: &BenchConfig,
    outcome: &GameOutcome,
) -> Result<(), RunnerError> {
    let seat_name = |seat: Seat| config.seats[seat.index()].name.clone();
    let row = GameLogRow {
        run_id: config.run_id.clone(),
        game_id: format!("G{:05}", outcome.game_index),
        game_index: outcome.game_index,
        game_seed: outcome.game_seed,
        deals: outcome.deals,
        landlord_seat: outcome.landlord,
        landlord: seat_name(outcome.landlord),
        bid: outcome.bid,
        winner_seat: outcome.winner,
        winner: seat_name(outcome.winner),
        landlord_won: outcome.landlord_won(),
        turns: outcome.turns,
        bombs: outcome.bombs,
        rockets: outcome.rockets,
        cards_left: outcome.cards_left,
    };

    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct GameLogRow {
    run_id: String,
    game_id: String,
    game_index: usize,
    game_seed: u64,
    deals: u32,
    landlord_seat: Seat,
    landlord: String,
    bid: i32,
    winner_seat: Seat,
    winner: String,
    landlord_won: bool,
    turns: usize,
    bombs: usize,
    rockets: usize,
    cards_left: [usize; SEAT_COUNT],
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game execution failed: {0}")]
    Game(#[from] GameError),
    #[error("summary error: {0}")]
    Summary(#[from] SummaryError),
    #[error("configuration requires exactly 3 seats but found {found}")]
    SeatCount { found: usize },
    #[error("game {game} exceeded the limit of {limit} turns")]
    TurnLimit { game: usize, limit: usize },
    #[error("game {game} has no hand for the acting seat")]
    MissingHand { game: usize },
    #[error("game {game} left bidding without a landlord")]
    MissingLandlord { game: usize },
    #[error("game {game} stopped without a winner")]
    MissingWinner { game: usize },
}
