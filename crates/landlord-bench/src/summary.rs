use std::fs;
use std::path::Path;

use landlord_bot::BotStyle;
use landlord_core::model::seat::SEAT_COUNT;
use thiserror::Error;

use crate::config::BenchConfig;
use crate::runner::GameOutcome;

/// Running totals gathered while games are played.
pub struct SummaryCollector {
    run_id: String,
    seats: Vec<SeatTally>,
    games: usize,
    landlord_wins: usize,
    redeals: usize,
    turns: usize,
    bombs: usize,
    rockets: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeatTally {
    pub name: String,
    pub style: BotStyle,
    pub wins: usize,
    pub landlord_games: usize,
    pub landlord_wins: usize,
}

impl SeatTally {
    pub fn landlord_win_rate(&self) -> f64 {
        ratio(self.landlord_wins, self.landlord_games)
    }
}

/// Final aggregate for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchSummary {
    pub run_id: String,
    pub games: usize,
    pub landlord_wins: usize,
    pub redeals: usize,
    pub turns: usize,
    pub bombs: usize,
    pub rockets: usize,
    pub seats: Vec<SeatTally>,
}

impl SummaryCollector {
    pub fn new(config: &BenchConfig) -> Self {
        let seats = config
            .seats
            .iter()
            .take(SEAT_COUNT)
            .map(|seat| SeatTally {
                name: seat.name.clone(),
                style: seat.style,
                wins: 0,
                landlord_games: 0,
                landlord_wins: 0,
            })
            .collect();
        Self {
            run_id: config.run_id.clone(),
            seats,
            games: 0,
            landlord_wins: 0,
            redeals: 0,
            turns: 0,
            bombs: 0,
            rockets: 0,
        }
    }

    pub fn record(&mut self, outcome: &GameOutcome) {
        self.games += 1;
        self.redeals += outcome.deals.saturating_sub(1) as usize;
        self.turns += outcome.turns;
        self.bombs += outcome.bombs;
        self.rockets += outcome.rockets;
        if outcome.landlord_won() {
            self.landlord_wins += 1;
        }

        if let Some(tally) = self.seats.get_mut(outcome.winner.index()) {
            tally.wins += 1;
        }
        if let Some(tally) = self.seats.get_mut(outcome.landlord.index()) {
            tally.landlord_games += 1;
            if outcome.landlord_won() {
                tally.landlord_wins += 1;
            }
        }
    }

    pub fn finalize(self) -> BenchSummary {
        BenchSummary {
            run_id: self.run_id,
            games: self.games,
            landlord_wins: self.landlord_wins,
            redeals: self.redeals,
            turns: self.turns,
            bombs: self.bombs,
            rockets: self.rockets,
            seats: self.seats,
        }
    }
}

impl BenchSummary {
    pub fn landlord_win_rate(&self) -> f64 {
        ratio(self.landlord_wins, self.games)
    }

    pub fn avg_turns(&self) -> f64 {
        ratio(self.turns, self.games)
    }

    pub fn render_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# Landlord Bench Summary: {}\n\n", self.run_id));
        out.push_str(&format!("Games played: {}\n\n", self.games));
        out.push_str(&format!(
            "Landlord win rate: {:.1}% ({} of {})\n\n",
            self.landlord_win_rate() * 100.0,
            self.landlord_wins,
            self.games
        ));
        out.push_str(&format!(
            "Average turns per game: {:.1} | Bombs: {} | Rockets: {} | Re-deals: {}\n\n",
            self.avg_turns(),
            self.bombs,
            self.rockets,
            self.redeals
        ));
        out.push_str("| Seat | Bot | Style | Wins | Win % | Landlord | Landlord Win % |\n");
        out.push_str("|------|-----|-------|------|-------|----------|----------------|\n");

        for (index, seat) in self.seats.iter().enumerate() {
            out.push_str(&format!(
                "| {seat_no} | {name} | {style} | {wins} | {win:.1}% | {landlord} | {landlord_win:.1}% |\n",
                seat_no = index + 1,
                name = seat.name,
                style = seat.style.as_str(),
                wins = seat.wins,
                win = ratio(seat.wins, self.games) * 100.0,
                landlord = seat.landlord_games,
                landlord_win = seat.landlord_win_rate() * 100.0,
            ));
        }

        out
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), SummaryError> {
        fs::write(path, self.render_markdown()).map_err(|source| SummaryError::Io {
            context: "writing summary markdown",
            source,
        })
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}
