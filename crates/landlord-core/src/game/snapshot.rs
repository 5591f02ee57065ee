use super::engine::Game;
use crate::model::card::Card;
use crate::model::pattern::Play;
use crate::model::round::Phase;
use crate::model::seat::{SEAT_COUNT, Seat};
use serde::{Deserialize, Serialize};

/// Public table state, safe to broadcast to every seat and spectator.
/// Hands appear only as counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSnapshot {
    pub seed: u64,
    pub phase: Phase,
    pub current_player: Seat,
    pub current_caller: Seat,
    pub landlord: Option<Seat>,
    pub bids: [i32; SEAT_COUNT],
    pub last_play: Option<Play>,
    pub last_player: Option<Seat>,
    pub consecutive_passes: u8,
    pub reserve: Vec<Card>,
    pub hand_counts: [usize; SEAT_COUNT],
    pub winner: Option<Seat>,
}

impl GameSnapshot {
    pub fn capture(game: &Game) -> Self {
        let Some(round) = game.round() else {
            return Self::waiting(game.seed());
        };

        GameSnapshot {
            seed: game.seed(),
            phase: round.phase(),
            current_player: round.current_player(),
            current_caller: round.current_caller(),
            landlord: round.landlord(),
            bids: round.bidding().bids(),
            last_play: round.last_play().cloned(),
            last_player: round.last_player(),
            consecutive_passes: round.consecutive_passes(),
            reserve: round.reserve().to_vec(),
            hand_counts: round.hand_counts(),
            winner: round.winner(),
        }
    }

    fn waiting(seed: u64) -> Self {
        GameSnapshot {
            seed,
            phase: Phase::Waiting,
            current_player: Seat::First,
            current_caller: Seat::First,
            landlord: None,
            bids: [0; SEAT_COUNT],
            last_play: None,
            last_player: None,
            consecutive_passes: 0,
            reserve: Vec::new(),
            hand_counts: [0; SEAT_COUNT],
            winner: None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
