use crate::model::bidding::{BidError, BidProgress, BiddingState};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::pattern::Play;
use crate::model::seat::{SEAT_COUNT, Seat};
use core::fmt;
use serde::{Deserialize, Serialize};
use std::array;
use thiserror::Error;
use tracing::debug;

pub const HAND_SIZE: usize = 17;
pub const RESERVE_SIZE: usize = 3;

/// Consecutive passes that close a trick.
const PASSES_TO_CLEAR: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Waiting,
    Calling,
    Playing,
    Finished,
}

impl Phase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Waiting => "waiting",
            Phase::Calling => "calling",
            Phase::Playing => "playing",
            Phase::Finished => "finished",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that lives for exactly one deal: hands, reserve, bids and the
/// trick in progress.
#[derive(Debug, Clone)]
pub struct RoundState {
    hands: [Hand; SEAT_COUNT],
    reserve: Vec<Card>,
    discards: Vec<Card>,
    bidding: BiddingState,
    phase: Phase,
    landlord: Option<Seat>,
    current_player: Seat,
    last_play: Option<Play>,
    last_player: Option<Seat>,
    consecutive_passes: u8,
    winner: Option<Seat>,
}

impl RoundState {
    /// Deals the first 51 cards round-robin and keeps the last three aside.
    pub fn deal(deck: &Deck) -> Self {
        let mut dealt: [Vec<Card>; SEAT_COUNT] = array::from_fn(|_| Vec::with_capacity(HAND_SIZE));
        let split = SEAT_COUNT * HAND_SIZE;
        let cards = deck.cards();

        for (index, card) in cards[..split].iter().enumerate() {
            dealt[index % SEAT_COUNT].push(*card);
        }

        Self::from_hands(dealt.map(Hand::with_cards), cards[split..].to_vec())
    }

    /// Starts bidding over arbitrary hands and reserve.
    pub fn from_hands(hands: [Hand; SEAT_COUNT], reserve: Vec<Card>) -> Self {
        Self {
            hands,
            reserve,
            discards: Vec::new(),
            bidding: BiddingState::new(),
            phase: Phase::Calling,
            landlord: None,
            current_player: Seat::First,
            last_play: None,
            last_player: None,
            consecutive_passes: 0,
            winner: None,
        }
    }

    /// Skips bidding: `landlord` takes the reserve and opens the first trick.
    pub fn in_play(hands: [Hand; SEAT_COUNT], reserve: Vec<Card>, landlord: Seat) -> Self {
        let mut round = Self::from_hands(hands, reserve);
        round.elect(landlord);
        round
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hand_counts(&self) -> [usize; SEAT_COUNT] {
        array::from_fn(|i| self.hands[i].len())
    }

    pub fn reserve(&self) -> &[Card] {
        &self.reserve
    }

    pub fn discards(&self) -> &[Card] {
        &self.discards
    }

    pub fn bidding(&self) -> &BiddingState {
        &self.bidding
    }

    pub fn landlord(&self) -> Option<Seat> {
        self.landlord
    }

    pub fn current_player(&self) -> Seat {
        self.current_player
    }

    pub fn current_caller(&self) -> Seat {
        self.bidding.current_caller()
    }

    pub fn last_play(&self) -> Option<&Play> {
        self.last_play.as_ref()
    }

    pub fn last_player(&self) -> Option<Seat> {
        self.last_player
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    /// `Some(true)` when the landlord went out first, `Some(false)` when a
    /// peasant did, `None` while the deal is still running.
    pub fn landlord_won(&self) -> Option<bool> {
        match (self.winner, self.landlord) {
            (Some(winner), Some(landlord)) => Some(winner == landlord),
            _ => None,
        }
    }

    /// Cards still accounted for by this deal. Always 54 for a dealt deck.
    pub fn cards_in_play(&self) -> usize {
        let reserve = if self.landlord.is_some() {
            0
        } else {
            self.reserve.len()
        };
        self.hands.iter().map(Hand::len).sum::<usize>() + reserve + self.discards.len()
    }

    pub fn call_landlord(&mut self, seat: Seat, score: i32) -> Result<BidOutcome, GameError> {
        self.expect_phase(Phase::Calling, "bid")?;

        match self.bidding.submit(seat, score)? {
            BidProgress::Next(next_caller) => {
                debug!(seat = seat.index(), score, "bid recorded");
                Ok(BidOutcome::Recorded { next_caller })
            }
            BidProgress::RoundClosed => match self.bidding.resolve() {
                Some((landlord, bid)) => {
                    self.elect(landlord);
                    debug!(landlord = landlord.index(), bid, "landlord elected");
                    Ok(BidOutcome::LandlordElected { landlord, bid })
                }
                // Unreachable while `submit` rejects non-positive bids.
                None => Ok(BidOutcome::Redealt),
            },
        }
    }

    pub fn play_cards(&mut self, seat: Seat, cards: &[Card]) -> Result<PlayOutcome, GameError> {
        self.expect_phase(Phase::Playing, "play")?;
        self.expect_turn(seat)?;

        let hand = &self.hands[seat.index()];
        for (index, card) in cards.iter().enumerate() {
            if cards[..index].contains(card) {
                return Err(GameError::DuplicateCard(*card));
            }
            if !hand.contains(*card) {
                return Err(GameError::CardNotInHand(*card));
            }
        }

        let play = Play::classify(cards).ok_or(GameError::InvalidShape)?;
        if let Some(incumbent) = self.last_play.as_ref()
            && !play.beats(incumbent)
        {
            return Err(GameError::IllegalBeat);
        }

        let hand = &mut self.hands[seat.index()];
        for card in &play.cards {
            hand.remove(*card);
        }
        self.discards.extend_from_slice(&play.cards);
        debug!(
            seat = seat.index(),
            kind = %play.kind,
            weight = play.weight,
            remaining = hand.len(),
            "play accepted"
        );

        let hand_empty = hand.is_empty();
        self.last_play = Some(play);
        self.last_player = Some(seat);
        self.consecutive_passes = 0;

        if hand_empty {
            self.phase = Phase::Finished;
            self.winner = Some(seat);
            debug!(winner = seat.index(), "deal finished");
            return Ok(PlayOutcome::GameOver { winner: seat });
        }

        self.current_player = seat.next();
        Ok(PlayOutcome::Played {
            next: self.current_player,
        })
    }

    pub fn pass(&mut self, seat: Seat) -> Result<PassOutcome, GameError> {
        self.expect_phase(Phase::Playing, "pass")?;
        self.expect_turn(seat)?;
        if self.last_player.is_none() {
            return Err(GameError::OpeningPass);
        }

        self.consecutive_passes += 1;
        let trick_cleared = self.consecutive_passes >= PASSES_TO_CLEAR;
        if trick_cleared {
            self.last_play = None;
            self.last_player = None;
            self.consecutive_passes = 0;
        }
        self.current_player = seat.next();
        debug!(seat = seat.index(), trick_cleared, "pass");

        Ok(PassOutcome {
            next: self.current_player,
            trick_cleared,
        })
    }

    fn elect(&mut self, landlord: Seat) {
        self.hands[landlord.index()].absorb(&self.reserve);
        self.landlord = Some(landlord);
        self.current_player = landlord;
        self.phase = Phase::Playing;
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::PhaseViolation {
                action,
                actual: self.phase,
            })
        }
    }

    fn expect_turn(&self, seat: Seat) -> Result<(), GameError> {
        if seat == self.current_player {
            Ok(())
        } else {
            Err(GameError::TurnViolation {
                expected: self.current_player,
                actual: seat,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BidOutcome {
    Recorded { next_caller: Seat },
    LandlordElected { landlord: Seat, bid: i32 },
    /// The round closed without a positive bid and a fresh hand was dealt.
    Redealt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlayOutcome {
    Played { next: Seat },
    GameOver { winner: Seat },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassOutcome {
    pub next: Seat,
    pub trick_cleared: bool,
}

/// Every rejected action. State is never modified when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cannot {action} while the game is {actual}")]
    PhaseViolation { action: &'static str, actual: Phase },
    #[error("expected {expected} to act but got {actual}")]
    TurnViolation { expected: Seat, actual: Seat },
    #[error("bid must be positive, got {0}")]
    InvalidBid(i32),
    #[error("cards do not form a recognised pattern")]
    InvalidShape,
    #[error("play does not beat the previous play")]
    IllegalBeat,
    #[error("the seat opening a trick cannot pass")]
    OpeningPass,
    #[error("{0} is not in the player's hand")]
    CardNotInHand(Card),
    #[error("{0} appears more than once in the play")]
    DuplicateCard(Card),
}

impl From<BidError> for GameError {
    fn from(err: BidError) -> Self {
        match err {
            BidError::OutOfTurn { expected, actual } => GameError::TurnViolation { expected, actual },
            BidError::NonPositive(score) => GameError::InvalidBid(score),
        }
    }
}
