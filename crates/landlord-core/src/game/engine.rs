use crate::game::snapshot::GameSnapshot;
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::round::{BidOutcome, GameError, PassOutcome, Phase, PlayOutcome, RoundState};
use crate::model::seat::Seat;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

/// One table. Owns the shuffle source and, once dealt, the running deal.
///
/// Every mutator names the acting seat explicitly and either applies fully
/// or returns a [`GameError`] without touching state.
#[derive(Debug, Clone)]
pub struct Game {
    rng: StdRng,
    seed: u64,
    deals: u32,
    round: Option<RoundState>,
}

impl Game {
    pub fn new() -> Self {
        let seed: u64 = rand::random();
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            deals: 0,
            round: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Deals handed out since construction, re-deals included.
    pub fn deals(&self) -> u32 {
        self.deals
    }

    pub fn phase(&self) -> Phase {
        self.round
            .as_ref()
            .map_or(Phase::Waiting, RoundState::phase)
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn landlord(&self) -> Option<Seat> {
        self.round.as_ref().and_then(RoundState::landlord)
    }

    pub fn winner(&self) -> Option<Seat> {
        self.round.as_ref().and_then(RoundState::winner)
    }

    /// Private view of one seat's cards. Only hand this to that seat.
    pub fn hand(&self, seat: Seat) -> Option<&Hand> {
        self.round.as_ref().map(|round| round.hand(seat))
    }

    pub fn deal(&mut self) -> Result<(), GameError> {
        match self.phase() {
            Phase::Waiting | Phase::Finished => {
                self.shuffle_and_deal();
                Ok(())
            }
            actual => Err(GameError::PhaseViolation {
                action: "deal",
                actual,
            }),
        }
    }

    pub fn call_landlord(&mut self, seat: Seat, score: i32) -> Result<BidOutcome, GameError> {
        let outcome = self
            .round_mut("bid")?
            .call_landlord(seat, score)
            .inspect_err(|err| debug!(seat = seat.index(), score, %err, "bid rejected"))?;
        Ok(self.settle_bid(outcome))
    }

    pub fn play_cards(&mut self, seat: Seat, cards: &[Card]) -> Result<PlayOutcome, GameError> {
        let outcome = self
            .round_mut("play")?
            .play_cards(seat, cards)
            .inspect_err(|err| debug!(seat = seat.index(), %err, "play rejected"))?;
        if let PlayOutcome::GameOver { winner } = outcome {
            let landlord = self.landlord().map(Seat::index);
            info!(
                seed = self.seed,
                winner = winner.index(),
                landlord,
                "game over"
            );
        }
        Ok(outcome)
    }

    pub fn pass(&mut self, seat: Seat) -> Result<PassOutcome, GameError> {
        self.round_mut("pass")?
            .pass(seat)
            .inspect_err(|err| debug!(seat = seat.index(), %err, "pass rejected"))
    }

    /// Public view: hand sizes only, never hand contents.
    pub fn state(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    /// Drops the current deal and returns to `Waiting`. The shuffle source
    /// keeps advancing, so the next deal differs from the last.
    pub fn reset(&mut self) {
        self.round = None;
        info!(seed = self.seed, "game reset");
    }

    /// A closed round with no positive bid starts over on a fresh deal.
    /// `call_landlord` cannot produce that outcome while non-positive bids
    /// are rejected, so this only guards against a stranded round.
    fn settle_bid(&mut self, outcome: BidOutcome) -> BidOutcome {
        if outcome == BidOutcome::Redealt {
            warn!(seed = self.seed, "bidding closed without a landlord; re-dealing");
            self.shuffle_and_deal();
        }
        outcome
    }

    fn shuffle_and_deal(&mut self) {
        let deck = Deck::shuffled(&mut self.rng);
        self.round = Some(RoundState::deal(&deck));
        self.deals += 1;
        info!(seed = self.seed, deal = self.deals, "cards dealt");
    }

    fn round_mut(&mut self, action: &'static str) -> Result<&mut RoundState, GameError> {
        self.round.as_mut().ok_or(GameError::PhaseViolation {
            action,
            actual: Phase::Waiting,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
