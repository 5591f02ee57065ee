use crate::model::seat::{SEAT_COUNT, Seat};
use thiserror::Error;

/// One bidding round: every seat bids once, in seat order starting at the
/// first seat. The landlord is only settled once the round wraps around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiddingState {
    bids: [i32; SEAT_COUNT],
    current_caller: Seat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidProgress {
    Next(Seat),
    RoundClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BidError {
    #[error("expected {expected} to bid but got {actual}")]
    OutOfTurn { expected: Seat, actual: Seat },
    #[error("bid must be positive, got {0}")]
    NonPositive(i32),
}

impl BiddingState {
    pub fn new() -> Self {
        Self {
            bids: [0; SEAT_COUNT],
            current_caller: Seat::First,
        }
    }

    pub fn bids(&self) -> [i32; SEAT_COUNT] {
        self.bids
    }

    pub fn bid(&self, seat: Seat) -> i32 {
        self.bids[seat.index()]
    }

    pub fn current_caller(&self) -> Seat {
        self.current_caller
    }

    /// Records a bid. Bids need not exceed earlier ones; the highest is
    /// picked by [`BiddingState::resolve`] after the round closes.
    pub fn submit(&mut self, seat: Seat, score: i32) -> Result<BidProgress, BidError> {
        if seat != self.current_caller {
            return Err(BidError::OutOfTurn {
                expected: self.current_caller,
                actual: seat,
            });
        }
        if score <= 0 {
            return Err(BidError::NonPositive(score));
        }

        self.bids[seat.index()] = score;
        self.current_caller = seat.next();

        if self.current_caller == Seat::First {
            Ok(BidProgress::RoundClosed)
        } else {
            Ok(BidProgress::Next(self.current_caller))
        }
    }

    /// Highest positive bid; ties go to the earliest seat.
    pub fn resolve(&self) -> Option<(Seat, i32)> {
        let mut best: Option<(Seat, i32)> = None;
        for seat in Seat::LOOP.iter().copied() {
            let bid = self.bids[seat.index()];
            if bid <= 0 {
                continue;
            }
            if best.is_none_or(|(_, top)| bid > top) {
                best = Some((seat, bid));
            }
        }
        best
    }
}

impl Default for BiddingState {
    fn default() -> Self {
        Self::new()
    }
}
