use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SEAT_COUNT: usize = 3;

/// One of the three seats at the table. Serialized as its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Seat {
    First = 0,
    Second = 1,
    Third = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("seat index {0} is out of range (expected 0..=2)")]
pub struct SeatError(pub usize);

impl Seat {
    pub const LOOP: [Seat; SEAT_COUNT] = [Seat::First, Seat::Second, Seat::Third];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::First),
            1 => Some(Seat::Second),
            2 => Some(Seat::Third),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::Third,
            Seat::Third => Seat::First,
        }
    }

    pub const fn previous(self) -> Seat {
        match self {
            Seat::First => Seat::Third,
            Seat::Second => Seat::First,
            Seat::Third => Seat::Second,
        }
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> Self {
        seat as u8
    }
}

impl TryFrom<u8> for Seat {
    type Error = SeatError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Seat::from_index(value as usize).ok_or(SeatError(value as usize))
    }
}

impl TryFrom<usize> for Seat {
    type Error = SeatError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Seat::from_index(value).ok_or(SeatError(value))
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.index())
    }
}
