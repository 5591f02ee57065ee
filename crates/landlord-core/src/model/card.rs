use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::cmp::Ordering;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A single card. Identity is `(rank, suit)`; jokers carry no suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Option<Suit>,
}

impl Card {
    pub const SMALL_JOKER: Card = Card {
        rank: Rank::SmallJoker,
        suit: None,
    };
    pub const BIG_JOKER: Card = Card {
        rank: Rank::BigJoker,
        suit: None,
    };

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit: Some(suit),
        }
    }

    pub const fn weight(self) -> u16 {
        self.rank.weight()
    }

    pub const fn is_joker(self) -> bool {
        self.rank.is_joker()
    }

    /// Descending weight, the order hands and plays are kept in. Equal
    /// weights fall back to suit order so the ordering is total.
    pub fn by_weight_desc(a: &Card, b: &Card) -> Ordering {
        b.weight().cmp(&a.weight()).then(a.suit.cmp(&b.suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit {
            Some(suit) => write!(f, "{}{}", self.rank, suit),
            None => write!(f, "{}", self.rank),
        }
    }
}
