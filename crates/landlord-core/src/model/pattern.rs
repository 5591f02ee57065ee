use crate::model::beat::can_beat;
use crate::model::card::Card;
use crate::model::rank::Rank;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Comparison key reported for the two-joker rocket.
pub const ROCKET_WEIGHT: u16 = 999;

const MIN_STRAIGHT: usize = 5;
const MIN_RUN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Single,
    Pair,
    Rocket,
    Triple,
    Bomb,
    Straight,
    ConsecutivePairs,
    Airplane,
}

impl PatternKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            PatternKind::Single => "single",
            PatternKind::Pair => "pair",
            PatternKind::Rocket => "rocket",
            PatternKind::Triple => "triple",
            PatternKind::Bomb => "bomb",
            PatternKind::Straight => "straight",
            PatternKind::ConsecutivePairs => "consecutive_pairs",
            PatternKind::Airplane => "airplane",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified set of cards: its shape, the cards in descending weight and
/// the key used to compare it against another play of the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub kind: PatternKind,
    pub cards: Vec<Card>,
    pub weight: u16,
}

impl Play {
    /// Returns `None` when the cards form no recognised shape. The input
    /// order does not matter.
    pub fn classify(cards: &[Card]) -> Option<Play> {
        let mut cards = cards.to_vec();
        cards.sort_by(Card::by_weight_desc);
        let kind = detect(&cards)?;
        let weight = match kind {
            PatternKind::Rocket => ROCKET_WEIGHT,
            _ => cards[0].weight(),
        };
        Some(Play {
            kind,
            cards,
            weight,
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_bomb_or_rocket(&self) -> bool {
        matches!(self.kind, PatternKind::Bomb | PatternKind::Rocket)
    }

    pub fn beats(&self, incumbent: &Play) -> bool {
        can_beat(self, incumbent)
    }
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.kind)?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str("]")
    }
}

// Expects `cards` sorted by descending weight. First match wins.
fn detect(cards: &[Card]) -> Option<PatternKind> {
    let weights: Vec<u16> = cards.iter().map(|c| c.weight()).collect();
    let len = weights.len();

    if len == 0 {
        return None;
    }
    if len == 1 {
        return Some(PatternKind::Single);
    }
    if len == 2 && weights[0] == weights[1] {
        return Some(PatternKind::Pair);
    }
    if len == 2 && cards[0].rank == Rank::BigJoker && cards[1].rank == Rank::SmallJoker {
        return Some(PatternKind::Rocket);
    }
    if len == 3 && all_equal(&weights) {
        return Some(PatternKind::Triple);
    }
    if len == 4 && all_equal(&weights) {
        return Some(PatternKind::Bomb);
    }
    if len >= MIN_STRAIGHT && is_run(&weights, 1) {
        return Some(PatternKind::Straight);
    }
    if len >= MIN_RUN && len % 2 == 0 && is_run(&weights, 2) {
        return Some(PatternKind::ConsecutivePairs);
    }
    if len >= MIN_RUN && len % 3 == 0 && is_run(&weights, 3) {
        return Some(PatternKind::Airplane);
    }
    None
}

fn all_equal(weights: &[u16]) -> bool {
    weights.windows(2).all(|w| w[0] == w[1])
}

/// Groups of `width` equal weights whose group weights step down by one.
fn is_run(weights: &[u16], width: usize) -> bool {
    if weights.len() % width != 0 {
        return false;
    }
    let groups: Vec<&[u16]> = weights.chunks(width).collect();
    groups.iter().all(|group| all_equal(group))
        && groups
            .windows(2)
            .all(|pair| pair[1][0] + 1 == pair[0][0])
}
