mod bid;
mod candidates;
mod play;

pub use bid::BidPlanner;
pub use candidates::candidates;
pub use play::PlayPlanner;

use landlord_core::game::snapshot::GameSnapshot;
use landlord_core::model::card::Card;
use landlord_core::model::hand::Hand;
use landlord_core::model::seat::Seat;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotStyle {
    /// Bids only on strong hands and holds bombs back for emergencies.
    #[default]
    Cautious,
    /// Bids higher and spends bombs as soon as they win a trick.
    Aggressive,
}

impl BotStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            BotStyle::Cautious => "cautious",
            BotStyle::Aggressive => "aggressive",
        }
    }
}

impl FromStr for BotStyle {
    type Err = UnknownStyle;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cautious" => Ok(BotStyle::Cautious),
            "aggressive" => Ok(BotStyle::Aggressive),
            _ => Err(UnknownStyle(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown bot style '{0}' (expected 'cautious' or 'aggressive')")]
pub struct UnknownStyle(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Play(Vec<Card>),
    Pass,
}

/// What one seat may see when deciding: its own cards plus the public
/// snapshot.
#[derive(Debug, Clone, Copy)]
pub struct BotContext<'a> {
    pub seat: Seat,
    pub hand: &'a Hand,
    pub snapshot: &'a GameSnapshot,
    pub style: BotStyle,
}

impl<'a> BotContext<'a> {
    pub fn new(seat: Seat, hand: &'a Hand, snapshot: &'a GameSnapshot, style: BotStyle) -> Self {
        Self {
            seat,
            hand,
            snapshot,
            style,
        }
    }

    pub fn is_landlord(&self) -> bool {
        self.snapshot.landlord == Some(self.seat)
    }

    /// Seats on the other side: both peasants for the landlord, the
    /// landlord for a peasant.
    pub fn opponents(&self) -> Vec<Seat> {
        match self.snapshot.landlord {
            Some(landlord) if landlord == self.seat => vec![self.seat.next(), self.seat.previous()],
            Some(landlord) => vec![landlord],
            None => vec![self.seat.next(), self.seat.previous()],
        }
    }

    pub fn is_partner(&self, other: Seat) -> bool {
        other != self.seat && !self.is_landlord() && self.snapshot.landlord != Some(other)
    }

    /// Fewest cards held by any opponent.
    pub fn opponent_min_cards(&self) -> usize {
        self.opponents()
            .iter()
            .map(|seat| self.snapshot.hand_counts[seat.index()])
            .min()
            .unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::{BotContext, BotStyle, UnknownStyle};
    use landlord_core::game::engine::Game;
    use landlord_core::model::seat::Seat;

    #[test]
    fn style_parses_case_insensitively() {
        assert_eq!(" Aggressive ".parse::<BotStyle>(), Ok(BotStyle::Aggressive));
        assert_eq!("cautious".parse::<BotStyle>(), Ok(BotStyle::Cautious));
        assert_eq!(
            "reckless".parse::<BotStyle>(),
            Err(UnknownStyle("reckless".to_string()))
        );
    }

    #[test]
    fn sides_follow_the_landlord() {
        let mut game = Game::with_seed(8);
        game.deal().unwrap();
        for seat in Seat::LOOP {
            game.call_landlord(seat, if seat == Seat::Second { 3 } else { 1 })
                .unwrap();
        }
        let snapshot = game.state();

        let landlord = game.hand(Seat::Second).unwrap();
        let ctx = BotContext::new(Seat::Second, landlord, &snapshot, BotStyle::Cautious);
        assert!(ctx.is_landlord());
        assert_eq!(ctx.opponents(), vec![Seat::Third, Seat::First]);
        assert_eq!(ctx.opponent_min_cards(), 17);

        let peasant = game.hand(Seat::First).unwrap();
        let ctx = BotContext::new(Seat::First, peasant, &snapshot, BotStyle::Cautious);
        assert_eq!(ctx.opponents(), vec![Seat::Second]);
        assert!(ctx.is_partner(Seat::Third));
        assert!(!ctx.is_partner(Seat::Second));
        assert_eq!(ctx.opponent_min_cards(), 20);
    }
}
