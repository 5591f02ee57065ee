use super::{BotContext, BotStyle, candidates};
use landlord_core::model::pattern::PatternKind;
use landlord_core::model::rank::Rank;
use tracing::debug;

const MAX_BID: i32 = 3;

pub struct BidPlanner;

impl BidPlanner {
    /// Always positive; the engine rejects anything else.
    pub fn choose(ctx: &BotContext<'_>) -> i32 {
        let strength = hand_strength(ctx);
        let divisor = match ctx.style {
            BotStyle::Cautious => 6,
            BotStyle::Aggressive => 4,
        };
        let bid = (1 + strength / divisor).clamp(1, MAX_BID);
        debug!(
            seat = ctx.seat.index(),
            strength,
            bid,
            style = ctx.style.as_str(),
            "bid chosen"
        );
        bid
    }
}

pub(crate) fn hand_strength(ctx: &BotContext<'_>) -> i32 {
    let mut strength = 0;
    for card in ctx.hand.iter() {
        strength += match card.rank {
            Rank::BigJoker => 3,
            Rank::SmallJoker => 2,
            Rank::King => 1,
            _ => 0,
        };
    }
    for play in candidates(ctx.hand) {
        strength += match play.kind {
            PatternKind::Bomb => 3,
            PatternKind::Rocket => 2,
            _ => 0,
        };
    }
    strength
}
