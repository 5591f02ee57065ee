use super::{BotContext, BotStyle, Decision, candidates};
use landlord_core::model::pattern::Play;
use std::cmp::Reverse;
use tracing::debug;

/// Opponent hand size at which bombs come out regardless of style.
const DANGER_CARDS: usize = 5;

pub struct PlayPlanner;

impl PlayPlanner {
    pub fn choose(ctx: &BotContext<'_>) -> Decision {
        let options = candidates(ctx.hand);
        let decision = match ctx.snapshot.last_play.as_ref() {
            None => Self::open(ctx, &options),
            Some(incumbent) => Self::respond(ctx, &options, incumbent),
        };
        debug!(
            seat = ctx.seat.index(),
            hand = ctx.hand.len(),
            decision = ?decision,
            "play chosen"
        );
        decision
    }

    /// Opening never passes. Shed the longest shape, lowest first, keeping
    /// bombs back unless they empty the hand.
    fn open(ctx: &BotContext<'_>, options: &[Play]) -> Decision {
        if let Some(finisher) = options.iter().find(|p| p.len() == ctx.hand.len()) {
            return Decision::Play(finisher.cards.clone());
        }

        let best = options
            .iter()
            .filter(|p| !p.is_bomb_or_rocket())
            .min_by_key(|p| (Reverse(p.len()), p.weight))
            .or_else(|| options.iter().min_by_key(|p| p.weight));

        match best {
            Some(play) => Decision::Play(play.cards.clone()),
            None => Decision::Pass,
        }
    }

    fn respond(ctx: &BotContext<'_>, options: &[Play], incumbent: &Play) -> Decision {
        let beating: Vec<&Play> = options.iter().filter(|p| p.beats(incumbent)).collect();

        if let Some(finisher) = beating.iter().find(|p| p.len() == ctx.hand.len()) {
            return Decision::Play(finisher.cards.clone());
        }

        if let Some(last) = ctx.snapshot.last_player
            && ctx.is_partner(last)
        {
            return Decision::Pass;
        }

        if let Some(play) = beating
            .iter()
            .filter(|p| !p.is_bomb_or_rocket())
            .min_by_key(|p| p.weight)
        {
            return Decision::Play(play.cards.clone());
        }

        let bombs_allowed =
            ctx.style == BotStyle::Aggressive || ctx.opponent_min_cards() <= DANGER_CARDS;
        if bombs_allowed
            && let Some(play) = beating.iter().min_by_key(|p| p.weight)
        {
            return Decision::Play(play.cards.clone());
        }

        Decision::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::PlayPlanner;
    use crate::bot::{BotContext, BotStyle, Decision};
    use landlord_core::game::snapshot::GameSnapshot;
    use landlord_core::model::card::Card;
    use landlord_core::model::hand::Hand;
    use landlord_core::model::pattern::Play;
    use landlord_core::model::rank::Rank;
    use landlord_core::model::round::Phase;
    use landlord_core::model::seat::Seat;
    use landlord_core::model::suit::Suit;

    fn snapshot(landlord: Seat, last: Option<(Seat, Play)>, counts: [usize; 3]) -> GameSnapshot {
        let (last_player, last_play) = match last {
            Some((seat, play)) => (Some(seat), Some(play)),
            None => (None, None),
        };
        GameSnapshot {
            seed: 0,
            phase: Phase::Playing,
            current_player: Seat::First,
            current_caller: Seat::First,
            landlord: Some(landlord),
            bids: [1, 1, 1],
            last_play,
            last_player,
            consecutive_passes: 0,
            reserve: Vec::new(),
            hand_counts: counts,
            winner: None,
        }
    }

    fn single(rank: Rank) -> Play {
        Play::classify(&[Card::new(rank, Suit::Diamonds)]).unwrap()
    }

    fn bomb_hand() -> Hand {
        let mut cards: Vec<Card> = Suit::ALL.iter().map(|&s| Card::new(Rank::Six, s)).collect();
        cards.push(Card::new(Rank::Four, Suit::Spades));
        cards.push(Card::new(Rank::Jack, Suit::Spades));
        Hand::with_cards(cards)
    }

    #[test]
    fn opening_prefers_the_longest_shape() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Three, Suit::Spades),
            Card::new(Rank::Four, Suit::Hearts),
            Card::new(Rank::Five, Suit::Clubs),
            Card::new(Rank::Six, Suit::Spades),
            Card::new(Rank::Seven, Suit::Spades),
            Card::new(Rank::King, Suit::Spades),
            Card::new(Rank::King, Suit::Hearts),
        ]);
        let snap = snapshot(Seat::First, None, [7, 17, 17]);
        let ctx = BotContext::new(Seat::First, &hand, &snap, BotStyle::Cautious);
        match PlayPlanner::choose(&ctx) {
            Decision::Play(cards) => assert_eq!(cards.len(), 5),
            Decision::Pass => panic!("opening must play"),
        }
    }

    #[test]
    fn opening_goes_out_when_possible() {
        let hand = Hand::with_cards(vec![Card::BIG_JOKER, Card::SMALL_JOKER]);
        let snap = snapshot(Seat::First, None, [2, 17, 17]);
        let ctx = BotContext::new(Seat::First, &hand, &snap, BotStyle::Cautious);
        assert_eq!(
            PlayPlanner::choose(&ctx),
            Decision::Play(vec![Card::BIG_JOKER, Card::SMALL_JOKER])
        );
    }

    #[test]
    fn responds_with_the_weakest_beat() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Nine, Suit::Spades),
            Card::new(Rank::Queen, Suit::Spades),
            Card::new(Rank::Four, Suit::Spades),
        ]);
        let snap = snapshot(Seat::Second, Some((Seat::Second, single(Rank::Eight))), [3, 17, 17]);
        let ctx = BotContext::new(Seat::First, &hand, &snap, BotStyle::Cautious);
        assert_eq!(
            PlayPlanner::choose(&ctx),
            Decision::Play(vec![Card::new(Rank::Nine, Suit::Spades)])
        );
    }

    #[test]
    fn peasant_lets_partner_hold_the_trick() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Nine, Suit::Spades),
            Card::new(Rank::Queen, Suit::Spades),
        ]);
        let snap = snapshot(Seat::Second, Some((Seat::Third, single(Rank::Eight))), [2, 17, 17]);
        let ctx = BotContext::new(Seat::First, &hand, &snap, BotStyle::Aggressive);
        assert_eq!(PlayPlanner::choose(&ctx), Decision::Pass);
    }

    #[test]
    fn cautious_holds_bombs_until_danger() {
        let hand = bomb_hand();
        let calm = snapshot(Seat::Second, Some((Seat::Second, single(Rank::King))), [6, 12, 17]);
        let ctx = BotContext::new(Seat::First, &hand, &calm, BotStyle::Cautious);
        assert_eq!(PlayPlanner::choose(&ctx), Decision::Pass);

        let danger = snapshot(Seat::Second, Some((Seat::Second, single(Rank::King))), [6, 3, 17]);
        let ctx = BotContext::new(Seat::First, &hand, &danger, BotStyle::Cautious);
        match PlayPlanner::choose(&ctx) {
            Decision::Play(cards) => assert_eq!(cards.len(), 4),
            Decision::Pass => panic!("expected a bomb"),
        }
    }

    #[test]
    fn aggressive_bombs_immediately() {
        let hand = bomb_hand();
        let calm = snapshot(Seat::Second, Some((Seat::Second, single(Rank::King))), [6, 12, 17]);
        let ctx = BotContext::new(Seat::First, &hand, &calm, BotStyle::Aggressive);
        assert!(matches!(PlayPlanner::choose(&ctx), Decision::Play(cards) if cards.len() == 4));
    }
}
