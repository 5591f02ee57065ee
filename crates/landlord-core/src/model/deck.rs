use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const DECK_SIZE: usize = 54;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 54 cards: every suited rank per suit, then both jokers.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::SUITED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        cards.push(Card::SMALL_JOKER);
        cards.push(Card::BIG_JOKER);
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Fisher-Yates over the whole deck.
    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::{DECK_SIZE, Deck};
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_54_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.cards().len(), DECK_SIZE);
        let unique: HashSet<Card> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn standard_deck_is_deterministic() {
        assert_eq!(Deck::standard().cards(), Deck::standard().cards());
        assert_eq!(Deck::standard().cards()[53], Card::BIG_JOKER);
    }

    #[test]
    fn each_suited_rank_appears_four_times() {
        let deck = Deck::standard();
        for rank in Rank::SUITED {
            assert_eq!(deck.cards().iter().filter(|c| c.rank == rank).count(), 4);
        }
        assert_eq!(deck.cards().iter().filter(|c| c.is_joker()).count(), 2);
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(42);
        let deck_b = Deck::shuffled_with_seed(42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(1);
        let deck_b = Deck::shuffled_with_seed(2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let deck = Deck::shuffled_with_seed(7);
        let shuffled: HashSet<Card> = deck.cards().iter().copied().collect();
        let standard: HashSet<Card> = Deck::standard().cards().iter().copied().collect();
        assert_eq!(shuffled, standard);
    }
}
