pub mod beat;
pub mod bidding;
pub mod card;
pub mod deck;
pub mod hand;
pub mod pattern;
pub mod rank;
pub mod round;
pub mod seat;
pub mod suit;
