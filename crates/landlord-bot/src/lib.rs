pub mod bot;

pub use bot::{BidPlanner, BotContext, BotStyle, Decision, PlayPlanner, UnknownStyle, candidates};
