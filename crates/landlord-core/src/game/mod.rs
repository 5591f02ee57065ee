pub mod engine;
pub mod snapshot;
