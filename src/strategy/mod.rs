pub mod expiration;
pub mod picker;
pub mod ranker;
pub mod sentiment;
pub mod strategy_constants;
pub mod types;
