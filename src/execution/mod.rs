pub mod engine;
pub mod prompt;
pub mod purchase;
pub mod types;
