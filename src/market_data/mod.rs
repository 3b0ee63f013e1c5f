pub mod provider;
pub mod types;
pub mod yahoo_client;
pub mod yahoo_types;
