pub mod config;
pub mod db;
pub mod errors;
pub mod execution;
pub mod logging;
pub mod market_data;
pub mod sector;
pub mod strategy;
