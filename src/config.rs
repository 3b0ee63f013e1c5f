use dotenvy::dotenv;
use nonzero_ext::nonzero;
use serde::Deserialize;
use std::env;
use std::fs;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::errors::PickerError;
use crate::execution::types::ExecutionMode;
use crate::strategy::strategy_constants::{DEFAULT_HORIZON_DAYS, MAX_HORIZON_DAYS, TOP_N};
use crate::strategy::types::Candidate;

const DEFAULT_CANDIDATES_FILE: &str = "data/candidates.json";
const DEFAULT_MARKET_DATA_BASE_URL: &str = "https://query2.finance.yahoo.com/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub database_url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct MarketDataConfig {
    pub base_url: Url,
    pub requests_per_second: NonZeroU32,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub candidates: Vec<Candidate>,
    pub store_connection: ConnectionConfig,
    pub horizon_days: i64,
    pub top_n: usize,
    pub rng_seed: Option<u64>,
    pub isolate_candidate_failures: bool,
    pub execution_mode: ExecutionMode,
    pub market_data: MarketDataConfig,
}

#[derive(Debug, Deserialize)]
struct CandidatesFile {
    candidates: Vec<Candidate>,
}

/// Reads an optional variable, parsing it with `FromStr`.
fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, PickerError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| PickerError::config(format!("invalid {key}={raw:?}: {e}"))),
    }
}

pub fn parse_candidates(json: &str) -> Result<Vec<Candidate>, PickerError> {
    let file: CandidatesFile = serde_json::from_str(json)
        .map_err(|e| PickerError::config(format!("invalid candidates file: {e}")))?;
    Ok(file.candidates)
}

impl ConnectionConfig {
    pub fn from_env() -> Result<Self, PickerError> {
        dotenv().ok();
        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: &F) -> Result<Self, PickerError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| PickerError::config("missing DATABASE_URL"))?;
        let max_connections =
            parse_var(lookup, "DB_MAX_CONNECTIONS")?.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS);
        Ok(Self { database_url, max_connections })
    }
}

impl MarketDataConfig {
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: &F) -> Result<Self, PickerError> {
        let mut base_url: Url = parse_var(lookup, "MARKET_DATA_BASE_URL")?
            .map_or_else(|| Url::parse(DEFAULT_MARKET_DATA_BASE_URL), Ok)
            .map_err(|e| PickerError::config(e))?;
        // Url::join drops the last segment unless the base ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let requests_per_second = parse_var(lookup, "MARKET_DATA_REQUESTS_PER_SECOND")?
            .unwrap_or(nonzero!(2u32));
        let timeout_secs: u64 =
            parse_var(lookup, "MARKET_DATA_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            base_url,
            requests_per_second,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Config {
    /// Loads `.env`, then the process environment and the candidates file.
    pub fn load() -> Result<Self, PickerError> {
        dotenv().ok();
        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: &F) -> Result<Self, PickerError> {
        let candidates_path =
            lookup("CANDIDATES_FILE").unwrap_or_else(|| DEFAULT_CANDIDATES_FILE.to_string());
        let contents = fs::read_to_string(&candidates_path).map_err(|e| {
            PickerError::config(format!("failed to read candidates file '{candidates_path}': {e}"))
        })?;
        let candidates = parse_candidates(&contents)?;

        let horizon_days: i64 = parse_var(lookup, "HORIZON_DAYS")?.unwrap_or(DEFAULT_HORIZON_DAYS);
        if !(0..=MAX_HORIZON_DAYS).contains(&horizon_days) {
            return Err(PickerError::config(format!(
                "HORIZON_DAYS must be between 0 and {MAX_HORIZON_DAYS}, got {horizon_days}"
            )));
        }

        let execution_mode = match lookup("EXECUTION_MODE") {
            None => ExecutionMode::Live,
            Some(raw) => ExecutionMode::from_str(&raw)
                .ok_or_else(|| PickerError::config(format!("invalid EXECUTION_MODE={raw:?} (must be 'paper' or 'live')")))?,
        };

        Ok(Self {
            candidates,
            store_connection: ConnectionConfig::from_lookup(lookup)?,
            horizon_days,
            top_n: TOP_N,
            rng_seed: parse_var(lookup, "RNG_SEED")?,
            isolate_candidate_failures: parse_var(lookup, "ISOLATE_CANDIDATE_FAILURES")?.unwrap_or(false),
            execution_mode,
            market_data: MarketDataConfig::from_lookup(lookup)?,
        })
    }
}
