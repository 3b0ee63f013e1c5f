use chrono::NaiveDate;
use tracing::{debug, error, info, instrument, warn};

use super::{
    expiration::select_expiration,
    sentiment::sentiment_ratio,
    strategy_constants::{DEFAULT_HORIZON_DAYS, TOP_N},
    types::{Candidate, StockProfile},
};
use crate::config::Config;
use crate::errors::PickerError;
use crate::market_data::provider::MarketDataProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankerSettings {
    pub horizon_days: i64,
    pub top_n: usize,
    /// Skip a candidate whose data cannot be resolved instead of aborting the pass
    pub isolate_failures: bool,
}

impl Default for RankerSettings {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            top_n: TOP_N,
            isolate_failures: false,
        }
    }
}

impl From<&Config> for RankerSettings {
    fn from(config: &Config) -> Self {
        Self {
            horizon_days: config.horizon_days,
            top_n: config.top_n,
            isolate_failures: config.isolate_candidate_failures,
        }
    }
}

/// Resolve market data for one candidate and score its option chain
#[instrument(skip(provider, candidate), fields(symbol = %candidate.symbol, sector = %candidate.sector))]
pub async fn build_profile<P: MarketDataProvider>(
    provider: &P,
    candidate: &Candidate,
    today: NaiveDate,
    horizon_days: i64,
) -> Result<StockProfile, PickerError> {
    let quote = provider.fetch_candidate(&candidate.symbol).await?;

    let (expiration_date, expiration) = select_expiration(&quote.expirations, today, horizon_days)
        .map_err(|e| e.for_symbol(&candidate.symbol))?;
    debug!(%expiration_date, available = quote.expirations.len(), "Selected option expiration");

    let chain = provider.fetch_option_chain(&candidate.symbol, *expiration).await?;
    let eligible_calls = chain.eligible_calls();
    let options_ratio = sentiment_ratio(&eligible_calls, quote.price)
        .map_err(|e| e.for_symbol(&candidate.symbol))?;
    debug!(
        calls = chain.calls.len(),
        eligible = eligible_calls.len(),
        options_ratio,
        "Computed options ratio"
    );

    Ok(StockProfile {
        symbol: candidate.symbol.clone(),
        price: quote.price,
        sector: candidate.sector,
        dividend_yield: quote.dividend_yield,
        options_ratio,
        beta: quote.beta,
    })
}

/// Build a profile per candidate, in input order
pub async fn collect_profiles<P: MarketDataProvider>(
    provider: &P,
    candidates: &[Candidate],
    today: NaiveDate,
    settings: &RankerSettings,
) -> Result<Vec<StockProfile>, PickerError> {
    let mut profiles = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match build_profile(provider, candidate, today, settings.horizon_days).await {
            Ok(profile) => profiles.push(profile),
            Err(e) if settings.isolate_failures => {
                warn!(symbol = %candidate.symbol, error = %e, "Skipping candidate after failure");
            }
            Err(e) => {
                error!(symbol = %candidate.symbol, error = %e, "Failed to build candidate profile");
                return Err(e);
            }
        }
    }
    Ok(profiles)
}

/// Highest options ratio first; equal ratios keep their input order
pub fn top_by_ratio(mut profiles: Vec<StockProfile>, n: usize) -> Vec<StockProfile> {
    profiles.sort_by(|a, b| b.options_ratio.total_cmp(&a.options_ratio));
    profiles.truncate(n);
    profiles
}

/// Score every candidate and keep the best `settings.top_n`
#[instrument(skip_all, fields(candidates = candidates.len()))]
pub async fn rank_candidates<P: MarketDataProvider>(
    provider: &P,
    candidates: &[Candidate],
    today: NaiveDate,
    settings: &RankerSettings,
) -> Result<Vec<StockProfile>, PickerError> {
    let profiles = collect_profiles(provider, candidates, today, settings).await?;
    let scored = profiles.len();
    let top = top_by_ratio(profiles, settings.top_n);
    info!(scored, kept = top.len(), "Ranked candidates");
    Ok(top)
}
