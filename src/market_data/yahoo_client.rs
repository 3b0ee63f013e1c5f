use governor::{Quota, DefaultDirectRateLimiter};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use url::Url;

use super::provider::MarketDataProvider;
use super::types::{CandidateQuote, ExpirationHandle, OptionChain};
use super::yahoo_types::{YahooOptionResult, YahooOptionsResponse, YahooQuoteSummaryResponse};
use crate::config::MarketDataConfig;
use crate::errors::PickerError;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) options-sector-picker/0.1";

struct YahooRateLimiter {
    rate_limiter: Arc<DefaultDirectRateLimiter>,
}

impl reqwest_ratelimit::RateLimiter for YahooRateLimiter {
    async fn acquire_permit(&self) {
        self.rate_limiter.until_ready().await;
    }
}

/// Yahoo Finance options and quote-summary endpoints.
///
/// Requests are rate limited client-side and time out, but are never retried.
#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    http_client: ClientWithMiddleware,
    base_url: Url,
}

impl YahooFinanceClient {
    pub fn new(config: &MarketDataConfig) -> Result<Self, PickerError> {
        let reqwest_client = reqwest_middleware::reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| PickerError::config(format!("failed to create HTTP client: {e}")))?;

        let rate_limiter = YahooRateLimiter {
            rate_limiter: Arc::new(DefaultDirectRateLimiter::direct(Quota::per_second(
                config.requests_per_second,
            ))),
        };

        let http_client = ClientBuilder::new(reqwest_client)
            .with(reqwest_ratelimit::all(rate_limiter))
            .build();

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        symbol: &str,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, PickerError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| PickerError::provider(symbol, e))?;

        let response = self
            .http_client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| PickerError::provider(symbol, e))?
            .error_for_status()
            .map_err(|e| PickerError::provider(symbol, e))?;

        response.json::<T>().await.map_err(|e| PickerError::provider(symbol, e))
    }

    async fn get_options(
        &self,
        symbol: &str,
        expiration: Option<ExpirationHandle>,
    ) -> Result<YahooOptionResult, PickerError> {
        let params: Vec<(&str, String)> = expiration
            .map(|ts| vec![("date", ts.to_string())])
            .unwrap_or_default();

        let response: YahooOptionsResponse = self
            .get_json(symbol, &format!("v7/finance/options/{symbol}"), &params)
            .await?;

        if let Some(error) = response.option_chain.error.filter(|e| !e.is_null()) {
            return Err(PickerError::provider(symbol, error));
        }
        response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| PickerError::provider(symbol, "symbol not found"))
    }
}

impl MarketDataProvider for YahooFinanceClient {
    #[instrument(skip(self))]
    async fn fetch_candidate(&self, symbol: &str) -> Result<CandidateQuote, PickerError> {
        let options = self.get_options(symbol, None).await?;

        // Beta and the day's open only come from the summary; the options quote covers the price
        let summary: Result<YahooQuoteSummaryResponse, PickerError> = self
            .get_json(
                symbol,
                &format!("v10/finance/quoteSummary/{symbol}"),
                &[("modules", "summaryDetail".to_string())],
            )
            .await;
        let detail = match summary {
            Ok(summary) => summary.quote_summary.result.into_iter().next().and_then(|r| r.summary_detail),
            Err(e) => {
                warn!(error = %e, "Quote summary unavailable, using options quote only");
                None
            }
        };

        let open = detail.as_ref().and_then(|d| d.open.as_ref()).and_then(|v| v.raw);
        let beta = detail.as_ref().and_then(|d| d.beta.as_ref()).and_then(|v| v.raw);

        let price = open
            .or_else(|| options.price())
            .ok_or_else(|| PickerError::provider(symbol, "no current price quoted"))?;

        let quote = CandidateQuote {
            price,
            beta,
            dividend_yield: options.dividend_yield(),
            expirations: options.expiration_set(),
        };
        debug!(price, ?beta, expirations = quote.expirations.len(), "Fetched candidate quote");
        Ok(quote)
    }

    #[instrument(skip(self))]
    async fn fetch_option_chain(
        &self,
        symbol: &str,
        expiration: ExpirationHandle,
    ) -> Result<OptionChain, PickerError> {
        let chain = self.get_options(symbol, Some(expiration)).await?.into_chain();
        debug!(calls = chain.calls.len(), puts = chain.puts.len(), "Fetched option chain");
        Ok(chain)
    }
}
