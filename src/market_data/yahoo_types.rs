use chrono::DateTime;
use serde::{Deserialize, Serialize};

use super::types::{ExpirationSet, ExpirationHandle, OptionChain, OptionContract};

// Yahoo Finance API Response structures

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    pub option_chain: YahooOptionChainEnvelope,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YahooOptionChainEnvelope {
    #[serde(default)]
    pub result: Vec<YahooOptionResult>,
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YahooOptionResult {
    #[serde(rename = "underlyingSymbol")]
    pub underlying_symbol: Option<String>,
    #[serde(rename = "expirationDates", default)]
    pub expiration_dates: Vec<i64>, // unix seconds, midnight UTC of the expiry date
    pub quote: Option<YahooUnderlyingQuote>,
    #[serde(default)]
    pub options: Vec<YahooOptionSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YahooUnderlyingQuote {
    #[serde(rename = "regularMarketOpen")]
    pub regular_market_open: Option<f64>,
    #[serde(rename = "regularMarketPrice")]
    pub regular_market_price: Option<f64>,
    #[serde(rename = "trailingAnnualDividendYield")]
    pub trailing_annual_dividend_yield: Option<f64>, // fraction
    #[serde(rename = "dividendYield")]
    pub dividend_yield: Option<f64>, // percent
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YahooOptionSet {
    #[serde(rename = "expirationDate")]
    pub expiration_date: i64,
    #[serde(default)]
    pub calls: Vec<YahooContract>,
    #[serde(default)]
    pub puts: Vec<YahooContract>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YahooContract {
    #[serde(rename = "contractSymbol")]
    pub contract_symbol: Option<String>,
    pub strike: f64,
    pub ask: Option<f64>,
    #[serde(rename = "openInterest")]
    pub open_interest: Option<u64>,
    #[serde(rename = "inTheMoney", default)]
    pub in_the_money: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YahooQuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    pub quote_summary: YahooQuoteSummaryEnvelope,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YahooQuoteSummaryEnvelope {
    #[serde(default)]
    pub result: Vec<YahooQuoteSummaryResult>,
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YahooQuoteSummaryResult {
    #[serde(rename = "summaryDetail")]
    pub summary_detail: Option<YahooSummaryDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YahooSummaryDetail {
    pub open: Option<YahooRawValue>,
    pub beta: Option<YahooRawValue>,
    #[serde(rename = "dividendYield")]
    pub dividend_yield: Option<YahooRawValue>,
}

/// Formatted numeric field; an empty object `{}` when Yahoo has no value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YahooRawValue {
    pub raw: Option<f64>,
}

impl YahooOptionResult {
    pub fn expiration_set(&self) -> ExpirationSet<ExpirationHandle> {
        self.expiration_dates
            .iter()
            .filter_map(|ts| DateTime::from_timestamp(*ts, 0).map(|dt| (dt.date_naive(), *ts)))
            .collect()
    }

    /// Day's open, falling back to the last traded price.
    pub fn price(&self) -> Option<f64> {
        let quote = self.quote.as_ref()?;
        quote.regular_market_open.or(quote.regular_market_price)
    }

    pub fn dividend_yield(&self) -> Option<f64> {
        let quote = self.quote.as_ref()?;
        quote
            .trailing_annual_dividend_yield
            .or_else(|| quote.dividend_yield.map(|pct| pct / 100.0))
    }

    pub fn into_chain(self) -> OptionChain {
        self.options
            .into_iter()
            .next()
            .map(|set| OptionChain {
                calls: set.calls.into_iter().map(OptionContract::from).collect(),
                puts: set.puts.into_iter().map(OptionContract::from).collect(),
            })
            .unwrap_or_default()
    }
}

impl From<YahooContract> for OptionContract {
    fn from(contract: YahooContract) -> Self {
        Self {
            strike: contract.strike,
            ask: contract.ask,
            open_interest: contract.open_interest.unwrap_or(0),
            in_the_money: contract.in_the_money,
        }
    }
}
