use serde::{Deserialize, Serialize};
use tracing::info;

use crate::sector::Sector;

/// A configured candidate: ticker symbol and the sector it is filed under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub symbol: String,
    pub sector: Sector,
}

impl Candidate {
    pub fn new(symbol: impl Into<String>, sector: Sector) -> Self {
        Self { symbol: symbol.into(), sector }
    }
}

/// Scored snapshot of one candidate, built once per ranking pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockProfile {
    pub symbol: String,
    pub price: f64, // day's open of the underlying
    pub sector: Sector,
    pub dividend_yield: Option<f64>, // fraction, e.g. 0.012 for 1.2%
    pub options_ratio: f64,
    pub beta: Option<f64>,
}

fn fmt_optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.precision$}"))
}

/// Logs a ranked profile list, best first
pub fn log_ranking(profiles: &[StockProfile]) {
    let summary = profiles
        .iter()
        .enumerate()
        .map(|(rank, p)| {
            format!(
                "#{} {} [{}]: Ratio={:.6}, Price={:.2}, Yield={}, Beta={}",
                rank + 1,
                p.symbol,
                p.sector,
                p.options_ratio,
                p.price,
                fmt_optional(p.dividend_yield.map(|y| y * 100.0), 2),
                fmt_optional(p.beta, 3),
            )
        })
        .collect::<Vec<_>>()
        .join("\n  ");

    info!("Top candidates by options ratio:\n  {}", summary);
}
