use std::fmt::Display;
use thiserror::Error;

/// Failures surfaced by a selection cycle. None of them are retried.
#[derive(Debug, Error)]
pub enum PickerError {
    #[error("no option expiration dates available for {symbol}")]
    EmptyInput { symbol: String },

    #[error("invalid underlying price {price} for {symbol}: must be positive")]
    InvalidPrice { symbol: String, price: f64 },

    #[error("market data provider error for {symbol}: {message}")]
    Provider { symbol: String, message: String },

    #[error("transaction store error: {0}")]
    Store(#[from] StoreError),

    #[error("no candidates available to choose from")]
    EmptySelection,

    #[error("invalid {field} entered: {value:?}")]
    InvalidInput { field: &'static str, value: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("prompt I/O failed: {0}")]
    Prompt(#[from] std::io::Error),
}

impl PickerError {
    pub fn provider(symbol: &str, err: impl Display) -> Self {
        Self::Provider {
            symbol: symbol.to_string(),
            message: err.to_string(),
        }
    }

    pub fn config(err: impl Display) -> Self {
        Self::Config(err.to_string())
    }

    /// Attributes a symbol-less calculation failure to `symbol`
    pub fn for_symbol(self, symbol: &str) -> Self {
        match self {
            Self::EmptyInput { .. } => Self::EmptyInput { symbol: symbol.to_string() },
            Self::InvalidPrice { price, .. } => Self::InvalidPrice { symbol: symbol.to_string(), price },
            other => other,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("stored transaction {id} has unknown sector code {code}")]
    UnknownSector { id: i32, code: i16 },
}
