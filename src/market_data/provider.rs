use super::types::{CandidateQuote, ExpirationHandle, OptionChain};
use crate::errors::PickerError;

/// Source of quotes and option chains for the ranker.
///
/// Calls are awaited one at a time; implementations must not retry on their own,
/// a failure is returned to the caller as [`PickerError::Provider`].
#[allow(async_fn_in_trait)]
pub trait MarketDataProvider {
    /// Price, beta, dividend yield and the available expirations of `symbol`.
    async fn fetch_candidate(&self, symbol: &str) -> Result<CandidateQuote, PickerError>;

    /// Option chain of `symbol` for one expiration taken from [`CandidateQuote::expirations`].
    async fn fetch_option_chain(
        &self,
        symbol: &str,
        expiration: ExpirationHandle,
    ) -> Result<OptionChain, PickerError>;
}
