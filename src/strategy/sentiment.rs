use super::strategy_constants::OPEN_INTEREST_SCALE;
use crate::errors::PickerError;
use crate::market_data::types::OptionContract;

/// Bullishness score of an option chain relative to the underlying price.
///
/// Callers pass out-of-the-money calls only. Contracts without an ask quote are
/// skipped, and a chain with nothing left scores exactly `0`.
pub fn sentiment_ratio(contracts: &[OptionContract], current_price: f64) -> Result<f64, PickerError> {
    if !current_price.is_finite() || current_price <= 0.0 {
        return Err(PickerError::InvalidPrice { symbol: String::new(), price: current_price });
    }

    let ratios: Vec<f64> = contracts
        .iter()
        .filter_map(|contract| {
            let ask = contract.ask?;
            Some(weighted_ratio(contract.strike, ask, contract.open_interest, current_price))
        })
        .collect();

    if ratios.is_empty() {
        return Ok(0.0);
    }
    Ok(ratios.iter().sum::<f64>() / ratios.len() as f64)
}

/// Strike distance times relative premium, scaled up by open interest
fn weighted_ratio(strike: f64, ask: f64, open_interest: u64, current_price: f64) -> f64 {
    let strike_ratio = (current_price - strike).abs() / current_price;
    let ask_ratio = ask / current_price;
    strike_ratio * ask_ratio * (1.0 + open_interest as f64 / OPEN_INTEREST_SCALE)
}
