use chrono::NaiveDate;

use crate::errors::PickerError;
use crate::market_data::types::ExpirationSet;

/// Selects the expiration closest to `today + horizon_days`.
///
/// Distance is `|(date - today).days - horizon_days|`. Among equally distant
/// dates the earliest one wins.
pub fn select_expiration<T>(
    expirations: &ExpirationSet<T>,
    today: NaiveDate,
    horizon_days: i64,
) -> Result<(NaiveDate, &T), PickerError> {
    expirations
        .iter()
        .min_by_key(|(date, _)| (**date - today).num_days().abs_diff(horizon_days))
        .map(|(date, value)| (*date, value))
        .ok_or(PickerError::EmptyInput { symbol: String::new() })
}
