use chrono::{NaiveDateTime, SubsecRound};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use std::fmt;

use crate::errors::StoreError;
use crate::sector::Sector;
use crate::strategy::types::StockProfile;

/// Persisted form of the `date` column
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Raw `transactions` row as stored, sector still an integer code
#[derive(Debug, FromRow)]
pub struct TransactionRow {
    pub id: i32,
    pub symbol: String,
    pub price: f64,
    pub sector: i16,
    pub dividend_yield: Option<f64>,
    pub options_ratio: f64,
    pub beta: Option<f64>,
    pub date: NaiveDateTime,
    pub cost: Decimal,
    pub shares: Decimal,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionModel {
    pub id: i32,
    pub symbol: String,
    pub price: f64,
    pub sector: Sector,
    pub dividend_yield: Option<f64>,
    pub options_ratio: f64,
    pub beta: Option<f64>,
    pub date: NaiveDateTime,
    pub cost: Decimal,
    pub shares: Decimal,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransactionModel {
    pub symbol: String,
    pub price: f64,
    pub sector: Sector,
    pub dividend_yield: Option<f64>,
    pub options_ratio: f64,
    pub beta: Option<f64>,
    pub date: NaiveDateTime, // whole seconds, local time of the purchase
    pub cost: Decimal,
    pub shares: Decimal,
    pub notes: String,
}

impl TryFrom<TransactionRow> for TransactionModel {
    type Error = StoreError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let sector = Sector::from_code(row.sector)
            .ok_or(StoreError::UnknownSector { id: row.id, code: row.sector })?;
        Ok(Self {
            id: row.id,
            symbol: row.symbol,
            price: row.price,
            sector,
            dividend_yield: row.dividend_yield,
            options_ratio: row.options_ratio,
            beta: row.beta,
            date: row.date,
            cost: row.cost,
            shares: row.shares,
            notes: row.notes,
        })
    }
}

impl NewTransactionModel {
    /// Snapshot `profile` together with what the user entered at purchase time
    pub fn from_profile(
        profile: &StockProfile,
        cost: Decimal,
        shares: Decimal,
        notes: String,
        date: NaiveDateTime,
    ) -> Self {
        Self {
            symbol: profile.symbol.clone(),
            price: profile.price,
            sector: profile.sector,
            dividend_yield: profile.dividend_yield,
            options_ratio: profile.options_ratio,
            beta: profile.beta,
            date: date.trunc_subsecs(0),
            cost,
            shares,
            notes,
        }
    }

    pub fn into_model(self, id: i32) -> TransactionModel {
        TransactionModel {
            id,
            symbol: self.symbol,
            price: self.price,
            sector: self.sector,
            dividend_yield: self.dividend_yield,
            options_ratio: self.options_ratio,
            beta: self.beta,
            date: self.date,
            cost: self.cost,
            shares: self.shares,
            notes: self.notes,
        }
    }
}

fn fmt_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

impl fmt::Display for NewTransactionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "symbol: {}, price: {}, sector: {} ({}), dividend_yield: {}, options_ratio: {}, beta: {}, date: {}, cost: {}, shares: {}, notes: {:?}",
            self.symbol,
            self.price,
            self.sector.code(),
            self.sector,
            fmt_optional(self.dividend_yield),
            self.options_ratio,
            fmt_optional(self.beta),
            self.date.format(DATE_FORMAT),
            self.cost,
            self.shares,
            self.notes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn profile() -> StockProfile {
        StockProfile {
            symbol: "KO".to_string(),
            price: 61.25,
            sector: Sector::ConsumerGoods,
            dividend_yield: Some(0.031),
            options_ratio: 0.0042,
            beta: None,
        }
    }

    fn purchase_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 8)
            .unwrap()
            .and_hms_milli_opt(14, 5, 9, 731)
            .unwrap()
    }

    #[test]
    fn from_profile_copies_snapshot_and_truncates_date() {
        let tx = NewTransactionModel::from_profile(&profile(), d("122.50"), d("2"), "dividend play".into(), purchase_time());
        assert_eq!(tx.symbol, "KO");
        assert_eq!(tx.sector, Sector::ConsumerGoods);
        assert_eq!(tx.dividend_yield, Some(0.031));
        assert_eq!(tx.beta, None);
        assert_eq!(tx.date.format(DATE_FORMAT).to_string(), "2024-03-08 14:05:09");
        assert_eq!(tx.date, purchase_time().trunc_subsecs(0));
    }

    #[test]
    fn display_lists_fields_in_storage_order() {
        let tx = NewTransactionModel::from_profile(&profile(), d("5.00"), d("0"), String::new(), purchase_time());
        assert_eq!(
            tx.to_string(),
            "symbol: KO, price: 61.25, sector: 4 (Consumer Goods), dividend_yield: 0.031, options_ratio: 0.0042, beta: None, date: 2024-03-08 14:05:09, cost: 5.00, shares: 0, notes: \"\""
        );
    }

    #[test]
    fn row_conversion_validates_sector() {
        let row = |sector: i16| TransactionRow {
            id: 9,
            symbol: "NEE".into(),
            price: 70.0,
            sector,
            dividend_yield: Some(0.027),
            options_ratio: 0.001,
            beta: Some(0.45),
            date: purchase_time().trunc_subsecs(0),
            cost: d("70.10"),
            shares: d("1"),
            notes: "utility".into(),
        };

        let model = TransactionModel::try_from(row(1)).unwrap();
        assert_eq!(model.sector, Sector::Utilities);
        assert_eq!(model.cost, d("70.10"));

        let err = TransactionModel::try_from(row(42)).unwrap_err();
        assert!(matches!(err, StoreError::UnknownSector { id: 9, code: 42 }));
    }
}
