#![allow(dead_code)]

use chrono::{DateTime, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use std::io::Cursor;
use std::sync::Mutex;

use options_sector_picker::db::models::transactions::{NewTransactionModel, TransactionModel};
use options_sector_picker::db::store::TransactionStore;
use options_sector_picker::errors::{PickerError, StoreError};
use options_sector_picker::execution::prompt::ConsolePrompt;
use options_sector_picker::market_data::provider::MarketDataProvider;
use options_sector_picker::market_data::types::{
    CandidateQuote, ExpirationHandle, OptionChain, OptionContract,
};
use options_sector_picker::sector::Sector;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn today() -> NaiveDate {
    date(2024, 1, 10)
}

pub fn call(strike: f64, ask: Option<f64>, open_interest: u64, in_the_money: bool) -> OptionContract {
    OptionContract { strike, ask, open_interest, in_the_money }
}

/// Chain whose only eligible call scores `ratio` against a price of 100
pub fn chain_scoring(ratio: f64) -> OptionChain {
    OptionChain {
        calls: vec![
            call(90.0, Some(15.0), 3_000, true),
            call(110.0, Some(ratio * 1000.0), 0, false),
            call(150.0, None, 80, false),
        ],
        puts: vec![call(80.0, Some(0.4), 100, false)],
    }
}

#[derive(Debug, Clone)]
pub struct FakeTicker {
    pub price: f64,
    pub beta: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub chains: BTreeMap<NaiveDate, OptionChain>,
}

impl FakeTicker {
    /// Priced at 100 with one expiration a year out scoring `ratio`
    pub fn scoring(ratio: f64) -> Self {
        Self {
            price: 100.0,
            beta: Some(1.2),
            dividend_yield: None,
            chains: [(date(2025, 1, 5), chain_scoring(ratio))].into_iter().collect(),
        }
    }
}

fn to_handle(day: NaiveDate) -> ExpirationHandle {
    day.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp()
}

#[derive(Debug, Default)]
pub struct FakeMarketData {
    tickers: HashMap<String, FakeTicker>,
    pub requests: Mutex<Vec<String>>,
}

impl FakeMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ticker(mut self, symbol: &str, ticker: FakeTicker) -> Self {
        self.tickers.insert(symbol.to_string(), ticker);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn ticker(&self, symbol: &str) -> Result<&FakeTicker, PickerError> {
        self.tickers
            .get(symbol)
            .ok_or_else(|| PickerError::provider(symbol, "symbol not found"))
    }
}

impl MarketDataProvider for FakeMarketData {
    async fn fetch_candidate(&self, symbol: &str) -> Result<CandidateQuote, PickerError> {
        self.requests.lock().unwrap().push(format!("quote:{symbol}"));
        let ticker = self.ticker(symbol)?;
        Ok(CandidateQuote {
            price: ticker.price,
            beta: ticker.beta,
            dividend_yield: ticker.dividend_yield,
            expirations: ticker.chains.keys().map(|d| (*d, to_handle(*d))).collect(),
        })
    }

    async fn fetch_option_chain(
        &self,
        symbol: &str,
        expiration: ExpirationHandle,
    ) -> Result<OptionChain, PickerError> {
        let day = DateTime::from_timestamp(expiration, 0).unwrap().date_naive();
        self.requests.lock().unwrap().push(format!("chain:{symbol}:{day}"));
        self.ticker(symbol)?
            .chains
            .get(&day)
            .cloned()
            .ok_or_else(|| PickerError::provider(symbol, "unknown expiration"))
    }
}

/// Store whose reads succeed and whose appends always fail
#[derive(Debug, Default)]
pub struct FailingAppendStore;

impl TransactionStore for FailingAppendStore {
    async fn read_all(&self) -> Result<Vec<TransactionModel>, StoreError> {
        Ok(Vec::new())
    }

    async fn append(&self, _transaction: &NewTransactionModel) -> Result<i32, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolClosed))
    }
}

pub fn scripted_prompt(input: &str) -> ConsolePrompt<Cursor<Vec<u8>>, Vec<u8>> {
    ConsolePrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

/// One past purchase in each listed sector
pub fn history_in(sectors: &[Sector]) -> Vec<TransactionModel> {
    sectors
        .iter()
        .enumerate()
        .map(|(i, sector)| TransactionModel {
            id: i as i32 + 1,
            symbol: format!("OLD{i}"),
            price: 40.0,
            sector: *sector,
            dividend_yield: Some(0.02),
            options_ratio: 0.001,
            beta: Some(0.9),
            date: date(2023, 6, 1).and_hms_opt(10, 0, 0).unwrap(),
            cost: "40.00".parse().unwrap(),
            shares: "1".parse().unwrap(),
            notes: String::new(),
        })
        .collect()
}
