use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;
use tracing::info;

use super::prompt::UserPrompt;
use super::purchase::run_purchase_flow;
use super::types::CycleReport;
use crate::db::store::TransactionStore;
use crate::errors::PickerError;
use crate::market_data::provider::MarketDataProvider;
use crate::strategy::picker::{pick_stock, sector_counts};
use crate::strategy::ranker::{RankerSettings, rank_candidates};
use crate::strategy::types::{Candidate, log_ranking};

/// One selection cycle: rank candidates, read the portfolio, pick, confirm, record
pub struct SelectionEngine<P, S> {
    provider: P,
    store: S,
    candidates: Vec<Candidate>,
    settings: RankerSettings,
}

impl<P, S> SelectionEngine<P, S>
where
    P: MarketDataProvider,
    S: TransactionStore,
{
    pub fn new(provider: P, store: S, candidates: Vec<Candidate>, settings: RankerSettings) -> Self {
        Self { provider, store, candidates, settings }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `clock` stamps the purchase when the user enters it, not when the cycle starts
    pub async fn run_once<U, R, C>(
        &self,
        prompt: &mut U,
        rng: &mut R,
        today: NaiveDate,
        clock: &C,
    ) -> Result<CycleReport, PickerError>
    where
        U: UserPrompt,
        R: Rng + ?Sized,
        C: Fn() -> NaiveDateTime,
    {
        let ranked = rank_candidates(&self.provider, &self.candidates, today, &self.settings).await?;
        log_ranking(&ranked);

        let transactions = self.store.read_all().await?;
        info!(
            transactions = transactions.len(),
            sector_counts = ?sector_counts(&transactions),
            "Loaded portfolio history"
        );

        let pick = pick_stock(&ranked, &transactions, rng)?.clone();
        info!(symbol = %pick.symbol, sector = %pick.sector, options_ratio = pick.options_ratio, "Selected stock");

        let outcome = run_purchase_flow(&self.store, prompt, &pick, clock).await?;

        Ok(CycleReport { ranked, pick, outcome })
    }
}
