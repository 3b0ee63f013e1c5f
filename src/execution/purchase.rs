use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{error, info, instrument};

use super::prompt::UserPrompt;
use super::types::PurchaseOutcome;
use crate::db::models::transactions::NewTransactionModel;
use crate::db::store::TransactionStore;
use crate::errors::PickerError;
use crate::strategy::types::StockProfile;

const DEFAULT_COST: &str = "5.00";
const DEFAULT_SHARES: &str = "0";

fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal, PickerError> {
    Decimal::from_str(value.trim()).map_err(|_| PickerError::InvalidInput {
        field,
        value: value.to_string(),
    })
}

/// Walk the user through buying `pick` and append the confirmed transaction.
///
/// `clock` is read once, after the purchase details are entered. An append
/// failure is shown to the user before it is returned.
#[instrument(skip_all, fields(symbol = %pick.symbol, sector = %pick.sector))]
pub async fn run_purchase_flow<S, U, C>(
    store: &S,
    prompt: &mut U,
    pick: &StockProfile,
    clock: &C,
) -> Result<PurchaseOutcome, PickerError>
where
    S: TransactionStore,
    U: UserPrompt,
    C: Fn() -> NaiveDateTime,
{
    if !prompt.confirm(&format!("buy {}? (y/n)", pick.symbol), false)? {
        info!("Purchase declined");
        return Ok(PurchaseOutcome::Declined);
    }

    let cost = parse_decimal("cost", &prompt.prompt_value("enter final cost...", DEFAULT_COST)?)?;
    let shares = parse_decimal("shares", &prompt.prompt_value("enter shares bought...", DEFAULT_SHARES)?)?;
    let notes = prompt.prompt_value("notes?", "")?;

    let transaction = NewTransactionModel::from_profile(pick, cost, shares, notes, clock());
    prompt.show(&transaction.to_string())?;

    if !prompt.confirm("finish? (y/n)", true)? {
        info!("Purchase abandoned before recording");
        return Ok(PurchaseOutcome::Abandoned(transaction));
    }

    match store.append(&transaction).await {
        Ok(id) => {
            info!(id, %cost, %shares, "Purchase recorded");
            Ok(PurchaseOutcome::Recorded { id, transaction })
        }
        Err(e) => {
            error!(error = %e, "Failed to record purchase");
            prompt.show(&format!("Error: transaction was NOT recorded: {e}"))?;
            Err(e.into())
        }
    }
}
