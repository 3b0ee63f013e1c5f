use super::models::transactions::{NewTransactionModel, TransactionModel};
use crate::errors::StoreError;

/// Append-only record of confirmed purchases
#[allow(async_fn_in_trait)]
pub trait TransactionStore {
    /// Every stored transaction, in no particular order
    async fn read_all(&self) -> Result<Vec<TransactionModel>, StoreError>;

    /// Persist a new transaction and return the id assigned to it
    async fn append(&self, transaction: &NewTransactionModel) -> Result<i32, StoreError>;
}
