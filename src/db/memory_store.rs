use tokio::sync::RwLock;
use tracing::info;

use super::models::transactions::{NewTransactionModel, TransactionModel};
use super::store::TransactionStore;
use crate::errors::StoreError;

/// Process-local store. Backs paper runs, where nothing reaches the database.
#[derive(Debug, Default)]
pub struct InMemoryTransactionStore {
    transactions: RwLock<Vec<TransactionModel>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(transactions: Vec<TransactionModel>) -> Self {
        Self { transactions: RwLock::new(transactions) }
    }

    pub async fn len(&self) -> usize {
        self.transactions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.transactions.read().await.is_empty()
    }
}

impl TransactionStore for InMemoryTransactionStore {
    async fn read_all(&self) -> Result<Vec<TransactionModel>, StoreError> {
        Ok(self.transactions.read().await.clone())
    }

    async fn append(&self, transaction: &NewTransactionModel) -> Result<i32, StoreError> {
        let mut transactions = self.transactions.write().await;
        let id = transactions.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        transactions.push(transaction.clone().into_model(id));
        info!(id, symbol = %transaction.symbol, "Transaction kept in memory");
        Ok(id)
    }
}
