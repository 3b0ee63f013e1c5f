use sqlx::PgPool;
use tracing::{debug, info, instrument};

use super::connection;
use super::schema;
use super::store::TransactionStore;
use super::queries::transactions as transactions_queries;
use super::models::transactions::{NewTransactionModel, TransactionModel, TransactionRow};
use crate::config::ConnectionConfig;
use crate::errors::StoreError;
use crate::sector::Sector;

pub struct DbManager {
    pub pool: PgPool,
}

fn into_models(rows: Vec<TransactionRow>) -> Result<Vec<TransactionModel>, StoreError> {
    rows.into_iter().map(TransactionModel::try_from).collect()
}

impl DbManager {
    /// Creates a new database connection and initializes the schema
    pub async fn init(config: &ConnectionConfig) -> Result<Self, sqlx::Error> {
        let pool = connection::create_pool(config).await?;

        // Ensure schema is initialized (creates tables if needed)
        schema::init_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// Connects without touching the schema; nothing is written to the database
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, sqlx::Error> {
        let pool = connection::create_pool(config).await?;
        Ok(Self { pool })
    }

    #[instrument(skip(self))]
    pub async fn get_transactions_by_sector(&self, sector: Sector) -> Result<Vec<TransactionModel>, StoreError> {
        let rows = transactions_queries::get_transactions_by_sector(&self.pool, sector).await?;
        debug!(count = rows.len(), "Loaded sector transactions");
        into_models(rows)
    }
}

impl TransactionStore for DbManager {
    #[instrument(skip(self))]
    async fn read_all(&self) -> Result<Vec<TransactionModel>, StoreError> {
        let rows = transactions_queries::get_all_transactions(&self.pool).await?;
        debug!(count = rows.len(), "Loaded transaction history");
        into_models(rows)
    }

    #[instrument(skip(self, transaction), fields(symbol = %transaction.symbol))]
    async fn append(&self, transaction: &NewTransactionModel) -> Result<i32, StoreError> {
        let id = transactions_queries::insert_transaction(&self.pool, transaction).await?;
        info!(id, "Transaction recorded");
        Ok(id)
    }
}
