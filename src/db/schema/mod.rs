use sqlx::{
    Executor,
    postgres::PgPool,
};

use crate::db::queries::transactions as transactions_queries;

pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    pool.execute(include_str!("sectors.sql")).await?;
    transactions_queries::upsert_sectors(pool).await?;
    pool.execute(include_str!("transactions.sql")).await?;

    // Sector balance reads group by sector
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_transactions_sector
        ON transactions(sector);
        "#
    )
    .execute(pool)
    .await?;

    Ok(())
}
