use sqlx::{PgPool, Row};

use crate::db::models::transactions::{NewTransactionModel, TransactionRow};
use crate::sector::Sector;

const SELECT_TRANSACTIONS: &str = r#"
    SELECT id, symbol, price, sector, dividend_yield, options_ratio, beta, date, cost, shares, notes
    FROM transactions
"#;

/// Insert a single transaction, every value bound as a parameter
pub async fn insert_transaction(pool: &PgPool, transaction: &NewTransactionModel) -> Result<i32, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO transactions (
            symbol, price, sector, dividend_yield, options_ratio, beta, date, cost, shares, notes
        )
        VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)
        RETURNING id
        "#,
    )
    .bind(&transaction.symbol)
    .bind(transaction.price)
    .bind(transaction.sector.code())
    .bind(transaction.dividend_yield)
    .bind(transaction.options_ratio)
    .bind(transaction.beta)
    .bind(transaction.date)
    .bind(transaction.cost)
    .bind(transaction.shares)
    .bind(&transaction.notes)
    .fetch_one(pool)
    .await?;

    row.try_get("id")
}

pub async fn get_all_transactions(pool: &PgPool) -> Result<Vec<TransactionRow>, sqlx::Error> {
    sqlx::query_as::<_, TransactionRow>(&format!("{SELECT_TRANSACTIONS} ORDER BY date, id"))
        .fetch_all(pool)
        .await
}

pub async fn get_transactions_by_sector(pool: &PgPool, sector: Sector) -> Result<Vec<TransactionRow>, sqlx::Error> {
    sqlx::query_as::<_, TransactionRow>(&format!("{SELECT_TRANSACTIONS} WHERE sector = $1 ORDER BY date, id"))
        .bind(sector.code())
        .fetch_all(pool)
        .await
}

/// Make sure every sector code has a row in the `sectors` lookup table
pub async fn upsert_sectors(pool: &PgPool) -> Result<(), sqlx::Error> {
    for sector in Sector::ALL {
        sqlx::query(
            r#"
            INSERT INTO sectors (id, name)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name
            "#,
        )
        .bind(sector.code())
        .bind(sector.as_str())
        .execute(pool)
        .await?;
    }
    Ok(())
}
