use dotenvy::dotenv;
use eyre::Result;
use tracing::info;

use options_sector_picker::logging;
use options_sector_picker::config::ConnectionConfig;
use options_sector_picker::db::{
    connection,
    schema,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging
    if let Err(e) = logging::init_logging(env!("CARGO_BIN_NAME").to_string()) {
        eprintln!("Failed to initialize logging: {}", e);
        return Err(e);
    }

    let store_connection = ConnectionConfig::from_env()?;
    info!("Configuration loaded and logging initialized");

    // Initialize database connection pool
    let pool = connection::create_pool(&store_connection).await?;
    info!("Database connection pool created");

    // Create tables and seed the sector lookup table
    schema::init_schema(&pool).await?;
    info!("Database schema initialized");

    Ok(())
}
