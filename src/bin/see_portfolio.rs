use dotenvy::dotenv;
use eyre::eyre;
use tracing::info;

use options_sector_picker::logging;
use options_sector_picker::config::ConnectionConfig;
use options_sector_picker::db::db_manager::DbManager;
use options_sector_picker::db::models::transactions::{DATE_FORMAT, TransactionModel};
use options_sector_picker::db::store::TransactionStore;
use options_sector_picker::sector::Sector;
use options_sector_picker::strategy::picker::{least_held_sectors, sector_counts};

fn print_transactions(transactions: &[TransactionModel]) {
    println!(
        "{:>5}  {:<19}  {:<8}  {:<14}  {:>10}  {:>10}  {:>9}  {:>10}  notes",
        "id", "date", "symbol", "sector", "price", "cost", "shares", "ratio"
    );
    for t in transactions {
        println!(
            "{:>5}  {:<19}  {:<8}  {:<14}  {:>10.2}  {:>10}  {:>9}  {:>10.6}  {}",
            t.id,
            t.date.format(DATE_FORMAT).to_string(),
            t.symbol,
            t.sector.to_string(),
            t.price,
            t.cost.to_string(),
            t.shares.to_string(),
            t.options_ratio,
            t.notes
        );
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging
    if let Err(e) = logging::init_logging(env!("CARGO_BIN_NAME").to_string()) {
        eprintln!("Failed to initialize logging: {}", e);
        return Err(e);
    }

    // Optional sector filter, e.g. `see_portfolio real_estate`
    let sector_filter = match std::env::args().nth(1) {
        Some(arg) => Some(Sector::from_name(&arg).ok_or_else(|| eyre!("Unknown sector '{}'", arg))?),
        None => None,
    };

    let store_connection = ConnectionConfig::from_env()?;
    let db_manager = DbManager::init(&store_connection).await?;
    info!("Database manager initialized");

    let all_transactions = db_manager.read_all().await?;
    let shown = match sector_filter {
        Some(sector) => db_manager.get_transactions_by_sector(sector).await?,
        None => all_transactions.clone(),
    };
    print_transactions(&shown);

    println!();
    println!("Sector exposure ({} purchases):", all_transactions.len());
    for (sector, count) in sector_counts(&all_transactions) {
        println!("  {:<14} {}", sector.to_string(), count);
    }
    let least_held: Vec<String> = least_held_sectors(&all_transactions).iter().map(|s| s.to_string()).collect();
    println!("Least held: {}", least_held.join(", "));

    Ok(())
}
