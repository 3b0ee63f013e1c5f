use chrono::Local;
use dotenvy::dotenv;
use tracing::{error, info};

use options_sector_picker::config;
use options_sector_picker::db::db_manager::DbManager;
use options_sector_picker::db::memory_store::InMemoryTransactionStore;
use options_sector_picker::db::store::TransactionStore;
use options_sector_picker::execution::engine::SelectionEngine;
use options_sector_picker::execution::prompt::ConsolePrompt;
use options_sector_picker::execution::types::{CycleReport, ExecutionMode, PurchaseOutcome};
use options_sector_picker::logging;
use options_sector_picker::market_data::yahoo_client::YahooFinanceClient;
use options_sector_picker::strategy::picker::make_rng;
use options_sector_picker::strategy::ranker::RankerSettings;

fn report_outcome(report: &CycleReport) {
    match &report.outcome {
        PurchaseOutcome::Declined => info!(symbol = %report.pick.symbol, "Pick declined, nothing recorded"),
        PurchaseOutcome::Abandoned(_) => info!(symbol = %report.pick.symbol, "Purchase not finished, nothing recorded"),
        PurchaseOutcome::Recorded { id, .. } => info!(id, symbol = %report.pick.symbol, "Purchase recorded"),
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

    // Load configuration (candidates, store connection, horizon)
    let cfg = config::Config::load()?;
    info!(
        candidates = cfg.candidates.len(),
        horizon_days = cfg.horizon_days,
        mode = cfg.execution_mode.as_str(),
        "Configuration loaded and logging initialized"
    );

    let provider = YahooFinanceClient::new(&cfg.market_data)?;
    let settings = RankerSettings::from(&cfg);
    let mut rng = make_rng(cfg.rng_seed);
    let mut prompt = ConsolePrompt::stdio();

    let today = Local::now().date_naive();
    let clock = || Local::now().naive_local();

    let result = match cfg.execution_mode {
        ExecutionMode::Live => {
            let db_manager = DbManager::init(&cfg.store_connection).await?;
            info!("Database manager initialized");
            let engine = SelectionEngine::new(provider, db_manager, cfg.candidates.clone(), settings);
            engine.run_once(&mut prompt, &mut rng, today, &clock).await
        }
        ExecutionMode::Paper => {
            // Real history, read without schema setup; the purchase stays in memory
            let db_manager = DbManager::connect(&cfg.store_connection).await?;
            let history = db_manager.read_all().await?;
            let store = InMemoryTransactionStore::with_transactions(history);
            let engine = SelectionEngine::new(provider, store, cfg.candidates.clone(), settings);
            engine.run_once(&mut prompt, &mut rng, today, &clock).await
        }
    };

    match result {
        Ok(report) => {
            report_outcome(&report);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Selection cycle failed");
            Err(e.into())
        }
    }
}
