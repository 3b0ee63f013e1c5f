// Centralized logging setup: console output plus optional JSON file logs
use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock; // For global file guard
use tracing_subscriber::{
    fmt,
    EnvFilter,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

const LOG_DIR: &str = "logs";

/// Other crates log at `warn`; this crate and the running binary at `level`
fn build_filter(bin_name: &str, level: &str) -> EnvFilter {
    EnvFilter::try_new(format!(
        "warn,options_sector_picker={level},{bin_name}={level}"
    ))
    .unwrap_or_else(|_| EnvFilter::new(format!("warn,options_sector_picker=info,{bin_name}=info")))
}

pub fn init_logging(bin_name: String) -> eyre::Result<()> {
    // Load log levels for console and file from env
    let console_log_level = env::var("CONSOLE_LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string());
    let file_log_level = env::var("FILE_LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string());
    let log_to_file = env::var("LOG_TO_FILE").map(|v| v == "true").unwrap_or(false);

    // Console layer: always enabled, pretty human-readable logs
    let console_layer = fmt::Layer::new()
        .pretty()
        .with_writer(std::io::stderr)
        .with_filter(build_filter(&bin_name, &console_log_level));

    let file_layer = if log_to_file {
        let log_dir = Path::new(LOG_DIR);
        fs::create_dir_all(log_dir)?;
        let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
        let file_appender = tracing_appender::rolling::never(log_dir, format!("{bin_name}_{timestamp}.log"));
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        FILE_GUARD.set(guard).ok(); // Keep the writer alive for the whole run

        // File layer: structured JSON logs with UTC timestamps
        Some(
            fmt::Layer::new()
                .json()
                .with_writer(non_blocking)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_filter(build_filter(&bin_name, &file_log_level)),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
