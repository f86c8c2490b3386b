//! Logging configuration for KhetGuru

use std::path::Path;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::Result;

const LOG_DIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "khetguru.log";

/// Initialize logging system with console and file output
pub fn init_logging() -> Result<()> {
    init_logging_with_config(None)
}

/// Initialize logging with configuration
pub fn init_logging_with_config(config: Option<&crate::config::AppConfig>) -> Result<()> {
    let env_filter = if let Some(config) = config {
        build_filter(&config.logging.level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| build_filter("info"))
    };
    install(env_filter)?;

    let level = config.map_or("info", |c| c.logging.level.as_str());
    tracing::info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Initialize logging with custom log level
pub fn init_logging_with_level(level: &str) -> Result<()> {
    install(build_filter(level))?;
    tracing::info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Initialize simple logging for testing
pub fn init_simple_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init()
        .map_err(|e| crate::KhetGuruError::Custom(format!("Logging already initialized: {e}")))?;
    Ok(())
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("{level},khetguru={level},tower_http={level}"))
}

fn install(env_filter: EnvFilter) -> Result<()> {
    let logs_dir = Path::new(LOG_DIR);
    if !logs_dir.exists() {
        std::fs::create_dir_all(logs_dir)?;
    }

    let file_appender = tracing_appender::rolling::daily(LOG_DIR, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking)
        .with_ansi(false); // No colors in file

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| crate::KhetGuruError::Custom(format!("Logging already initialized: {e}")))?;

    // The writer thread must outlive every span; keep it for the whole process
    std::mem::forget(guard);

    Ok(())
}
