//! File-based logging.
//!
//! The terminal belongs to the UI, so `tracing` output goes to a daily
//! rotating file instead of stdout/stderr.

use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LoggingSettings, default_log_dir};

const LOG_FILE_PREFIX: &str = "playdeck.log";

/// Initialize the logging system.
///
/// Logs are written to `<dir>/playdeck.log.YYYY-MM-DD`. `RUST_LOG` wins over
/// `logging.filter`. The returned guard flushes buffered lines on drop, so it
/// must live until the app exits. Returns `None` when logging is disabled.
pub fn init_logging(
    settings: &LoggingSettings,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    if !settings.enabled {
        return Ok(None);
    }

    let log_dir = settings
        .dir
        .clone()
        .or_else(default_log_dir)
        .unwrap_or_else(|| PathBuf::from(".logs"));
    fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(dir = %log_dir.display(), "logging initialized");
    Ok(Some(guard))
}
