//! Tracing setup.
//!
//! Events always go to a log file through a non-blocking appender. Headless
//! runs also print to stderr; the TUI keeps the terminal to itself.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "MEDIALIB_SCAN_LOG";

/// Install the global subscriber. Keep the returned guard alive until exit
/// so buffered lines are flushed.
pub fn init_logger(log_file: &Path, default_level: &str, to_stderr: bool) -> Result<WorkerGuard> {
    let filter = std::env::var(LOG_ENV).unwrap_or_else(|_| default_level.to_string());
    let filter_layer = EnvFilter::try_new(&filter)
        .with_context(|| format!("invalid log filter '{}'", filter))?;

    let dir = log_file.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create log directory {}", dir.display()))?;
    let file_name = log_file
        .file_name()
        .context("log file path has no file name")?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(stderr_layer)
        .with(filter_layer)
        .try_init()
        .context("tracing subscriber already installed")?;

    info!(log_file = %log_file.display(), "logging initialised");
    Ok(guard)
}
