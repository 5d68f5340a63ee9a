//! Logging configuration using tracing
//!
//! The terminal owns stdout/stderr while the browser runs, so events go to
//! `romi_dashboard.log` in the configured log directory. The filter comes
//! from `ROMI_LOG`, or debug level when `--debug` is given.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::AppConfig;

pub const LOG_FILE_NAME: &str = "romi_dashboard.log";

/// Installs the global subscriber. Keep the guard alive until exit or
/// buffered events are lost.
pub fn init(config: &AppConfig) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)?;

    let file_appender = tracing_appender::rolling::never(&config.log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_new(&config.log_filter)
        .map_err(|e| eyre!("Invalid log filter '{}': {e}", config.log_filter))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .map_err(|e| eyre!("Failed to install logger: {e}"))?;

    tracing::info!(server = %config.server, "romi_dashboard starting");
    tracing::info!("Log directory: {}", config.log_dir.display());

    Ok(guard)
}
