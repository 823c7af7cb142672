//! Log subscriber setup

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::config::LoggingConfig;

/// Parse a log level name such as "info" or "DEBUG"
pub fn parse_level(level: &str) -> crate::Result<Level> {
    level
        .parse()
        .map_err(|_| crate::ReviewBotError::Config(format!("Invalid log level '{}'", level)))
}

/// Open `path` for appending, creating it if needed
pub fn open_log_file(path: &Path) -> crate::Result<File> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

/// Install the global subscriber: timestamped lines on stdout, plus an
/// uncoloured copy in the configured log file. `RUST_LOG`, when set, takes
/// precedence over the configured level.
pub fn init(config: &LoggingConfig) -> crate::Result<()> {
    let level = parse_level(&config.level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let file_layer = match &config.file {
        Some(path) => {
            let file = open_log_file(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(file_layer)
        .with(filter)
        .try_init()
        .map_err(|e| crate::ReviewBotError::Config(format!("Failed to install logger: {}", e)))
}
