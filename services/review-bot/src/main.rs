//! Review bot CLI
//!
//! Command-line interface for the homework review status watcher.

use std::path::PathBuf;

use clap::Parser;
use review_bot::{load_config, logging, Config, ReviewBotBuilder};
use tracing::Level;

#[derive(Parser)]
#[command(name = "review-bot")]
#[command(about = "Homework review status watcher with Telegram notifications")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between polls (overrides config file)
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Log level (overrides config file)
    #[arg(short, long)]
    log_level: Option<Level>,

    /// Also write logs to this file (overrides config file)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // A missing .env file is fine; the variables may come from the environment
    let dotenv = dotenvy::dotenv();

    let mut config = if let Some(config_path) = &args.config {
        load_config(config_path)?
    } else {
        Config::default()
    };

    if let Some(level) = args.log_level {
        config.logging.level = level.to_string();
    }
    if let Some(log_file) = args.log_file {
        config.logging.file = Some(log_file);
    }
    if let Some(poll_interval) = args.poll_interval {
        config.poll_interval_seconds = poll_interval;
    }

    logging::init(&config.logging)?;

    tracing::debug!(
        "Parsed command line arguments: config={:?}, poll_interval={:?}",
        args.config,
        args.poll_interval
    );
    match &dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
        Err(e) => tracing::debug!("No .env file loaded: {}", e),
    }

    tracing::info!("Starting review bot");
    ReviewBotBuilder::new(config).build()?.start().await?;

    Ok(())
}
