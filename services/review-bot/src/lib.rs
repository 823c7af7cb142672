//! Review bot - homework review status watcher
//!
//! Polls the homework API, detects review status changes, and sends Telegram messages.

pub mod config;
pub mod engine;
pub mod error;
pub mod homework;
pub mod io;
pub mod logging;
pub mod notifier;
pub mod practicum;
pub mod status;
pub mod telegram;

pub use config::{load_config, Config, Credentials};
pub use error::{Result, ReviewBotError, TransportError, ValidationError};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::engine::Engine;
use crate::io::ReqwestHttpClient;
use crate::notifier::Notifier;
use crate::practicum::{HomeworkApi, PracticumClient};
use crate::telegram::TelegramNotifier;

/// Reject settings the engine cannot run with
pub fn validate_config(config: &Config) -> Result<()> {
    if config.poll_interval_seconds == 0 {
        return Err(ReviewBotError::Config(
            "poll_interval_seconds must be greater than zero".to_string(),
        ));
    }
    if config.request_timeout_seconds == 0 {
        return Err(ReviewBotError::Config(
            "request_timeout_seconds must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Assembles a [`ReviewBot`] from configuration, credentials and transport.
///
/// Credentials are resolved before anything else, so a missing secret stops
/// startup without a single request being made.
pub struct ReviewBotBuilder {
    config: Config,
    http: Option<Arc<dyn io::HttpClient>>,
    cancel: Option<CancellationToken>,
    env: EnvLookup,
}

impl std::fmt::Debug for ReviewBotBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewBotBuilder")
            .field("config", &self.config)
            .field("http", &self.http.is_some())
            .finish()
    }
}

impl ReviewBotBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: None,
            cancel: None,
            env: Box::new(|name| std::env::var(name).ok()),
        }
    }

    /// Use `http` instead of a reqwest client
    pub fn with_http_client(mut self, http: Arc<dyn io::HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    pub fn with_cancellation_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Read secrets through `lookup` instead of the process environment
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Box::new(lookup);
        self
    }

    pub fn build(self) -> Result<ReviewBot> {
        let credentials = Credentials::from_lookup(&self.env).inspect_err(|e| {
            tracing::error!("CRITICAL: {}", e);
            tracing::info!("Bot stopped before polling");
        })?;
        validate_config(&self.config)?;

        let http: Arc<dyn io::HttpClient> = match self.http {
            Some(http) => http,
            None => Arc::new(ReqwestHttpClient::with_timeout(Duration::from_secs(
                self.config.request_timeout_seconds,
            ))?),
        };
        let cancel = self.cancel.unwrap_or_default();

        let api: Arc<dyn HomeworkApi> = Arc::new(PracticumClient::new(
            &self.config.endpoint,
            &credentials.practicum_token,
            Arc::clone(&http),
        ));
        let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
            &self.config.telegram_api_url,
            &credentials.telegram_token,
            &credentials.telegram_chat_id,
            Arc::clone(&http),
        ));

        tracing::debug!(
            "Endpoint: {}, interval: {}s, timeout: {}s",
            self.config.endpoint,
            self.config.poll_interval_seconds,
            self.config.request_timeout_seconds
        );

        let engine = Engine::new(
            api,
            notifier,
            Duration::from_secs(self.config.poll_interval_seconds),
            cancel.clone(),
        );

        Ok(ReviewBot { engine, cancel })
    }
}

/// A fully wired bot, ready to poll
#[derive(Debug)]
pub struct ReviewBot {
    engine: Engine,
    cancel: CancellationToken,
}

impl ReviewBot {
    /// Poll until ctrl-c or the cancellation token fires
    pub async fn start(mut self) -> Result<()> {
        let cancel_for_signal = self.cancel.clone();
        let signal = tokio::spawn(async move {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    match result {
                        Ok(()) => tracing::info!("Shutdown signal received"),
                        Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
                    }
                    cancel_for_signal.cancel();
                }
                _ = cancel_for_signal.cancelled() => {}
            }
        });

        tracing::info!("Review bot started");
        self.engine.run().await;
        tracing::info!("Review bot stopped");

        signal.abort();
        Ok(())
    }
}
