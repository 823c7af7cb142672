//! Engine: polls the homework API and forwards status changes to the chat

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio_util::sync::CancellationToken;

use crate::homework::{check_response, parse_status};
use crate::notifier::{send_message, Notifier};
use crate::practicum::HomeworkApi;

/// What a single poll iteration did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
    /// A new status message was produced and handed to the notifier
    Notified { delivered: bool },
    /// The status message matched the previous one
    Unchanged,
    /// Fetching or validation failed; `notified` is false for a repeated error,
    /// `delivered` tells whether the error report reached the chat
    Failed { notified: bool, delivered: bool },
}

/// The engine owns the poll window and the de-duplication state
pub struct Engine {
    api: Arc<dyn HomeworkApi>,
    notifier: Arc<dyn Notifier>,
    interval: Duration,
    from_date: u64,
    last_message: String,
    last_error: String,
    cancel: CancellationToken,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("api", &self.api)
            .field("notifier", &self.notifier)
            .field("interval", &self.interval)
            .field("from_date", &self.from_date)
            .finish()
    }
}

impl Engine {
    pub fn new(
        api: Arc<dyn HomeworkApi>,
        notifier: Arc<dyn Notifier>,
        interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            api,
            notifier,
            interval,
            from_date: current_epoch_secs(),
            last_message: String::new(),
            last_error: String::new(),
            cancel,
        }
    }

    /// Start the poll window at `from_date` instead of now
    pub fn with_from_date(mut self, from_date: u64) -> Self {
        self.from_date = from_date;
        self
    }

    /// Lower bound sent with the next request
    pub fn from_date(&self) -> u64 {
        self.from_date
    }

    /// Last status message handed to the notifier
    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    /// Last error message handed to the notifier
    pub fn last_error(&self) -> &str {
        &self.last_error
    }

    /// Poll until the cancellation token is triggered.
    pub async fn run(&mut self) {
        tracing::info!(
            "Polling every {}s starting from {}",
            self.interval.as_secs(),
            self.from_date
        );

        while !self.cancel.is_cancelled() {
            let outcome = self.poll_once().await;
            tracing::debug!("Iteration finished: {:?}", outcome);

            // Wait for the next poll or cancellation
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.cancel.cancelled() => {}
            }
        }

        tracing::debug!("Polling loop cancelled");
    }

    /// Run one fetch, validate, format and notify cycle.
    ///
    /// Errors never escape: they are logged and reported to the chat unless
    /// identical to the previous error. The poll window advances either way.
    pub async fn poll_once(&mut self) -> IterationOutcome {
        let result = self.check_for_update().await;
        self.from_date = current_epoch_secs();

        match result {
            Ok(Some(message)) => {
                let delivered = send_message(self.notifier.as_ref(), &message).await;
                self.last_message = message;
                IterationOutcome::Notified { delivered }
            }
            Ok(None) => {
                tracing::debug!("Homework status has not changed");
                IterationOutcome::Unchanged
            }
            Err(e) => {
                let message = format!("Program failure: {}", e);
                tracing::error!("{}", message);
                if message == self.last_error {
                    return IterationOutcome::Failed {
                        notified: false,
                        delivered: false,
                    };
                }
                let delivered = send_message(self.notifier.as_ref(), &message).await;
                self.last_error = message;
                IterationOutcome::Failed {
                    notified: true,
                    delivered,
                }
            }
        }
    }

    /// Returns the rendered message for the most recent submission, or
    /// `None` when it equals the last one sent.
    async fn check_for_update(&self) -> crate::Result<Option<String>> {
        let response = self.api.fetch(Some(self.from_date)).await?;
        let homeworks = check_response(&response)?;
        let message = parse_status(&homeworks[0])?;

        if message == self.last_message {
            Ok(None)
        } else {
            Ok(Some(message))
        }
    }
}

/// Seconds since the Unix epoch
pub fn current_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
