//! Notifier trait for sending chat messages

use async_trait::async_trait;

/// Trait for sending notifications
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Deliver a message, reporting failure as a delivery error
    async fn notify(&self, message: &str) -> crate::Result<()>;
}

/// Send a message and swallow any delivery failure.
///
/// Returns whether the message went out. A failed notification is logged
/// and never aborts the caller.
pub async fn send_message(notifier: &dyn Notifier, message: &str) -> bool {
    match notifier.notify(message).await {
        Ok(()) => {
            tracing::info!("Message sent via {}", notifier.type_name());
            true
        }
        Err(e) => {
            tracing::error!("Failed to send message via {}: {}", notifier.type_name(), e);
            false
        }
    }
}
