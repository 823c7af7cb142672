//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::io::HttpClient;
use crate::notifier::Notifier;

/// Request body of the `sendMessage` method
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Telegram message sender bound to a single chat
pub struct TelegramNotifier {
    send_message_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(api_url: &str, token: &str, chat_id: &str, http: Arc<dyn HttpClient>) -> Self {
        let send_message_url = format!(
            "{}/bot{}/sendMessage",
            api_url.trim_end_matches('/'),
            token
        );

        tracing::debug!("Created TelegramNotifier for chat {}", chat_id);

        Self {
            send_message_url,
            chat_id: chat_id.to_string(),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, message: &str) -> crate::Result<()> {
        let body = serde_json::to_value(SendMessage {
            chat_id: &self.chat_id,
            text: message,
        })
        .map_err(|e| crate::ReviewBotError::Delivery(e.to_string()))?;

        tracing::debug!(
            "Sending Telegram message to chat {} ({} chars)",
            self.chat_id,
            message.chars().count()
        );

        let response = self
            .http
            .post_json(&self.send_message_url, &body)
            .await
            .map_err(|e| crate::ReviewBotError::Delivery(e.to_string()))?;

        if response.status != 200 {
            return Err(crate::ReviewBotError::Delivery(format!(
                "Telegram API returned status {}: {}",
                response.status, response.body
            )));
        }

        tracing::debug!("Telegram message delivered");
        Ok(())
    }
}
