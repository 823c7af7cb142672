//! Homework status API client

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::current_epoch_secs;
use crate::error::TransportError;
use crate::io::HttpClient;

/// Source of homework status updates
#[async_trait]
pub trait HomeworkApi: Send + Sync + std::fmt::Debug {
    /// Fetch the decoded status payload for changes since `from_date`.
    /// `None` or `Some(0)` means "since now".
    async fn fetch(&self, from_date: Option<u64>) -> crate::Result<Value>;
}

/// Client for the Practicum homework statuses endpoint
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(endpoint: &str, token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", endpoint);
        Self {
            endpoint: endpoint.to_string(),
            authorization: format!("OAuth {}", token),
            http,
        }
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch(&self, from_date: Option<u64>) -> crate::Result<Value> {
        let from_date = from_date
            .filter(|&ts| ts != 0)
            .unwrap_or_else(current_epoch_secs)
            .to_string();

        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &[("from_date", from_date.as_str())],
            )
            .await
            .inspect_err(|e| tracing::error!("Homework API request failed: {}", e))?;

        if response.status != 200 {
            let err = TransportError::UnexpectedStatus {
                endpoint: self.endpoint.clone(),
                status: response.status,
            };
            tracing::error!("{}", err);
            return Err(err.into());
        }

        let body = serde_json::from_str::<Value>(&response.body).map_err(|e| {
            let err = TransportError::Decode(e.to_string());
            tracing::error!("{}", err);
            err
        })?;

        tracing::info!("Homework API request succeeded (from_date={})", from_date);
        Ok(body)
    }
}
