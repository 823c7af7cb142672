//! BDD test world for review bot

use std::collections::HashMap;
use std::sync::Arc;

use cucumber::World;
use review_bot::engine::{Engine, IterationOutcome};
use review_bot::{ReviewBotError, ValidationError};

use crate::steps::poll_loop_steps::ScriptedHttpClient;

#[derive(Debug, Default, World)]
pub struct ReviewBotWorld {
    // Validation testing
    pub response: Option<serde_json::Value>,
    pub validation_result: Option<Result<usize, ValidationError>>,
    pub format_result: Option<Result<String, ValidationError>>,

    // Poll loop testing
    pub http: Option<Arc<ScriptedHttpClient>>,
    pub engine: Option<Engine>,
    pub outcomes: Vec<IterationOutcome>,

    // Startup testing
    pub env: HashMap<String, String>,
    pub startup_error: Option<ReviewBotError>,
}
