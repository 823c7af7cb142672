//! Error types for the review bot

/// Failures while talking to the homework API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Endpoint {endpoint} is unreachable: {reason}")]
    Unreachable { endpoint: String, reason: String },

    #[error("Unexpected status code {status} from {endpoint}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    #[error("Failed to decode API response: {0}")]
    Decode(String),
}

/// Failures while checking the shape of an API response
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Wrong data type: {0}")]
    WrongType(String),

    #[error("Missing key '{0}' in API response")]
    MissingKey(&'static str),

    /// An empty list is reported the same way as a missing key.
    #[error("Missing key 'homeworks': no submissions in API response")]
    EmptyHomeworks,

    #[error("Missing field '{0}' in homework record")]
    MissingField(&'static str),

    #[error("Unexpected homework status '{0}'")]
    UnknownStatus(String),
}

/// Errors that can occur in the review bot
#[derive(Debug, thiserror::Error)]
pub enum ReviewBotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Message was not delivered: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for review bot operations
pub type Result<T> = std::result::Result<T, ReviewBotError>;
