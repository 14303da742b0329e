use thiserror::Error;

/// Errors from the intent-resolution backend call.
#[derive(Debug, Error)]
pub enum IntentError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("intent backend authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("intent backend throttled the request: {0}")]
    Throttled(String),

    #[error("intent backend error (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    #[error("failed to decode intent backend response: {0}")]
    Deserialization(String),
}

/// Errors from writing a history record.
///
/// Only [`StoreError::Rejected`] is a recognized storage-layer failure: the
/// store received the write and answered with an error. Everything else
/// means the write could not even be expressed or delivered.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store rejected write ({code}): {message}")]
    Rejected { code: String, message: String },

    #[error("store transport error: {0}")]
    Transport(String),

    #[error("failed to encode record: {0}")]
    Encoding(String),
}

impl StoreError {
    /// Whether this failure belongs to the storage layer's own error category.
    pub fn is_recognized(&self) -> bool {
        matches!(self, StoreError::Rejected { .. })
    }
}

/// Startup configuration errors. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Errors that end the chat pipeline early.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("message field is missing or empty")]
    MissingMessage,

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Intent(#[from] IntentError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BridgeError {
    /// HTTP status reported for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            BridgeError::MissingMessage => 400,
            _ => 500,
        }
    }
}
