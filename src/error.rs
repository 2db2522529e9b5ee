//! Error types for the Warpgate provider.

use thiserror::Error;

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Warpgate provider.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("invalid host URL: {0}")]
    InvalidHost(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),

    // Transport errors
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    // API errors
    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    // Local validation errors
    #[error("invalid ID format: {id} (expected {expected})")]
    InvalidId { id: String, expected: String },

    #[error("{0}")]
    Validation(String),

    #[error("{kind} {name} not found")]
    NotFound { kind: &'static str, name: String },
}

impl Error {
    /// Build a validation error from anything displayable.
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}
