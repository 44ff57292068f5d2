//! Error types for the trading intent pipeline.
//!
//! Only failures that prevent a command from being built live here.
//! Incomplete or inconsistent commands are reported through
//! [`crate::ValidationOutcome`] instead.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the trading intent pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The classification provider rejected the request.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Network failure talking to the provider.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider answered with a body we could not decode.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The caller cancelled the request.
    #[error("Request cancelled")]
    Cancelled,

    /// The request exceeded its deadline.
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a provider error.
    pub fn provider(msg: impl Into<String>) -> Self {
        Error::Provider(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Error::Transport(msg.into())
    }

    /// Create a malformed response error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedResponse(msg.into())
    }

    /// Whether the failure came from the caller's context rather than the provider.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Error::Cancelled | Error::Timeout(_))
    }
}
