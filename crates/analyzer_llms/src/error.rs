//! Error types for inference calls

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Errors returned by a [`Provider`](crate::Provider).
#[derive(Debug, Error)]
pub enum Error {
    /// No credential configured for the provider
    #[error("Missing API key for provider: {0}")]
    MissingApiKey(String),

    /// Invalid provider configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote API answered with a non-success status. `payload` is the
    /// provider's error object, passed through untouched.
    #[error("Provider API error {status}: {payload}")]
    Api { status: u16, payload: Value },

    /// Transport failure (connect, TLS, body read)
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The per-call deadline elapsed
    #[error("Inference call timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// The call was cancelled before the remote answered
    #[error("Inference call cancelled")]
    Cancelled,

    /// A success response whose body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an API error from a status and payload
    pub fn api(status: u16, payload: Value) -> Self {
        Error::Api { status, payload }
    }
}

/// Result type for inference calls
pub type Result<T> = std::result::Result<T, Error>;
