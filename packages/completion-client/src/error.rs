//! Error types for the completion client.

use thiserror::Error;

/// Result type for completion client operations.
pub type Result<T> = std::result::Result<T, CompletionError>;

/// Completion client errors.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Configuration error (missing API key, invalid settings)
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failure (connection failed, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from the API (rate limit, invalid request, auth)
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded
    #[error("parse error: {0}")]
    Parse(String),
}
