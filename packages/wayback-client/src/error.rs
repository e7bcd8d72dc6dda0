//! Error types for the Wayback Machine client.

use thiserror::Error;

/// Result type for Wayback client operations.
pub type Result<T> = std::result::Result<T, WaybackError>;

/// Wayback Machine client errors.
#[derive(Debug, Error)]
pub enum WaybackError {
    /// Non-success HTTP status from the archive
    #[error("archive returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure (connection, timeout, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
