//! Typed errors for the snapshot pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during a snapshot pass.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Listing the archive index failed; fatal to the run
    #[error("directory fetch failed: {0}")]
    DirectoryFetch(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Fetching one capture failed; recorded for that snapshot only
    #[error("snapshot fetch failed for {timestamp}: {source}")]
    SnapshotFetch {
        timestamp: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// robots.txt disallows the capture URL (only with an enforced policy)
    #[error("robots.txt disallows: {url}")]
    RobotsDisallowed { url: String },

    /// Ledger could not be read or parsed; fatal, no empty-ledger fallback
    #[error("ledger load failed: {0}")]
    LedgerLoad(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Ledger could not be written; fatal
    #[error("ledger save failed: {0}")]
    LedgerSave(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Answer service transport failure; caught per snapshot like a fetch
    /// failure (a non-2xx answer is a soft null, not an error at all)
    #[error("answer service error: {0}")]
    AnswerService(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
