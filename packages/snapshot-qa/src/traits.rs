//! Trait seams between the pipeline and its collaborators.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{SnapshotDescriptor, SnapshotLedger};

/// Lists the archived captures of a URL, in the order the archive returns
/// them (oldest first in practice, not contractually guaranteed).
#[async_trait]
pub trait SnapshotDirectory: Send + Sync {
    async fn list_snapshots(&self, url: &str) -> Result<Vec<SnapshotDescriptor>>;
}

/// Fetches the archived HTML of one capture.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch_html(&self, url: &str, timestamp: &str) -> Result<String>;
}

/// Submits a prompt to the language model.
///
/// `Ok(None)` means the service answered with a non-success status; callers
/// treat it as "processed with no answer", never as a run-aborting error.
/// Only transport-level failures error.
#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn ask(&self, prompt: &str) -> Result<Option<String>>;
}

/// Durable storage for the snapshot ledger.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Load the full ledger. Errors when no valid ledger exists; there is no
    /// implicit empty-ledger fallback.
    async fn load(&self) -> Result<SnapshotLedger>;

    /// Persist the full ledger. Either the whole new content becomes visible
    /// to subsequent loads or the previous content remains.
    async fn save(&self, ledger: &SnapshotLedger) -> Result<()>;
}
