//! In-memory ledger store for testing and development.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{PipelineError, Result};
use crate::traits::LedgerStore;
use crate::types::SnapshotLedger;

/// Holds the ledger in process memory.
///
/// Mirrors the file store's contract: `load` errors until a ledger has been
/// seeded or saved, so the fatal missing-ledger path is testable. Clones
/// share state, letting tests inspect the ledger after a run.
#[derive(Clone, Default)]
pub struct MemoryLedgerStore {
    ledger: Arc<RwLock<Option<SnapshotLedger>>>,
    fail_saves: Arc<RwLock<bool>>,
    saves: Arc<RwLock<usize>>,
}

impl MemoryLedgerStore {
    /// Create a store seeded with an empty ledger (the common case).
    pub fn new() -> Self {
        Self::with_ledger(SnapshotLedger::new())
    }

    /// Create a store with no ledger at all; `load` will error.
    pub fn uninitialized() -> Self {
        Self::default()
    }

    /// Create a store seeded with an existing ledger.
    pub fn with_ledger(ledger: SnapshotLedger) -> Self {
        let store = Self::default();
        *store.ledger.write().unwrap() = Some(ledger);
        store
    }

    /// Make every subsequent `save` fail.
    pub fn fail_saves(self) -> Self {
        *self.fail_saves.write().unwrap() = true;
        self
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        *self.saves.read().unwrap()
    }

    /// Current ledger contents, if any.
    pub fn snapshot(&self) -> Option<SnapshotLedger> {
        self.ledger.read().unwrap().clone()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn load(&self) -> Result<SnapshotLedger> {
        self.ledger.read().unwrap().clone().ok_or_else(|| {
            PipelineError::LedgerLoad(Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no ledger seeded",
            )))
        })
    }

    async fn save(&self, ledger: &SnapshotLedger) -> Result<()> {
        if *self.fail_saves.read().unwrap() {
            return Err(PipelineError::LedgerSave(Box::new(std::io::Error::other(
                "simulated save failure",
            ))));
        }

        *self.ledger.write().unwrap() = Some(ledger.clone());
        *self.saves.write().unwrap() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SnapshotKey;

    #[tokio::test]
    async fn test_uninitialized_load_errors() {
        let store = MemoryLedgerStore::uninitialized();
        assert!(matches!(store.load().await, Err(PipelineError::LedgerLoad(_))));
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let store = MemoryLedgerStore::new();

        let mut ledger = SnapshotLedger::new();
        ledger.insert(&SnapshotKey::new("20230615120000", "https://a.com"), None);
        store.save(&ledger).await.unwrap();

        assert_eq!(store.load().await.unwrap(), ledger);
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn test_fail_saves() {
        let store = MemoryLedgerStore::new().fail_saves();
        let result = store.save(&SnapshotLedger::new()).await;
        assert!(matches!(result, Err(PipelineError::LedgerSave(_))));
        assert_eq!(store.save_count(), 0);
    }
}
