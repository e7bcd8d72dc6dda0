//! File-backed JSON ledger store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::traits::LedgerStore;
use crate::types::SnapshotLedger;

/// Stores the ledger as pretty-printed JSON at a fixed path.
///
/// `save` writes the full serialization to a sibling temp file and renames
/// it over the target, so a subsequent `load` sees either the old content or
/// the new one, never a partial write.
pub struct JsonLedgerStore {
    path: PathBuf,
}

impl JsonLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty ledger file at `path`. Refuses to overwrite an
    /// existing file: the ledger is never deleted or reset by this system.
    pub async fn init(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|e| PipelineError::LedgerSave(Box::new(e)))?;
        if exists {
            return Err(PipelineError::LedgerSave(Box::new(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("ledger file already exists: {}", path.display()),
            ))));
        }

        let store = Self::new(path);
        store.save(&SnapshotLedger::new()).await?;
        Ok(store)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl LedgerStore for JsonLedgerStore {
    async fn load(&self) -> Result<SnapshotLedger> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| PipelineError::LedgerLoad(Box::new(e)))?;
        let ledger =
            serde_json::from_slice(&bytes).map_err(|e| PipelineError::LedgerLoad(Box::new(e)))?;
        Ok(ledger)
    }

    async fn save(&self, ledger: &SnapshotLedger) -> Result<()> {
        let json = serde_json::to_vec_pretty(ledger)
            .map_err(|e| PipelineError::LedgerSave(Box::new(e)))?;

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| PipelineError::LedgerSave(Box::new(e)))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| PipelineError::LedgerSave(Box::new(e)))?;

        debug!(path = %self.path.display(), entries = ledger.len(), "Ledger checkpointed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SnapshotKey, SnapshotRecord};

    fn temp_ledger_path() -> PathBuf {
        std::env::temp_dir().join(format!("snapqa-store-{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_init_creates_empty_ledger() {
        let path = temp_ledger_path();
        let store = JsonLedgerStore::init(&path).await.unwrap();

        let ledger = store.load().await.unwrap();
        assert!(ledger.is_empty());

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let path = temp_ledger_path();
        JsonLedgerStore::init(&path).await.unwrap();

        let second = JsonLedgerStore::init(&path).await;
        assert!(matches!(second, Err(PipelineError::LedgerSave(_))));

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_load_missing_file_errors() {
        let store = JsonLedgerStore::new(temp_ledger_path());
        assert!(matches!(store.load().await, Err(PipelineError::LedgerLoad(_))));
    }

    #[tokio::test]
    async fn test_load_unparsable_file_errors() {
        let path = temp_ledger_path();
        std::fs::write(&path, "not json").unwrap();

        let store = JsonLedgerStore::new(&path);
        assert!(matches!(store.load().await, Err(PipelineError::LedgerLoad(_))));

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let path = temp_ledger_path();
        let store = JsonLedgerStore::init(&path).await.unwrap();

        let mut ledger = SnapshotLedger::new();
        ledger.insert(
            &SnapshotKey::new("20230615120000", "https://a.com"),
            Some(SnapshotRecord {
                raw_html: "<html/>".into(),
                clean_html: "text".into(),
                llm_answer: None,
            }),
        );
        ledger.insert(&SnapshotKey::new("20240101000000", "https://a.com"), None);

        store.save(&ledger).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, ledger);

        // save(load()) is a no-op on content.
        store.save(&loaded).await.unwrap();
        assert_eq!(store.load().await.unwrap(), ledger);

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_save_leaves_no_temp_file() {
        let path = temp_ledger_path();
        let store = JsonLedgerStore::init(&path).await.unwrap();

        store.save(&SnapshotLedger::new()).await.unwrap();
        assert!(!store.temp_path().exists());

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_file_is_pretty_printed_json_object() {
        let path = temp_ledger_path();
        let store = JsonLedgerStore::init(&path).await.unwrap();

        let mut ledger = SnapshotLedger::new();
        ledger.insert(&SnapshotKey::new("20230615120000", "https://a.com"), None);
        store.save(&ledger).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value.is_object());

        std::fs::remove_file(&path).unwrap();
    }
}
