//! Core data types: snapshot identity, result records, and the ledger.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One archived capture of the target URL, as listed by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDescriptor {
    /// Capture timestamp in `YYYYMMDDHHMMSS` form.
    pub timestamp: String,

    /// Human-readable rendition of the timestamp; equals the raw string
    /// when the timestamp did not parse. Display-only.
    pub timestamp_formatted: String,

    /// The URL as originally captured.
    pub original_url: String,
}

impl SnapshotDescriptor {
    pub fn new(
        timestamp: impl Into<String>,
        timestamp_formatted: impl Into<String>,
        original_url: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            timestamp_formatted: timestamp_formatted.into(),
            original_url: original_url.into(),
        }
    }

    /// De-duplication identity of this capture.
    pub fn key(&self) -> SnapshotKey {
        SnapshotKey {
            timestamp: self.timestamp.clone(),
            original_url: self.original_url.clone(),
        }
    }
}

/// Stable identity of a snapshot.
///
/// Two descriptors denote the same capture iff timestamp and original URL
/// both match; a changed original URL at the same timestamp is a new,
/// unprocessed snapshot. The formatted timestamp takes no part in identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotKey {
    pub timestamp: String,
    pub original_url: String,
}

impl SnapshotKey {
    pub fn new(timestamp: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            original_url: original_url.into(),
        }
    }

    /// Canonical JSON rendering used as the on-disk map key, so the ledger
    /// file keys carry the full identity structure rather than a flat
    /// timestamp string.
    pub fn to_ledger_key(&self) -> String {
        // Two plain string fields; serialization cannot fail in practice.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse a ledger map key back into a structured identity.
    pub fn parse_ledger_key(key: &str) -> Option<Self> {
        serde_json::from_str(key).ok()
    }
}

/// Result of processing one snapshot. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// The archived HTML exactly as fetched.
    pub raw_html: String,

    /// Readable text extracted from the HTML.
    pub clean_html: String,

    /// The model's answer; `None` when the answer service returned a
    /// non-success status (soft failure, not retried).
    pub llm_answer: Option<String>,
}

/// Insertion-ordered mapping of processed snapshots to their results.
///
/// The ledger is the single source of truth for "has this snapshot been
/// processed". A `None` value marks a snapshot whose content fetch failed.
/// On-disk order is insertion order, as encountered during runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotLedger {
    entries: IndexMap<String, Option<SnapshotRecord>>,
}

impl SnapshotLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a snapshot with this identity has already been processed.
    pub fn contains(&self, key: &SnapshotKey) -> bool {
        self.entries.contains_key(&key.to_ledger_key())
    }

    /// Record the result for a snapshot. `None` marks a failed fetch.
    pub fn insert(&mut self, key: &SnapshotKey, record: Option<SnapshotRecord>) {
        self.entries.insert(key.to_ledger_key(), record);
    }

    /// Look up the result for a snapshot, if any was recorded.
    pub fn get(&self, key: &SnapshotKey) -> Option<&Option<SnapshotRecord>> {
        self.entries.get(&key.to_ledger_key())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Option<SnapshotRecord>)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(timestamp: &str, url: &str) -> SnapshotDescriptor {
        SnapshotDescriptor::new(timestamp, timestamp, url)
    }

    #[test]
    fn test_key_ignores_formatted_timestamp() {
        let a = SnapshotDescriptor::new("20230615120000", "Jun 15th, 2023 | 12:00 PM", "https://a.com");
        let b = SnapshotDescriptor::new("20230615120000", "20230615120000", "https://a.com");
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_same_timestamp_different_url_is_different_key() {
        let a = descriptor("20230615120000", "https://a.com");
        let b = descriptor("20230615120000", "https://a.com/");
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_ledger_key_round_trip() {
        let key = SnapshotKey::new("20230615120000", "https://example.com/pricing");
        let text = key.to_ledger_key();

        assert!(text.contains("\"timestamp\""));
        assert!(text.contains("\"original_url\""));
        assert_eq!(SnapshotKey::parse_ledger_key(&text), Some(key));
    }

    #[test]
    fn test_ledger_insert_and_contains() {
        let mut ledger = SnapshotLedger::new();
        let key = SnapshotKey::new("20230615120000", "https://a.com");

        assert!(!ledger.contains(&key));
        ledger.insert(&key, None);
        assert!(ledger.contains(&key));
        assert_eq!(ledger.get(&key), Some(&None));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_ledger_preserves_insertion_order() {
        let mut ledger = SnapshotLedger::new();
        for ts in ["20230301000000", "20230101000000", "20230201000000"] {
            ledger.insert(&SnapshotKey::new(ts, "https://a.com"), None);
        }

        let order: Vec<_> = ledger
            .iter()
            .map(|(k, _)| SnapshotKey::parse_ledger_key(k).unwrap().timestamp)
            .collect();
        assert_eq!(order, ["20230301000000", "20230101000000", "20230201000000"]);
    }

    #[test]
    fn test_ledger_serializes_as_object_with_structured_keys() {
        let mut ledger = SnapshotLedger::new();
        ledger.insert(
            &SnapshotKey::new("20230615120000", "https://a.com"),
            Some(SnapshotRecord {
                raw_html: "<html/>".into(),
                clean_html: "".into(),
                llm_answer: Some("42".into()),
            }),
        );

        let json = serde_json::to_value(&ledger).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);

        let key = object.keys().next().unwrap();
        let parsed = SnapshotKey::parse_ledger_key(key).unwrap();
        assert_eq!(parsed.timestamp, "20230615120000");
        assert_eq!(object[key]["llm_answer"], "42");

        let back: SnapshotLedger = serde_json::from_value(json).unwrap();
        assert_eq!(back, ledger);
    }
}
