//! Change detection between consecutive snapshots.

use sha2::{Digest, Sha256};

/// Decides whether a snapshot's content differs from its predecessor enough
/// to warrant a fresh answer-service call.
pub trait DiffStrategy: Send + Sync {
    /// `true` when `current` should be treated as changed relative to
    /// `previous`.
    fn pages_differ(&self, previous: &str, current: &str) -> bool;
}

/// Default strategy: every snapshot counts as changed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiff;

impl DiffStrategy for NoopDiff {
    fn pages_differ(&self, _previous: &str, _current: &str) -> bool {
        true
    }
}

/// Treats a snapshot as unchanged when its cleaned text hashes identically
/// to the previous one, saving an answer-service call.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContentHashDiff;

impl ContentHashDiff {
    fn digest(text: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        hasher.finalize().into()
    }
}

impl DiffStrategy for ContentHashDiff {
    fn pages_differ(&self, previous: &str, current: &str) -> bool {
        Self::digest(previous) != Self::digest(current)
    }
}
