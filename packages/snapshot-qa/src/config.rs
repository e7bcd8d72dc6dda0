//! Pipeline configuration.

/// Everything a run needs to know, passed explicitly to the orchestrator.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Page whose archived captures are processed.
    pub target_url: String,

    /// Fixed question asked about every snapshot.
    pub question: String,

    /// Upper bound on *newly processed* snapshots per run; skipped
    /// duplicates never consume a slot. `None` means unbounded.
    pub snapshot_limit: Option<usize>,
}

impl PipelineConfig {
    pub fn new(target_url: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            question: question.into(),
            snapshot_limit: None,
        }
    }

    /// Bound the number of newly processed snapshots per run.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.snapshot_limit = Some(limit);
        self
    }
}
