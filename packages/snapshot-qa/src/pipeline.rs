//! The snapshot pass: list, filter, fetch, extract, answer, checkpoint.

use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::diff::{DiffStrategy, NoopDiff};
use crate::error::Result;
use crate::extract::extract_text;
use crate::prompt::format_answer_prompt;
use crate::traits::{AnswerService, LedgerStore, SnapshotDirectory, SnapshotSource};
use crate::types::{SnapshotDescriptor, SnapshotRecord};

/// Counters for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Snapshots the directory listed.
    pub listed: usize,
    /// Snapshots already in the ledger, left untouched.
    pub skipped: usize,
    /// Snapshots newly processed this run (including failed fetches).
    pub processed: usize,
    /// Newly processed snapshots whose content fetch failed.
    pub failed: usize,
}

/// Orchestrates one idempotent pass over a URL's archived snapshots.
///
/// Each newly processed snapshot is checkpointed to the store before the
/// next one starts, so an interrupted run never loses completed work and a
/// rerun picks up exactly where it stopped.
pub struct SnapshotPipeline<D, S, A, L> {
    directory: D,
    source: S,
    answerer: A,
    store: L,
    config: PipelineConfig,
    diff: Box<dyn DiffStrategy>,
}

impl<D, S, A, L> SnapshotPipeline<D, S, A, L>
where
    D: SnapshotDirectory,
    S: SnapshotSource,
    A: AnswerService,
    L: LedgerStore,
{
    pub fn new(directory: D, source: S, answerer: A, store: L, config: PipelineConfig) -> Self {
        Self {
            directory,
            source,
            answerer,
            store,
            config,
            diff: Box::new(NoopDiff),
        }
    }

    /// Replace the default change detection (which treats every snapshot as
    /// changed) with another strategy.
    pub fn with_diff_strategy(mut self, diff: impl DiffStrategy + 'static) -> Self {
        self.diff = Box::new(diff);
        self
    }

    /// Run one pass over the target URL's snapshots.
    ///
    /// Directory listing, ledger load, and ledger save failures abort the
    /// run. A single snapshot's fetch or answer failure records a null entry
    /// and the pass continues.
    pub async fn run(&self) -> Result<RunSummary> {
        let snapshots = self.directory.list_snapshots(&self.config.target_url).await?;
        info!(
            url = %self.config.target_url,
            count = snapshots.len(),
            "Listed archived snapshots"
        );

        let mut ledger = self.store.load().await?;
        let mut summary = RunSummary {
            listed: snapshots.len(),
            ..Default::default()
        };

        // Cleaned text and answer of the last snapshot seen this run, for
        // change detection.
        let mut previous: Option<(String, Option<String>)> = None;

        for snapshot in &snapshots {
            let key = snapshot.key();
            if ledger.contains(&key) {
                debug!(timestamp = %snapshot.timestamp, "Snapshot already processed, skipping");
                summary.skipped += 1;
                continue;
            }

            if let Some(limit) = self.config.snapshot_limit {
                if summary.processed >= limit {
                    info!(limit, "Snapshot limit reached, stopping pass");
                    break;
                }
            }

            let record = self.process_snapshot(snapshot, &mut previous).await?;
            if record.is_none() {
                summary.failed += 1;
            }

            ledger.insert(&key, record);
            self.store.save(&ledger).await?;
            summary.processed += 1;
        }

        info!(
            listed = summary.listed,
            skipped = summary.skipped,
            processed = summary.processed,
            failed = summary.failed,
            "Snapshot pass complete"
        );
        Ok(summary)
    }

    /// Fetch, extract, and answer one snapshot. A fetch failure or an
    /// answer-service failure yields `Ok(None)` so the pass can continue;
    /// only the store's own I/O stays fatal.
    async fn process_snapshot(
        &self,
        snapshot: &SnapshotDescriptor,
        previous: &mut Option<(String, Option<String>)>,
    ) -> Result<Option<SnapshotRecord>> {
        info!(
            timestamp = %snapshot.timestamp_formatted,
            url = %snapshot.original_url,
            "Processing snapshot"
        );

        let raw_html = match self
            .source
            .fetch_html(&snapshot.original_url, &snapshot.timestamp)
            .await
        {
            Ok(html) => html,
            Err(e) => {
                warn!(timestamp = %snapshot.timestamp, error = %e, "Snapshot fetch failed");
                return Ok(None);
            }
        };

        let clean_html = extract_text(&raw_html);

        let llm_answer = match previous.take() {
            Some((prev_text, prev_answer)) if !self.diff.pages_differ(&prev_text, &clean_html) => {
                debug!(timestamp = %snapshot.timestamp, "Content unchanged, reusing previous answer");
                prev_answer
            }
            _ => {
                let prompt = format_answer_prompt(&self.config.question, &clean_html);
                match self.answerer.ask(&prompt).await {
                    Ok(answer) => answer,
                    Err(e) => {
                        warn!(timestamp = %snapshot.timestamp, error = %e, "Answer service failed");
                        return Ok(None);
                    }
                }
            }
        };

        *previous = Some((clean_html.clone(), llm_answer.clone()));
        Ok(Some(SnapshotRecord {
            raw_html,
            clean_html,
            llm_answer,
        }))
    }
}
