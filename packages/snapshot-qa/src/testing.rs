//! Mock collaborators for pipeline tests.
//!
//! Every mock is `Clone` with shared interior state, so a test can hand one
//! clone to the pipeline and keep another to inspect recorded calls.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{PipelineError, Result};
use crate::traits::{AnswerService, SnapshotDirectory, SnapshotSource};
use crate::types::SnapshotDescriptor;

/// Directory backed by a fixed snapshot list.
#[derive(Clone, Default)]
pub struct MockDirectory {
    snapshots: Vec<SnapshotDescriptor>,
    fail: bool,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a snapshot; the formatted timestamp mirrors the raw one.
    pub fn with_snapshot(mut self, timestamp: &str, url: &str) -> Self {
        self.snapshots
            .push(SnapshotDescriptor::new(timestamp, timestamp, url));
        self
    }

    /// Make `list_snapshots` fail.
    pub fn failing() -> Self {
        Self {
            snapshots: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl SnapshotDirectory for MockDirectory {
    async fn list_snapshots(&self, _url: &str) -> Result<Vec<SnapshotDescriptor>> {
        if self.fail {
            return Err(PipelineError::DirectoryFetch(Box::new(
                std::io::Error::other("simulated directory failure"),
            )));
        }
        Ok(self.snapshots.clone())
    }
}

/// Source serving canned HTML per timestamp, recording every fetch.
#[derive(Clone, Default)]
pub struct MockSource {
    pages: Arc<RwLock<Vec<(String, String)>>>,
    fail_timestamps: Arc<RwLock<HashSet<String>>>,
    robots_disallowed: Arc<RwLock<HashSet<String>>>,
    calls: Arc<RwLock<Vec<String>>>,
    default_html: String,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            default_html: "<html><body>mock page</body></html>".to_string(),
            ..Default::default()
        }
    }

    /// Serve `html` for fetches at `timestamp`.
    pub fn with_page(self, timestamp: &str, html: &str) -> Self {
        self.pages
            .write()
            .unwrap()
            .push((timestamp.to_string(), html.to_string()));
        self
    }

    /// Fail fetches at `timestamp` with a fetch error.
    pub fn fail_timestamp(self, timestamp: &str) -> Self {
        self.fail_timestamps
            .write()
            .unwrap()
            .insert(timestamp.to_string());
        self
    }

    /// Fail fetches at `timestamp` as robots-disallowed.
    pub fn robots_disallow(self, timestamp: &str) -> Self {
        self.robots_disallowed
            .write()
            .unwrap()
            .insert(timestamp.to_string());
        self
    }

    /// Timestamps fetched so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl SnapshotSource for MockSource {
    async fn fetch_html(&self, url: &str, timestamp: &str) -> Result<String> {
        self.calls.write().unwrap().push(timestamp.to_string());

        if self.robots_disallowed.read().unwrap().contains(timestamp) {
            return Err(PipelineError::RobotsDisallowed {
                url: format!("/web/{}/{}", timestamp, url),
            });
        }
        if self.fail_timestamps.read().unwrap().contains(timestamp) {
            return Err(PipelineError::SnapshotFetch {
                timestamp: timestamp.to_string(),
                source: Box::new(std::io::Error::other("simulated fetch failure")),
            });
        }

        let pages = self.pages.read().unwrap();
        let html = pages
            .iter()
            .find(|(ts, _)| ts == timestamp)
            .map(|(_, html)| html.clone())
            .unwrap_or_else(|| self.default_html.clone());
        Ok(html)
    }
}

/// Answer service with a scripted response queue.
///
/// Responses are consumed in order; once the queue is empty every call
/// answers `"mock answer"`. Records every prompt it receives.
#[derive(Clone, Default)]
pub struct MockAnswerer {
    responses: Arc<RwLock<VecDeque<Option<String>>>>,
    calls: Arc<RwLock<Vec<String>>>,
    fail_transport: bool,
}

impl MockAnswerer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful answer.
    pub fn with_answer(self, answer: &str) -> Self {
        self.responses
            .write()
            .unwrap()
            .push_back(Some(answer.to_string()));
        self
    }

    /// Queue a soft failure (non-success status, `Ok(None)`).
    pub fn with_soft_failure(self) -> Self {
        self.responses.write().unwrap().push_back(None);
        self
    }

    /// Make every call fail at the transport level.
    pub fn failing_transport() -> Self {
        Self {
            fail_transport: true,
            ..Default::default()
        }
    }

    /// Prompts received so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl AnswerService for MockAnswerer {
    async fn ask(&self, prompt: &str) -> Result<Option<String>> {
        self.calls.write().unwrap().push(prompt.to_string());

        if self.fail_transport {
            return Err(PipelineError::AnswerService(Box::new(
                std::io::Error::other("simulated transport failure"),
            )));
        }

        let scripted = self.responses.write().unwrap().pop_front();
        Ok(scripted.unwrap_or_else(|| Some("mock answer".to_string())))
    }
}
