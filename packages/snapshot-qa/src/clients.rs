//! Adapters binding the REST client crates to the pipeline's trait seams.

use async_trait::async_trait;
use tracing::warn;

use completion_client::{ChatRequest, CompletionClient, CompletionError, Message};
use wayback_client::WaybackClient;

use crate::error::{PipelineError, Result};
use crate::robots::{RobotsPolicy, RobotsRules};
use crate::traits::{AnswerService, SnapshotDirectory, SnapshotSource};
use crate::types::SnapshotDescriptor;

/// Wayback Machine directory and capture source, with an optional robots
/// policy applied before each capture fetch.
#[derive(Clone)]
pub struct WaybackSnapshots {
    client: WaybackClient,
    robots: RobotsPolicy,
}

impl WaybackSnapshots {
    pub fn new(client: WaybackClient) -> Self {
        Self {
            client,
            robots: RobotsPolicy::Disabled,
        }
    }

    /// Enable or disable the robots.txt pre-check (disabled by default).
    pub fn with_robots_policy(mut self, policy: RobotsPolicy) -> Self {
        self.robots = policy;
        self
    }

    async fn check_robots(&self, capture_path: &str, timestamp: &str) -> Result<()> {
        let RobotsPolicy::Enforced { user_agent } = &self.robots else {
            return Ok(());
        };

        let body = self
            .client
            .fetch_robots_txt()
            .await
            .map_err(|e| PipelineError::SnapshotFetch {
                timestamp: timestamp.to_string(),
                source: Box::new(e),
            })?;

        // A host without robots.txt allows everything.
        let Some(body) = body else { return Ok(()) };

        let rules = RobotsRules::parse(&body);
        if !rules.is_allowed(user_agent, capture_path) {
            return Err(PipelineError::RobotsDisallowed {
                url: capture_path.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SnapshotDirectory for WaybackSnapshots {
    async fn list_snapshots(&self, url: &str) -> Result<Vec<SnapshotDescriptor>> {
        let snapshots = self
            .client
            .list_snapshots(url)
            .await
            .map_err(|e| PipelineError::DirectoryFetch(Box::new(e)))?;

        Ok(snapshots
            .into_iter()
            .map(|s| SnapshotDescriptor::new(s.timestamp, s.timestamp_formatted, s.original_url))
            .collect())
    }
}

#[async_trait]
impl SnapshotSource for WaybackSnapshots {
    async fn fetch_html(&self, url: &str, timestamp: &str) -> Result<String> {
        let date_part = timestamp.split_whitespace().next().unwrap_or(timestamp);
        let capture_path = format!("/web/{}/{}", date_part, url);
        self.check_robots(&capture_path, timestamp).await?;

        self.client
            .fetch_snapshot_html(url, timestamp)
            .await
            .map_err(|e| PipelineError::SnapshotFetch {
                timestamp: timestamp.to_string(),
                source: Box::new(e),
            })
    }
}

/// Chat-completions answerer carrying the pipeline's soft-failure contract:
/// a non-success API status becomes `Ok(None)`, never an error.
#[derive(Clone)]
pub struct CompletionAnswerer {
    client: CompletionClient,
    model: String,
}

impl CompletionAnswerer {
    pub fn new(client: CompletionClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl AnswerService for CompletionAnswerer {
    async fn ask(&self, prompt: &str) -> Result<Option<String>> {
        let request = ChatRequest::new(&self.model).message(Message::user(prompt));

        match self.client.chat_completion(request).await {
            Ok(response) => Ok(Some(response.content)),
            Err(CompletionError::Api { status, message }) => {
                warn!(status, message = %message, "Answer service returned non-success; storing null answer");
                Ok(None)
            }
            Err(e) => Err(PipelineError::AnswerService(Box::new(e))),
        }
    }
}
