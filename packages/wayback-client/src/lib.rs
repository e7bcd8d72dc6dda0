//! Pure Wayback Machine REST API client.
//!
//! A minimal client for the Internet Archive's Wayback Machine. Supports
//! listing every capture of a URL via the CDX index and fetching the
//! archived HTML of a specific capture.
//!
//! # Example
//!
//! ```rust,ignore
//! use wayback_client::WaybackClient;
//!
//! let client = WaybackClient::new();
//!
//! let snapshots = client.list_snapshots("https://example.com/pricing").await?;
//! for snapshot in &snapshots {
//!     let html = client
//!         .fetch_snapshot_html("https://example.com/pricing", &snapshot.timestamp)
//!         .await?;
//!     println!("{}: {} bytes", snapshot.timestamp_formatted, html.len());
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{Result, WaybackError};
pub use types::{format_timestamp, Snapshot, CDX_TIMESTAMP_FORMAT};

const BASE_URL: &str = "https://web.archive.org";

#[derive(Clone)]
pub struct WaybackClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for WaybackClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WaybackClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Set a custom archive base URL (for mirrors or test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// List every capture the CDX index knows for `url`, in index order
    /// (oldest first in practice, though the index does not guarantee it).
    pub async fn list_snapshots(&self, url: &str) -> Result<Vec<Snapshot>> {
        let endpoint = format!("{}/cdx/search/cdx?url={}", self.base_url, url);
        let resp = self.client.get(&endpoint).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WaybackError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let snapshots = parse_cdx_listing(&body);
        tracing::debug!(url, count = snapshots.len(), "Listed CDX snapshots");
        Ok(snapshots)
    }

    /// Fetch the archived HTML of one capture.
    ///
    /// Only the portion of `timestamp` before the first whitespace goes into
    /// the capture URL, so values carrying a formatted remainder stay usable.
    pub async fn fetch_snapshot_html(&self, url: &str, timestamp: &str) -> Result<String> {
        let date_part = timestamp.split_whitespace().next().unwrap_or(timestamp);
        let endpoint = format!("{}/web/{}/{}", self.base_url, date_part, url);
        tracing::debug!(endpoint = %endpoint, "Fetching capture");

        let resp = self.client.get(&endpoint).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WaybackError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.text().await?)
    }

    /// Fetch the archive host's robots.txt. `Ok(None)` when the host serves
    /// none (which callers should treat as allowing everything).
    pub async fn fetch_robots_txt(&self) -> Result<Option<String>> {
        let endpoint = format!("{}/robots.txt", self.base_url.trim_end_matches('/'));
        let resp = self.client.get(&endpoint).send().await?;

        if !resp.status().is_success() {
            return Ok(None);
        }
        Ok(Some(resp.text().await?))
    }
}

/// Parse the CDX index's line-oriented response. Field 2 (1-indexed) is the
/// capture timestamp, field 3 the original URL; short lines are dropped.
fn parse_cdx_listing(body: &str) -> Vec<Snapshot> {
    body.lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 3 {
                return None;
            }
            Some(Snapshot::from_cdx_fields(fields[1], fields[2]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cdx_listing() {
        let body = "\
com,example)/pricing 20230615120000 https://example.com/pricing text/html 200 ABC 1234
com,example)/pricing 20240101000000 https://example.com/pricing/ text/html 200 DEF 5678";

        let snapshots = parse_cdx_listing(body);

        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].timestamp, "20230615120000");
        assert_eq!(snapshots[0].timestamp_formatted, "Jun 15th, 2023 | 12:00 PM");
        assert_eq!(snapshots[0].original_url, "https://example.com/pricing");
        assert_eq!(snapshots[1].original_url, "https://example.com/pricing/");
    }

    #[test]
    fn test_parse_cdx_listing_skips_short_lines() {
        let body = "only-two fields\n\ncom,example)/ 20230615120000 https://example.com/ x 200 A 1";
        let snapshots = parse_cdx_listing(body);
        assert_eq!(snapshots.len(), 1);
    }

    #[test]
    fn test_parse_cdx_listing_malformed_timestamp_is_kept() {
        let body = "com,example)/ notatime https://example.com/ x 200 A 1";
        let snapshots = parse_cdx_listing(body);
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].timestamp_formatted, "notatime");
    }

    #[test]
    fn test_client_builder() {
        let client = WaybackClient::new().with_base_url("http://localhost:8080");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
