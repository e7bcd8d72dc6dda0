//! Archived-Snapshot Question Answering Library
//!
//! Walks the historical captures of a URL in a web archive, extracts
//! readable text from each capture's HTML, asks a language model a fixed
//! question about that text, and persists the results in an idempotent JSON
//! ledger keyed by snapshot identity.
//!
//! # Design Philosophy
//!
//! - Idempotent: a snapshot already in the ledger is never refetched or
//!   re-asked; reruns only pick up new captures
//! - Checkpointed: the ledger is saved after every snapshot, so an
//!   interrupted run loses at most the snapshot in flight
//! - Soft-failing per snapshot: one capture's fetch failure records a null
//!   entry and the pass continues; only listing and ledger I/O abort a run
//!
//! # Usage
//!
//! ```rust,ignore
//! use snapshot_qa::{PipelineConfig, SnapshotPipeline};
//! use snapshot_qa::clients::{CompletionAnswerer, WaybackSnapshots};
//! use snapshot_qa::stores::JsonLedgerStore;
//!
//! let archive = WaybackSnapshots::new(wayback_client::WaybackClient::new());
//! let answerer = CompletionAnswerer::new(completion_client::CompletionClient::from_env()?, "gpt-3.5-turbo");
//! let store = JsonLedgerStore::new("data.json");
//!
//! let config = PipelineConfig::new("https://example.com/pricing", "What does the basic plan cost?");
//! let pipeline = SnapshotPipeline::new(archive.clone(), archive, answerer, store, config);
//! let summary = pipeline.run().await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (directory, source, answerer, store)
//! - [`types`] - Snapshot identity, records, and the ledger
//! - [`pipeline`] - The orchestrated snapshot pass
//! - [`clients`] - Adapters over the archive and completion REST clients
//! - [`stores`] - Ledger storage (JSON file, in-memory)
//! - [`extract`] - Readable-text extraction from archived HTML
//! - [`robots`] - Optional robots.txt policy for capture fetches
//! - [`diff`] - Change detection between consecutive snapshots
//! - [`testing`] - Mock implementations for tests

pub mod clients;
pub mod config;
pub mod diff;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod prompt;
pub mod robots;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use pipeline::{RunSummary, SnapshotPipeline};
pub use traits::{AnswerService, LedgerStore, SnapshotDirectory, SnapshotSource};
pub use types::{SnapshotDescriptor, SnapshotKey, SnapshotLedger, SnapshotRecord};
