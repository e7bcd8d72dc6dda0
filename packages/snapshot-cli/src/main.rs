//! Snapshot QA CLI
//!
//! Walks the Wayback Machine captures of a URL, asks a fixed question about
//! each capture's text, and checkpoints the results into a JSON ledger.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use completion_client::CompletionClient;
use snapshot_qa::clients::{CompletionAnswerer, WaybackSnapshots};
use snapshot_qa::robots::RobotsPolicy;
use snapshot_qa::stores::JsonLedgerStore;
use snapshot_qa::{PipelineConfig, SnapshotPipeline};
use wayback_client::WaybackClient;

#[derive(Parser)]
#[command(name = "snapqa", about = "Question-answering over archived snapshots of a URL")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty ledger file. Refuses to overwrite an existing one.
    Init {
        /// Path of the ledger file to create
        #[arg(long, default_value = "data.json")]
        ledger: PathBuf,
    },

    /// Run one pass over the URL's archived snapshots.
    Run {
        /// Page whose archived captures are processed
        #[arg(long)]
        url: String,

        /// Question asked about every snapshot
        #[arg(long)]
        question: String,

        /// Path of the ledger file (must already exist; see `init`)
        #[arg(long, default_value = "data.json")]
        ledger: PathBuf,

        /// Maximum number of newly processed snapshots this run
        #[arg(long)]
        limit: Option<usize>,

        /// Chat-completions model
        #[arg(long, default_value = completion_client::DEFAULT_MODEL)]
        model: String,

        /// Override the archive base URL (testing)
        #[arg(long)]
        archive_base: Option<String>,

        /// Override the completions base URL (testing)
        #[arg(long)]
        completion_base: Option<String>,

        /// Honor the archive's robots.txt for this user agent before each
        /// capture fetch (off by default)
        #[arg(long)]
        robots_user_agent: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,snapshot_qa=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Init { ledger } => {
            let store = JsonLedgerStore::init(&ledger)
                .await
                .with_context(|| format!("failed to create ledger at {}", ledger.display()))?;
            tracing::info!(path = %store.path().display(), "Created empty ledger");
        }
        Commands::Run {
            url,
            question,
            ledger,
            limit,
            model,
            archive_base,
            completion_base,
            robots_user_agent,
        } => {
            let mut wayback = WaybackClient::new();
            if let Some(base) = archive_base {
                wayback = wayback.with_base_url(base);
            }

            let mut completion =
                CompletionClient::from_env().context("OPENAI_API_KEY must be set")?;
            if let Some(base) = completion_base {
                completion = completion.with_base_url(base);
            }

            let mut archive = WaybackSnapshots::new(wayback);
            if let Some(agent) = robots_user_agent {
                archive = archive.with_robots_policy(RobotsPolicy::enforced(agent));
            }

            let mut config = PipelineConfig::new(url, question);
            if let Some(limit) = limit {
                config = config.with_limit(limit);
            }

            let store = JsonLedgerStore::new(&ledger);
            let pipeline = SnapshotPipeline::new(
                archive.clone(),
                archive,
                CompletionAnswerer::new(completion, model),
                store,
                config,
            );

            let summary = pipeline
                .run()
                .await
                .context("snapshot pass failed")?;
            tracing::info!(
                listed = summary.listed,
                skipped = summary.skipped,
                processed = summary.processed,
                failed = summary.failed,
                "Done"
            );
        }
    }

    Ok(())
}
