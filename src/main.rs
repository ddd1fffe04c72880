//! Research Memory - replay tool
//!
//! Inspect what the novelty engine extracts from a report, or replay a
//! sequence of reports for a topic against a fresh in-memory history.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use research_memory::content::{
    extract_key_findings_with, extract_source_urls, generate_content_hash,
};
use research_memory::memory::InMemoryMemoryStore;
use research_memory::notifications::LoggingNotificationSink;
use research_memory::{Config, MemoryProcessor};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "novelty")]
#[command(about = "Novelty detection for research reports")]
struct Cli {
    /// Path to config.yaml (defaults to ./config.yaml)
    #[arg(long, global = true, env = "NOVELTY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the findings, source URLs and content hash of a report
    Extract {
        /// Report file (HTML or plain text)
        path: PathBuf,
    },

    /// Process reports in order for one topic and print each outcome
    Replay {
        /// Topic the reports belong to
        #[arg(short, long)]
        topic: String,

        /// User to notify (defaults to the configured anonymous user)
        #[arg(short, long)]
        user: Option<String>,

        /// Report files, processed in the given order
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,research_memory=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(path) => Config::from_yaml_and_env(Some(path))?,
        None => Config::from_env()?,
    };

    match cli.command {
        Commands::Extract { path } => {
            let raw = read_report(&path)?;
            let findings = extract_key_findings_with(&raw, &config.novelty.finding_bounds());
            let output = json!({
                "content_hash": generate_content_hash(&findings),
                "key_findings": findings,
                "source_urls": extract_source_urls(&raw),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Replay { topic, user, paths } => {
            let processor = MemoryProcessor::with_config(
                Arc::new(InMemoryMemoryStore::new()),
                Arc::new(LoggingNotificationSink),
                config.novelty,
            );

            for path in &paths {
                let raw = read_report(path)?;
                let report_id = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());

                let outcome = processor
                    .process(&topic, &report_id, &raw, user.as_deref())
                    .await?;
                println!("{}", serde_json::to_string(&outcome)?);
            }
        }
    }

    Ok(())
}

fn read_report(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
