#![allow(missing_docs)]

//! marvin-suggest — draft Marvin tasks from scraped page metadata.
//!
//! Reads the metadata JSON a content scraper produced, classifies the
//! page, and prints a task suggestion. The `ai-suggest` subcommand
//! additionally asks the configured AI provider for a refined
//! suggestion, with a bounded wait and a TTL cache.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::warn;

use marvin_suggest::ai::cache::{FileCacheStore, SuggestionCache, SystemClock};
use marvin_suggest::ai::SuggestionClient;
use marvin_suggest::config::Config;
use marvin_suggest::context::{build_task_context, TaskContext};
use marvin_suggest::labels::{suggest_labels, Label};
use marvin_suggest::logging;
use marvin_suggest::platform::Platform;

/// The provider call gets this long before its result is discarded.
/// The in-flight request is not aborted; a late reply may still land
/// in the cache.
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

/// `suggest` output: the task context plus the labels matched for it.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestOutput {
    #[serde(flatten)]
    context: TaskContext,
    suggested_labels: Vec<Label>,
}

#[derive(Debug, Parser)]
#[command(name = "marvin-suggest", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the platform a URL belongs to.
    Platform {
        /// Page URL.
        url: String,
    },
    /// Build the template-based task suggestion (no network).
    Suggest {
        /// Page URL the metadata was scraped from.
        #[arg(long)]
        url: String,
        /// Scraped metadata JSON file; stdin when omitted.
        #[arg(long)]
        metadata: Option<PathBuf>,
        /// User labels JSON file (array of `{_id, title, color}`).
        #[arg(long)]
        labels: Option<PathBuf>,
    },
    /// Ask the configured AI provider for a refined suggestion.
    AiSuggest {
        /// Page URL the metadata was scraped from.
        #[arg(long)]
        url: String,
        /// Scraped metadata JSON file; stdin when omitted.
        #[arg(long)]
        metadata: Option<PathBuf>,
        /// User labels JSON file (array of `{_id, title, color}`).
        #[arg(long)]
        labels: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse();
    let config = Config::load().context("failed to load configuration")?;

    match cli.command {
        Command::Platform { url } => {
            println!("{}", Platform::detect(&url));
        }
        Command::Suggest {
            url,
            metadata,
            labels,
        } => {
            let raw = read_metadata(metadata.as_deref())?;
            let labels = read_labels(labels.as_deref())?;
            let context = build_task_context(&url, raw, &config.user_prefs());
            let suggested_labels = suggest_labels(&labels, &context.label_keywords);
            let output = SuggestOutput {
                context,
                suggested_labels,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::AiSuggest {
            url,
            metadata,
            labels,
        } => {
            let raw = read_metadata(metadata.as_deref())?;
            let labels = read_labels(labels.as_deref())?;
            let ctx = build_task_context(&url, raw, &config.user_prefs());

            let cache = SuggestionCache::new(
                Box::new(FileCacheStore::default_location()?),
                Box::new(SystemClock),
                config.ai.cache_ttl_ms,
            );
            let client = SuggestionClient::from_settings(config.ai.clone(), cache);

            let suggestion =
                match tokio::time::timeout(PROVIDER_TIMEOUT, client.suggest(&ctx, &labels)).await {
                    Ok(suggestion) => suggestion,
                    Err(_) => {
                        warn!(
                            timeout_secs = PROVIDER_TIMEOUT.as_secs(),
                            "ai provider call timed out"
                        );
                        None
                    }
                };
            println!("{}", serde_json::to_string_pretty(&suggestion)?);
        }
    }

    Ok(())
}

/// Read scraped metadata from a file or stdin; empty input means no
/// metadata, which classifies with platform defaults.
fn read_metadata(path: Option<&Path>) -> Result<Value> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read metadata file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read metadata from stdin")?;
            buf
        }
    };
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).context("metadata is not valid JSON")
}

/// Read user labels from a file; no file means no labels.
fn read_labels(path: Option<&Path>) -> Result<Vec<Label>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read labels file {}", path.display()))?;
    serde_json::from_str(&text).context("labels file is not a valid JSON label array")
}
