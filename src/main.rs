//! # News Digest
//!
//! A single-pass batch job that fetches recent news articles for two topical
//! buckets, filters them by extracted body length, summarizes each qualifying
//! article through an OpenAI-compatible LLM endpoint, and writes a JSON
//! results artifact plus a JSON processing log.
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API=... news_digest -r app/summaries.json -l backend/fetch_log.json
//! ```
//!
//! ## Architecture
//!
//! 1. **Search**: query the news-search API per category over a fixed
//!    one-day window
//! 2. **Extract**: download each candidate and scrape its paragraph text
//! 3. **Summarize**: send qualifying bodies to the summarization endpoint
//! 4. **Output**: write the results array and the fetch log
//!
//! Execution is fully sequential: one fetch round, then one article at a
//! time. The only cross-cutting state is the fallback budget shared across
//! category loops.

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod collect;
mod config;
mod extract;
mod models;
mod newsapi;
mod outputs;
mod utils;

use api::{ChatClient, Retry};
use cli::Cli;
use collect::Collector;
use extract::HtmlExtractor;
use models::FetchLog;
use newsapi::NewsApiSource;
use utils::ensure_writable_parent;

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_digest starting up");

    // Parse CLI; a missing NEWS_API credential fails here, before any work
    let args = Cli::parse();
    debug!(?args.results_path, ?args.log_path, "Parsed CLI arguments");

    let run_config = config::load(args.config.as_deref())?;
    info!(
        categories = run_config.categories.len(),
        page_size = run_config.page_size,
        max_fallbacks = run_config.max_fallbacks,
        "Loaded run configuration"
    );

    // Early check: both artifact destinations must be writable
    ensure_writable_parent(&args.results_path).await?;
    ensure_writable_parent(&args.log_path).await?;

    let http = reqwest::Client::new();
    let source = NewsApiSource::new(http.clone(), args.news_api_key.clone());
    let extractor = HtmlExtractor::new(http.clone());
    let summarizer = Retry::new(
        ChatClient::new(
            http,
            args.summarizer_base_url.clone(),
            args.summarizer_model.clone(),
            args.summarizer_api_key.clone(),
        ),
        5,
        Duration::from_secs(1),
    );

    let collector = Collector::new(&source, &extractor, &summarizer, &run_config);
    let output = collector.run().await;
    info!(count = output.results.len(), "Successfully processed articles");

    let log = FetchLog {
        timestamp: Utc::now().to_rfc3339(),
        article_count: output.results.len(),
        logs: output.logs,
    };

    outputs::json::write_results(&output.results, &args.results_path).await?;
    outputs::json::write_fetch_log(&log, &args.log_path).await?;
    info!(
        results = %args.results_path,
        log = %args.log_path,
        "Results saved"
    );

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
