//! Command-line interface definitions for the news digest job.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Credentials and endpoints can be provided via flags or environment
//! variables. The NewsAPI key is required: a run without it fails at startup,
//! before any work begins.

use clap::Parser;

/// Command-line arguments for the news digest job.
///
/// # Examples
///
/// ```sh
/// # Basic usage with the key in the environment
/// NEWS_API=... news_digest
///
/// # Custom artifact locations and a run-config override
/// news_digest -r ./out/summaries.json -l ./out/fetch_log.json -c run.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output path for the summaries JSON artifact
    #[arg(short = 'r', long, default_value = "app/summaries.json")]
    pub results_path: String,

    /// Output path for the fetch log JSON artifact
    #[arg(short = 'l', long, default_value = "backend/fetch_log.json")]
    pub log_path: String,

    /// Optional path to a YAML run configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// NewsAPI key used for article search
    #[arg(long, env = "NEWS_API")]
    pub news_api_key: String,

    /// Base URL of the OpenAI-compatible summarization endpoint
    #[arg(long, env = "SUMMARIZER_BASE_URL", default_value = "http://localhost:8080/v1")]
    pub summarizer_base_url: String,

    /// Model name requested from the summarization endpoint
    #[arg(long, env = "SUMMARIZER_MODEL", default_value = "qwen2.5-7b-instruct")]
    pub summarizer_model: String,

    /// API key for the summarization endpoint, if it requires one
    #[arg(long, env = "SUMMARIZER_API_KEY")]
    pub summarizer_api_key: Option<String>,
}
