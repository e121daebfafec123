//! JSON artifact writers.
//!
//! Serializes the accumulated [`ProcessedArticle`] list and the run's
//! [`FetchLog`] to pretty-printed UTF-8 JSON files. Parent directories are
//! created if absent. Errors propagate to the caller, where they are fatal:
//! the job must not end with one artifact silently missing.

use crate::models::{FetchLog, ProcessedArticle};
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write the results array artifact.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_results(
    results: &[ProcessedArticle],
    path: &str,
) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(results)?;
    write_artifact(&json, path).await
}

/// Write the fetch log artifact.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_fetch_log(log: &FetchLog, path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(log)?;
    write_artifact(&json, path).await
}

async fn write_artifact(json: &str, path: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = fs::create_dir_all(parent).await {
                error!(dir = %parent.display(), error = %e, "Failed to create output dir");
                return Err(e.into());
            }
        }
    }

    fs::write(path, json).await?;
    info!(%path, "Wrote JSON artifact");
    Ok(())
}
