//! Helper functions for word counting, log formatting, and file system checks.

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Count whitespace-delimited tokens. This is the only definition of "word
/// count" in the job: both the acceptance filter and the logged summary
/// length use it.
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at a character boundary after `max` characters, with
/// an ellipsis and byte count indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((idx, _)) => format!("{}…(+{} bytes)", &s[..idx], s.len() - idx),
    }
}

/// Ensure the parent directory of an artifact path exists and is writable.
///
/// Creates the directory if absent, then performs a write test by creating
/// and immediately deleting a probe file. Run at startup so a doomed run
/// fails before any network work happens.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_parent(path: &str) -> Result<(), Box<dyn Error>> {
    let parent = match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => return Ok(()),
    };

    if let Err(e) = fs::create_dir_all(&parent).await {
        return Err(Box::new(e));
    }
    // Small sync write using std fs (simpler error surface)
    let probe_path = parent.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
