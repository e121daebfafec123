//! Run configuration: categories, queries, targets, and filter limits.
//!
//! Defaults reproduce the standing digest job (30 international articles,
//! 20 India-focused ones, page size 50, 150–2500 word bounds, 10 fallback
//! rounds). An optional YAML file can override any subset of fields.

use serde::Deserialize;
use thiserror::Error;

/// One topical bucket to collect articles for.
#[derive(Debug, Clone, Deserialize)]
pub struct CategorySpec {
    /// Category label recorded in log entries.
    pub name: String,
    /// Search query sent to the article source.
    pub query: String,
    /// Number of qualifying articles to aim for.
    pub target_count: usize,
}

/// Full configuration for one run of the digest job.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Categories processed in order. The fallback budget is shared across
    /// all of them.
    pub categories: Vec<CategorySpec>,
    /// Page size requested from the article source per fetch round.
    pub page_size: u32,
    /// Minimum accepted article body length, in whitespace-delimited words.
    pub min_words: usize,
    /// Maximum accepted article body length, in whitespace-delimited words.
    pub max_words: usize,
    /// Shared budget of short fetch rounds before categories stop retrying.
    pub max_fallbacks: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            categories: vec![
                CategorySpec {
                    name: "international".to_string(),
                    query: "technology OR politics OR world -India".to_string(),
                    target_count: 30,
                },
                CategorySpec {
                    name: "india".to_string(),
                    query: "India AND (technology OR politics OR world)".to_string(),
                    target_count: 20,
                },
            ],
            page_size: 50,
            min_words: 150,
            max_words: 2500,
            max_fallbacks: 10,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load the run configuration, applying the YAML file at `path` over the
/// defaults when one is given.
pub fn load(path: Option<&str>) -> Result<RunConfig, ConfigError> {
    match path {
        None => Ok(RunConfig::default()),
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            Ok(serde_yaml::from_str(&raw)?)
        }
    }
}
