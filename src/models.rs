//! Data models for article candidates and their processed representations.
//!
//! This module defines the structures flowing through the job:
//! - [`ArticleCandidate`]: raw search-result metadata from the article source
//! - [`ProcessedArticle`]: a summarized article destined for the results file
//! - [`LogEntry`] / [`FetchLog`]: the processing log written alongside results
//!
//! Serialized field names follow the JSON artifacts consumed downstream
//! (`publishedAt`, `word_count`, `summary_length`), hence the serde renames.

use serde::{Deserialize, Serialize};

/// A candidate article as returned by the article source.
///
/// Every field except the URL is tolerated missing; candidates without a URL
/// are discarded by the collection loop before any extraction happens.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleCandidate {
    /// Headline as reported by the search API.
    pub title: Option<String>,
    /// Publishing outlet, nested the way the search API returns it.
    pub source: Option<CandidateSource>,
    /// Publication timestamp string, passed through verbatim.
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    /// Link to the article page. Required downstream.
    pub url: Option<String>,
}

/// Outlet metadata nested inside a candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateSource {
    pub name: Option<String>,
}

/// A summarized article, created only after the candidate passed the
/// word-count filter and summarization succeeded. Append-only: once pushed
/// onto the results list it is never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedArticle {
    pub title: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub url: String,
    pub summary: String,
}

/// One log record per processed article, emitted in the same order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub title: Option<String>,
    pub url: String,
    /// Whitespace-token count of the extracted article body.
    pub word_count: usize,
    /// Whitespace-token count of the produced summary.
    pub summary_length: usize,
    pub category: String,
}

/// Root object of the log artifact.
#[derive(Debug, Serialize, Deserialize)]
pub struct FetchLog {
    /// RFC 3339 UTC timestamp of the run.
    pub timestamp: String,
    /// Total number of processed articles across all categories.
    pub article_count: usize,
    pub logs: Vec<LogEntry>,
}
