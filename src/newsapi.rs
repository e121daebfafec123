//! Article source backed by the NewsAPI `everything` search endpoint.
//!
//! The [`ArticleSource`] trait is the seam the collection loop depends on;
//! [`NewsApiSource`] is the production implementation. Requests are pinned to
//! English-language results sorted by relevancy, matching the standing job.
//! The caller treats any [`SourceError`] as an empty fetch round, so this
//! module only has to classify failures, not recover from them.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::ArticleCandidate;

const NEWSAPI_BASE_URL: &str = "https://newsapi.org/v2";

/// Failure of one search request.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("news search request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("news search rejected: {message}")]
    Api { message: String },
}

/// Search for candidate articles matching a query within a date range.
pub trait ArticleSource {
    async fn search(
        &self,
        query: &str,
        from: NaiveDate,
        to: NaiveDate,
        page_size: u32,
    ) -> Result<Vec<ArticleCandidate>, SourceError>;
}

/// NewsAPI client. The API key is read once at startup and held for the
/// run's duration.
pub struct NewsApiSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NewsApiSource {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self {
            client,
            base_url: NEWSAPI_BASE_URL.to_string(),
            api_key,
        }
    }
}

/// Response envelope of the `everything` endpoint.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    status: String,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<ArticleCandidate>,
}

impl SearchResponse {
    fn into_candidates(self) -> Result<Vec<ArticleCandidate>, SourceError> {
        if self.status == "ok" {
            Ok(self.articles)
        } else {
            Err(SourceError::Api {
                message: self
                    .message
                    .unwrap_or_else(|| format!("status {}", self.status)),
            })
        }
    }
}

impl ArticleSource for NewsApiSource {
    #[instrument(level = "debug", skip(self), fields(%query))]
    async fn search(
        &self,
        query: &str,
        from: NaiveDate,
        to: NaiveDate,
        page_size: u32,
    ) -> Result<Vec<ArticleCandidate>, SourceError> {
        let url = format!("{}/everything", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("q", query.to_string()),
                ("from", from.to_string()),
                ("to", to.to_string()),
                ("language", "en".to_string()),
                ("sortBy", "relevancy".to_string()),
                ("pageSize", page_size.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let envelope: SearchResponse = response.json().await?;
        let candidates = envelope.into_candidates()?;
        debug!(count = candidates.len(), "search returned candidates");
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_ok_yields_candidates() {
        let envelope: SearchResponse = serde_json::from_str(
            r#"{
                "status": "ok",
                "totalResults": 2,
                "articles": [
                    {"source": {"id": null, "name": "Example Times"},
                     "title": "First", "url": "https://example.com/1",
                     "publishedAt": "2025-05-06T09:00:00Z"},
                    {"source": null, "title": null, "url": null, "publishedAt": null}
                ]
            }"#,
        )
        .unwrap();

        let candidates = envelope.into_candidates().unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].url.as_deref(), Some("https://example.com/1"));
        assert!(candidates[1].url.is_none());
    }

    #[test]
    fn envelope_error_is_rejected() {
        let envelope: SearchResponse = serde_json::from_str(
            r#"{"status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid"}"#,
        )
        .unwrap();

        let err = envelope.into_candidates().unwrap_err();
        assert!(matches!(err, SourceError::Api { .. }));
        assert!(err.to_string().contains("invalid"));
    }

    #[test]
    fn envelope_error_without_message_reports_status() {
        let envelope: SearchResponse =
            serde_json::from_str(r#"{"status": "error"}"#).unwrap();
        let err = envelope.into_candidates().unwrap_err();
        assert!(err.to_string().contains("status error"));
    }
}
