//! The collection loop: fetch candidates per category, filter by extracted
//! word count, summarize, and accumulate results until each category's
//! target is met or the fallback budget runs out.
//!
//! All three external collaborators sit behind traits so the loop can be
//! exercised against in-memory stubs. Failures of any collaborator are
//! consumed here: a failed fetch round counts as an empty page, a failed
//! extraction or summarization skips that one candidate. Nothing in this
//! module aborts the run.
//!
//! The fallback budget is deliberately shared across categories rather than
//! reset per category: once an earlier category has burned through it, a
//! later category gets exactly one fetch round before giving up.

use chrono::{Duration, NaiveDate, Utc};
use tracing::{debug, info, instrument, warn};

use crate::api::Summarizer;
use crate::config::{CategorySpec, RunConfig};
use crate::extract::FullTextExtractor;
use crate::models::{LogEntry, ProcessedArticle};
use crate::newsapi::ArticleSource;
use crate::utils::{truncate_for_log, word_count};

/// Literal prefix prepended to the article body before summarization.
pub const SUMMARY_PROMPT_PREFIX: &str = "Summarize the following news article: ";

/// Accumulated output of one run: results and log entries, paired in order.
#[derive(Debug, Default)]
pub struct RunOutput {
    pub results: Vec<ProcessedArticle>,
    pub logs: Vec<LogEntry>,
}

/// Accept an extracted body purely by its word count.
pub fn within_word_bounds(word_count: usize, min_words: usize, max_words: usize) -> bool {
    word_count >= min_words && word_count <= max_words
}

/// Drives the per-category collection loops over the three collaborators.
pub struct Collector<'a, S, X, M> {
    source: &'a S,
    extractor: &'a X,
    summarizer: &'a M,
    config: &'a RunConfig,
}

impl<'a, S, X, M> Collector<'a, S, X, M>
where
    S: ArticleSource,
    X: FullTextExtractor,
    M: Summarizer,
{
    pub fn new(source: &'a S, extractor: &'a X, summarizer: &'a M, config: &'a RunConfig) -> Self {
        Self {
            source,
            extractor,
            summarizer,
            config,
        }
    }

    /// Run every configured category in order against the fixed one-day
    /// window [yesterday, today] (UTC).
    #[instrument(level = "info", skip_all)]
    pub async fn run(&self) -> RunOutput {
        let to = Utc::now().date_naive();
        let from = to - Duration::days(1);

        let mut out = RunOutput::default();
        let mut fallback_attempts: u32 = 0;
        for category in &self.config.categories {
            self.collect_category(category, from, to, &mut fallback_attempts, &mut out)
                .await;
        }

        debug_assert_eq!(out.results.len(), out.logs.len());
        info!(count = out.results.len(), "processed articles");
        out
    }

    async fn collect_category(
        &self,
        category: &CategorySpec,
        from: NaiveDate,
        to: NaiveDate,
        fallback_attempts: &mut u32,
        out: &mut RunOutput,
    ) {
        let mut collected = 0usize;
        let mut attempts = 0u32;

        while collected < category.target_count && attempts <= self.config.max_fallbacks {
            let candidates = match self
                .source
                .search(&category.query, from, to, self.config.page_size)
                .await
            {
                Ok(candidates) => candidates,
                Err(e) => {
                    warn!(category = %category.name, error = %e, "fetch round failed; treating as empty");
                    Vec::new()
                }
            };
            info!(
                category = %category.name,
                count = candidates.len(),
                attempt = attempts + 1,
                "fetched candidates"
            );

            for candidate in &candidates {
                if collected >= category.target_count {
                    break;
                }
                let Some(url) = candidate.url.as_deref().filter(|u| !u.is_empty()) else {
                    continue;
                };

                let text = match self.extractor.extract(url).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(%url, error = %e, "failed to extract article; skipping");
                        continue;
                    }
                };
                let words = word_count(&text);
                if text.is_empty() || !within_word_bounds(words, self.config.min_words, self.config.max_words) {
                    debug!(%url, words, "article body outside word bounds; skipping");
                    continue;
                }

                let prompt = format!("{SUMMARY_PROMPT_PREFIX}{text}");
                let summary = match self.summarizer.summarize(&prompt).await {
                    Ok(summary) => summary,
                    Err(e) => {
                        warn!(%url, error = %e, "failed to summarize article; skipping");
                        continue;
                    }
                };
                debug!(%url, preview = %truncate_for_log(&summary, 120), "summarized article");

                out.results.push(ProcessedArticle {
                    title: candidate.title.clone(),
                    source: candidate
                        .source
                        .as_ref()
                        .and_then(|source| source.name.clone()),
                    published_at: candidate.published_at.clone(),
                    url: url.to_string(),
                    summary: summary.clone(),
                });
                out.logs.push(LogEntry {
                    title: candidate.title.clone(),
                    url: url.to_string(),
                    word_count: words,
                    summary_length: word_count(&summary),
                    category: category.name.clone(),
                });
                collected += 1;
            }

            attempts += 1;
            if collected < category.target_count {
                *fallback_attempts += 1;
                if *fallback_attempts > self.config.max_fallbacks {
                    warn!(category = %category.name, "max fallback attempts reached");
                    break;
                }
            }
        }

        info!(category = %category.name, collected, attempts, "category complete");
    }
}
