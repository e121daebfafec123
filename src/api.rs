//! Summarization API client with exponential backoff retry logic.
//!
//! The summarizer is an OpenAI-compatible chat-completions endpoint. This
//! module keeps the call site trait-based:
//! - [`Summarizer`]: the seam the collection loop depends on
//! - [`ChatClient`]: one-shot HTTP client for the endpoint
//! - [`Retry`]: decorator adding retry logic to any `Summarizer`
//!
//! # Retry strategy
//!
//! - Maximum 5 retry attempts
//! - Exponential backoff starting at 1 second
//! - Maximum delay capped at 30 seconds
//! - Random jitter (0-250ms) added to prevent thundering herd
//!
//! A request that still fails after the retries surfaces as one
//! [`SummarizeError`]; the loop then skips the article.

use rand::{Rng, rng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{error, instrument, warn};

/// Failure of one summarization request.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("summarization request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed summarizer response: {0}")]
    Malformed(&'static str),
}

/// Turn a prompt into a natural-language summary.
pub trait Summarizer {
    async fn summarize(&self, prompt: &str) -> Result<String, SummarizeError>;
}

/// Decorator that adds exponential backoff retry logic to any [`Summarizer`].
///
/// The delay between retries follows:
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct Retry<T> {
    inner: T,
    max_retries: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> Retry<T>
where
    T: Summarizer,
{
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }
}

impl<T> fmt::Debug for Retry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Retry")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> Summarizer for Retry<T>
where
    T: Summarizer,
{
    #[instrument(level = "info", skip_all)]
    async fn summarize(&self, prompt: &str) -> Result<String, SummarizeError> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            match self.inner.summarize(prompt).await {
                Ok(summary) => {
                    return Ok(summary);
                }
                Err(e) => {
                    attempt += 1;

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_total = total_t0.elapsed().as_millis() as u128,
                            error = %e,
                            "summarize() exhausted retries"
                        );
                        return Err(e);
                    }

                    // backoff calc
                    let mut delay = self.base_delay.saturating_mul(1 << (attempt - 1));
                    if delay > self.max_delay {
                        delay = self.max_delay;
                    }
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        ?delay,
                        error = %e,
                        "summarize() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl ChatResponse {
    fn into_content(self) -> Result<String, SummarizeError> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(SummarizeError::Malformed("response carried no choices"))
    }
}

/// One-shot client for an OpenAI-compatible chat-completions endpoint.
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl ChatClient {
    pub fn new(
        client: reqwest::Client,
        base_url: String,
        model: String,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url,
            model,
            api_key,
        }
    }
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl Summarizer for ChatClient {
    #[instrument(level = "info", skip_all)]
    async fn summarize(&self, prompt: &str) -> Result<String, SummarizeError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let mut builder = self.client.post(&url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response: ChatResponse = builder
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        response.into_content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Fails the first `failures` calls, then succeeds.
    struct Flaky {
        failures: usize,
        calls: Cell<usize>,
    }

    impl Summarizer for Flaky {
        async fn summarize(&self, _prompt: &str) -> Result<String, SummarizeError> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if call <= self.failures {
                Err(SummarizeError::Malformed("response carried no choices"))
            } else {
                Ok("a short summary".to_string())
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn retry_recovers_from_transient_failures() {
        let retry = Retry::new(
            Flaky {
                failures: 2,
                calls: Cell::new(0),
            },
            5,
            StdDuration::from_secs(1),
        );

        let summary = retry.summarize("prompt").await.unwrap();
        assert_eq!(summary, "a short summary");
        assert_eq!(retry.inner.calls.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_gives_up_after_budget() {
        let retry = Retry::new(
            Flaky {
                failures: usize::MAX,
                calls: Cell::new(0),
            },
            2,
            StdDuration::from_secs(1),
        );

        let err = retry.summarize("prompt").await.unwrap_err();
        assert!(matches!(err, SummarizeError::Malformed(_)));
        // initial attempt plus two retries
        assert_eq!(retry.inner.calls.get(), 3);
    }

    #[test]
    fn chat_response_extracts_first_choice() {
        let response: ChatResponse = serde_json::from_str(
            r#"{
                "id": "chatcmpl-1",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "The gist."},
                     "finish_reason": "stop"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(response.into_content().unwrap(), "The gist.");
    }

    #[test]
    fn chat_response_without_choices_is_malformed() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            response.into_content(),
            Err(SummarizeError::Malformed(_))
        ));
    }
}
