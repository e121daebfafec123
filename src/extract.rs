//! Full-text extraction from article pages.
//!
//! Given a candidate URL, [`HtmlExtractor`] downloads the page and scrapes
//! the paragraph text out of it. Extraction is best-effort: pages that fail
//! to download, fail to parse into anything, or yield no paragraph text end
//! up as an error or an empty string, and the collection loop skips the
//! candidate either way.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Failure of one extraction attempt.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid article url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("article download failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Produce the plain-text body of the article behind a URL.
pub trait FullTextExtractor {
    async fn extract(&self, url: &str) -> Result<String, ExtractError>;
}

/// Extractor that scrapes paragraph text out of the article page HTML.
pub struct HtmlExtractor {
    client: reqwest::Client,
}

impl HtmlExtractor {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl FullTextExtractor for HtmlExtractor {
    #[instrument(level = "debug", skip(self), fields(%url))]
    async fn extract(&self, url: &str) -> Result<String, ExtractError> {
        let url = Url::parse(url)?;
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let text = text_from_html(&body);
        debug!(bytes = text.len(), "extracted article body");
        Ok(text)
    }
}

/// Collect the text of every paragraph element, one paragraph per line.
pub fn text_from_html(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut content = String::new();
    for element in document.select(&PARAGRAPH_SELECTOR) {
        let text = element.text().collect::<Vec<_>>().join(" ");
        if text.trim().is_empty() {
            continue;
        }
        content.push_str(text.trim());
        content.push('\n');
    }
    content.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_paragraph_text() {
        let html = r#"
            <html><body>
                <h1>Headline</h1>
                <p>First paragraph of the story.</p>
                <p>Second <em>paragraph</em> with markup.</p>
            </body></html>
        "#;

        let text = text_from_html(html);
        assert_eq!(
            text,
            "First paragraph of the story.\nSecond paragraph with markup."
        );
    }

    #[test]
    fn skips_empty_paragraphs() {
        let html = "<p>   </p><p>Real content.</p><p></p>";
        assert_eq!(text_from_html(html), "Real content.");
    }

    #[test]
    fn page_without_paragraphs_is_empty() {
        let html = "<html><body><div>navigation only</div></body></html>";
        assert_eq!(text_from_html(html), "");
    }

    #[tokio::test]
    async fn rejects_unparseable_url() {
        let extractor = HtmlExtractor::new(reqwest::Client::new());
        let err = extractor.extract("not a url").await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidUrl(_)));
    }
}
