//! HTTP-based single-site fetcher.
//!
//! Fetches one page, extracts readable text and keeps the chunks most
//! relevant to what the user asked about it.

use async_trait::async_trait;
use tracing::{debug, info, warn};
use url::Url;

use crate::client::build_client;
use crate::error::{FetchError, FetchResult};
use crate::text::{chunk_text, collapse_whitespace, html_title, html_to_text, rank_chunks};
use crate::traits::fetcher::PageFetcher;
use crate::types::config::ContextConfig;
use crate::types::result::RawResult;

/// How a response body is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Html,
    PlainText,
}

/// HTTP fetcher for single-site mode.
///
/// # Example
///
/// ```rust,ignore
/// use web_context::{ContextConfig, HttpFetcher, PageFetcher};
///
/// let fetcher = HttpFetcher::new(&ContextConfig::default())?;
/// let chunks = fetcher
///     .fetch_and_extract("https://blog.rust-lang.org/", "latest release")
///     .await?;
/// ```
pub struct HttpFetcher {
    client: reqwest::Client,
    chunk_size: usize,
    chunk_overlap: usize,
    max_chunks: usize,
    max_page_chars: usize,
}

impl HttpFetcher {
    /// Create a fetcher using the config's timeout, user agent and chunking.
    pub fn new(config: &ContextConfig) -> FetchResult<Self> {
        let client = build_client(config).map_err(|e| FetchError::Http {
            url: String::new(),
            source: Box::new(e),
        })?;
        Ok(Self::with_client(client, config))
    }

    /// Use a caller-provided client (shared pools, custom TLS).
    pub fn with_client(client: reqwest::Client, config: &ContextConfig) -> Self {
        Self {
            client,
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
            max_chunks: config.max_chunks.max(1),
            max_page_chars: config.max_page_chars,
        }
    }

    /// Turn a fetched body into ranked chunk results for `url`.
    fn extract(
        &self,
        url: &str,
        body: &str,
        kind: BodyKind,
        residual_query: &str,
    ) -> FetchResult<Vec<RawResult>> {
        let (title, text) = match kind {
            BodyKind::Html => (html_title(body), html_to_text(body, self.max_page_chars)),
            BodyKind::PlainText => {
                let text: String = collapse_whitespace(body)
                    .chars()
                    .take(self.max_page_chars)
                    .collect();
                (None, text)
            }
        };

        if text.trim().is_empty() {
            return Err(FetchError::EmptyContent {
                url: url.to_string(),
            });
        }

        let chunks = chunk_text(&text, self.chunk_size, self.chunk_overlap);
        let total = chunks.len();
        let kept = rank_chunks(chunks, residual_query, self.max_chunks);
        debug!(url = %url, total_chunks = total, kept = kept.len(), "Ranked page chunks");

        Ok(kept
            .into_iter()
            .map(|chunk| {
                let result = RawResult::new(url).with_content(chunk);
                match &title {
                    Some(title) => result.with_title(title.clone()),
                    None => result,
                }
            })
            .collect())
    }
}

/// Classify a `Content-Type` header. A missing header is treated as HTML.
fn body_kind(content_type: Option<&str>) -> Option<BodyKind> {
    let Some(content_type) = content_type else {
        return Some(BodyKind::Html);
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match mime.as_str() {
        "text/html" | "application/xhtml+xml" => Some(BodyKind::Html),
        "text/plain" | "text/markdown" => Some(BodyKind::PlainText),
        _ => None,
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_and_extract(
        &self,
        url: &str,
        residual_query: &str,
    ) -> FetchResult<Vec<RawResult>> {
        let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl {
            url: url.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
            });
        }

        debug!(url = %url, "HTTP fetch starting");
        let response = self.client.get(parsed).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            FetchError::from_reqwest(url, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "HTTP fetch returned error status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if response.url().as_str() != url {
            debug!(url = %url, final_url = %response.url(), "Followed redirect; citing requested URL");
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let kind = body_kind(content_type.as_deref()).ok_or_else(|| {
            FetchError::UnsupportedContent {
                url: url.to_string(),
                content_type: content_type.clone().unwrap_or_default(),
            }
        })?;

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let results = self.extract(url, &body, kind, residual_query)?;
        info!(
            url = %url,
            content_length = body.len(),
            chunks = results.len(),
            "Page fetched and extracted"
        );
        Ok(results)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> HttpFetcher {
        let config = ContextConfig::default().with_chunking(60, 10).with_max_chunks(2);
        HttpFetcher::new(&config).unwrap()
    }

    const PAGE: &str = r#"<html><head><title>Garden notes</title></head><body>
        <p>Tomatoes need full sun and regular watering through summer.</p>
        <p>Basil grows well next to tomatoes and keeps some pests away.</p>
        <p>Compost should be turned every two weeks to stay aerobic.</p>
        </body></html>"#;

    #[test]
    fn test_body_kind() {
        assert_eq!(body_kind(None), Some(BodyKind::Html));
        assert_eq!(body_kind(Some("text/html; charset=utf-8")), Some(BodyKind::Html));
        assert_eq!(body_kind(Some("TEXT/PLAIN")), Some(BodyKind::PlainText));
        assert_eq!(body_kind(Some("application/pdf")), None);
        assert_eq!(body_kind(Some("image/png")), None);
    }

    #[test]
    fn test_extract_ranks_chunks_by_residual_query() {
        let results = fetcher()
            .extract("https://garden.example/notes", PAGE, BodyKind::Html, "compost schedule")
            .unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[0].content.as_deref().unwrap().contains("Compost"));
        assert!(results
            .iter()
            .all(|r| r.url.as_deref() == Some("https://garden.example/notes")));
        assert_eq!(results[0].title.as_deref(), Some("Garden notes"));
    }

    #[test]
    fn test_extract_without_terms_keeps_page_order() {
        let results = fetcher()
            .extract("https://garden.example/notes", PAGE, BodyKind::Html, "summarize  for me")
            .unwrap();
        assert!(results[0].content.as_deref().unwrap().starts_with("Tomatoes"));
    }

    #[test]
    fn test_extract_plain_text() {
        let results = fetcher()
            .extract("https://x.example/a.txt", "just   some text", BodyKind::PlainText, "")
            .unwrap();
        assert_eq!(results[0].content.as_deref(), Some("just some text"));
        assert_eq!(results[0].title, None);
    }

    #[test]
    fn test_empty_page_is_an_error() {
        let err = fetcher()
            .extract(
                "https://x.example",
                "<html><body><script>app()</script></body></html>",
                BodyKind::Html,
                "",
            )
            .unwrap_err();
        assert!(matches!(err, FetchError::EmptyContent { .. }));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let err = fetcher()
            .fetch_and_extract("not a valid url", "")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));

        let err = fetcher()
            .fetch_and_extract("ftp://files.example.com/a", "")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        let err = fetcher()
            .fetch_and_extract("http://127.0.0.1:9/article", "")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FetchError::Http { .. } | FetchError::Timeout { .. }
        ));
    }
}
