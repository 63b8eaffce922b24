//! Google web search via the public HTML results page.

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::client::build_client;
use crate::error::{ProviderResult, SearchError};
use crate::traits::searcher::WebSearcher;
use crate::types::config::ContextConfig;
use crate::types::result::RawResult;

const PROVIDER: &str = "google";
const ENDPOINT: &str = "https://www.google.com/search";

/// Result containers: `div.g` on the full page, `div.Gx5Zad` on the
/// lightweight page served to unknown agents.
const RESULT_SELECTOR: &str = "div.g, div.Gx5Zad";
const TITLE_SELECTOR: &str = "h3";
const LINK_SELECTOR: &str = "a[href]";
const SNIPPET_SELECTOR: &str =
    "div.VwiC3b, span.aCOpRe, div[data-sncf], div[style*='-webkit-line-clamp'], div.BNeawe.s3v9rd";

/// The mandatory search backend, and the registry's default.
pub struct GoogleSearcher {
    client: reqwest::Client,
    endpoint: String,
    max_results: usize,
}

impl GoogleSearcher {
    /// Create a searcher using the config's timeout, user agent and limit.
    pub fn new(config: &ContextConfig) -> ProviderResult<Self> {
        let client = build_client(config).map_err(|e| SearchError::from_reqwest(PROVIDER, e))?;
        Ok(Self {
            client,
            endpoint: ENDPOINT.to_string(),
            max_results: config.max_search_results,
        })
    }

    /// Point at a different results endpoint (mirrors, test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl WebSearcher for GoogleSearcher {
    async fn search(&self, query: &str) -> ProviderResult<Vec<RawResult>> {
        debug!(provider = PROVIDER, query = %query, "Google search starting");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("hl", "en"), ("q", query)])
            .send()
            .await
            .map_err(|e| {
                warn!(provider = PROVIDER, error = %e, "Google request failed");
                SearchError::from_reqwest(PROVIDER, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(provider = PROVIDER, status = %status, "Google returned error status");
            return Err(SearchError::Status {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::from_reqwest(PROVIDER, e))?;

        let results = parse_results(&body, self.max_results);
        debug!(provider = PROVIDER, count = results.len(), "Google search completed");
        Ok(results)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

/// Parse a Google results page into raw results, in page order.
///
/// An unrecognized layout yields no results rather than an error.
pub fn parse_results(html: &str, max_results: usize) -> Vec<RawResult> {
    let document = Html::parse_document(html);
    let (Ok(result_sel), Ok(title_sel), Ok(link_sel), Ok(snippet_sel)) = (
        Selector::parse(RESULT_SELECTOR),
        Selector::parse(TITLE_SELECTOR),
        Selector::parse(LINK_SELECTOR),
        Selector::parse(SNIPPET_SELECTOR),
    ) else {
        return Vec::new();
    };

    let mut results = Vec::new();
    for container in document.select(&result_sel) {
        if results.len() >= max_results {
            break;
        }

        let Some(url) = container
            .select(&link_sel)
            .filter_map(|a| a.value().attr("href"))
            .find_map(resolve_href)
        else {
            continue;
        };

        let title = container
            .select(&title_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty());
        let snippet = container
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<Vec<_>>().join(" "))
            .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|s| !s.is_empty());

        results.push(RawResult {
            url: Some(url),
            title,
            content: snippet,
        });
    }
    results
}

/// Turn a result link into the destination URL.
///
/// Handles direct links and `/url?q=` redirect links; Google-internal
/// links (maps, images, preferences) are skipped.
fn resolve_href(href: &str) -> Option<String> {
    let base = Url::parse("https://www.google.com/").ok()?;
    let url = base.join(href).ok()?;

    let target = if url.path() == "/url" {
        let q = url
            .query_pairs()
            .find(|(k, _)| k == "q" || k == "url")
            .map(|(_, v)| v.into_owned())?;
        Url::parse(&q).ok()?
    } else {
        url
    };

    let host = target.host_str()?;
    let internal = host == "google.com" || host.ends_with(".google.com");
    let web = matches!(target.scheme(), "http" | "https");
    (web && !internal).then(|| target.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r#"
        <html><body><div id="search">
          <div class="g">
            <a href="https://www.rust-lang.org/"><h3>Rust Programming Language</h3></a>
            <div class="VwiC3b">A language empowering everyone to build
              reliable and efficient software.</div>
          </div>
          <div class="g">
            <a href="/url?q=https://doc.rust-lang.org/book/&amp;sa=U"><h3>The Book</h3></a>
            <span class="aCOpRe">The Rust Programming Language book.</span>
          </div>
          <div class="g">
            <a href="https://maps.google.com/place"><h3>Map</h3></a>
          </div>
          <div class="g">
            <a href="https://crates.io/"><h3>crates.io</h3></a>
          </div>
        </div></body></html>"#;

    #[test]
    fn test_parse_results_in_page_order() {
        let results = parse_results(RESULTS_PAGE, 10);
        assert_eq!(results.len(), 3);

        assert_eq!(results[0].url.as_deref(), Some("https://www.rust-lang.org/"));
        assert_eq!(results[0].title.as_deref(), Some("Rust Programming Language"));
        assert_eq!(
            results[0].content.as_deref(),
            Some("A language empowering everyone to build reliable and efficient software.")
        );

        assert_eq!(results[1].url.as_deref(), Some("https://doc.rust-lang.org/book/"));
        assert_eq!(
            results[1].content.as_deref(),
            Some("The Rust Programming Language book.")
        );

        assert_eq!(results[2].url.as_deref(), Some("https://crates.io/"));
        assert_eq!(results[2].content, None);
    }

    #[test]
    fn test_parse_results_respects_limit() {
        assert_eq!(parse_results(RESULTS_PAGE, 2).len(), 2);
    }

    #[test]
    fn test_unknown_layout_yields_nothing() {
        assert!(parse_results("<html><body><p>captcha</p></body></html>", 5).is_empty());
    }

    #[test]
    fn test_resolve_href() {
        assert_eq!(
            resolve_href("/url?q=https://example.com/a%3Fb&sa=U").as_deref(),
            Some("https://example.com/a?b")
        );
        assert_eq!(resolve_href("/search?q=more"), None);
        assert_eq!(resolve_href("https://www.google.com/preferences"), None);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_search_error() {
        let searcher = GoogleSearcher::new(&ContextConfig::default())
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/search");

        let err = searcher.search("rust").await.unwrap_err();
        assert!(matches!(
            err,
            SearchError::Http { .. } | SearchError::Timeout { .. }
        ));
    }
}
