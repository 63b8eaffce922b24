//! DuckDuckGo web search via the HTML endpoint.

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::client::build_client;
use crate::error::{ProviderResult, SearchError};
use crate::traits::searcher::WebSearcher;
use crate::types::config::ContextConfig;
use crate::types::result::RawResult;

const PROVIDER: &str = "duckduckgo";
const ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// DuckDuckGo search backend.
pub struct DuckDuckGoSearcher {
    client: reqwest::Client,
    endpoint: String,
    max_results: usize,
}

impl DuckDuckGoSearcher {
    pub fn new(config: &ContextConfig) -> ProviderResult<Self> {
        let client = build_client(config).map_err(|e| SearchError::from_reqwest(PROVIDER, e))?;
        Ok(Self {
            client,
            endpoint: ENDPOINT.to_string(),
            max_results: config.max_search_results,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl WebSearcher for DuckDuckGoSearcher {
    async fn search(&self, query: &str) -> ProviderResult<Vec<RawResult>> {
        debug!(provider = PROVIDER, query = %query, "DuckDuckGo search starting");

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("q", query)])
            .send()
            .await
            .map_err(|e| {
                warn!(provider = PROVIDER, error = %e, "DuckDuckGo request failed");
                SearchError::from_reqwest(PROVIDER, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(provider = PROVIDER, status = %status, "DuckDuckGo returned error status");
            return Err(SearchError::Status {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::from_reqwest(PROVIDER, e))?;

        // `Html` is !Send; parse fully before returning to the executor.
        let results = parse_results(&body, self.max_results);
        debug!(provider = PROVIDER, count = results.len(), "DuckDuckGo search completed");
        Ok(results)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

/// Parse a DuckDuckGo HTML results page, skipping ads.
pub fn parse_results(html: &str, max_results: usize) -> Vec<RawResult> {
    let document = Html::parse_document(html);
    let (Ok(result_sel), Ok(link_sel), Ok(snippet_sel)) = (
        Selector::parse(".result:not(.result--ad)"),
        Selector::parse("a.result__a"),
        Selector::parse(".result__snippet"),
    ) else {
        return Vec::new();
    };

    document
        .select(&result_sel)
        .filter_map(|result| {
            let link = result.select(&link_sel).next()?;
            let url = decode_redirect(link.value().attr("href")?)?;
            let title = link.text().collect::<String>().trim().to_string();
            let snippet = result
                .select(&snippet_sel)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
                .filter(|s| !s.is_empty());

            Some(RawResult {
                url: Some(url),
                title: (!title.is_empty()).then_some(title),
                content: snippet,
            })
        })
        .take(max_results)
        .collect()
}

/// Unwrap `//duckduckgo.com/l/?uddg=<target>` redirect links.
fn decode_redirect(href: &str) -> Option<String> {
    let base = Url::parse("https://duckduckgo.com/").ok()?;
    let url = base.join(href).ok()?;

    let target = if url.path() == "/l/" {
        let uddg = url
            .query_pairs()
            .find(|(k, _)| k == "uddg")
            .map(|(_, v)| v.into_owned())?;
        Url::parse(&uddg).ok()?
    } else {
        url
    };

    matches!(target.scheme(), "http" | "https").then(|| target.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r#"
        <html><body>
          <div class="result result--ad">
            <a class="result__a" href="https://ads.example.com/">Sponsored</a>
          </div>
          <div class="result">
            <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Ftokio.rs%2F&amp;rut=abc">Tokio</a>
            <a class="result__snippet">An asynchronous runtime for Rust.</a>
          </div>
          <div class="result">
            <a class="result__a" href="https://docs.rs/">Docs.rs</a>
          </div>
        </body></html>"#;

    #[test]
    fn test_parse_results_skips_ads_and_decodes_redirects() {
        let results = parse_results(RESULTS_PAGE, 10);
        assert_eq!(
            results,
            vec![
                RawResult::new("https://tokio.rs/")
                    .with_title("Tokio")
                    .with_content("An asynchronous runtime for Rust."),
                RawResult::new("https://docs.rs/").with_title("Docs.rs"),
            ]
        );
    }

    #[test]
    fn test_parse_results_respects_limit() {
        assert_eq!(parse_results(RESULTS_PAGE, 1).len(), 1);
    }
}
