//! Context pipeline: query in, cited prompt out.
//!
//! # Flow
//!
//! ```text
//! query ─► extract_website ─┬─ single-site mode ─► PageFetcher(url, residual)
//!                           └─ otherwise ────────► ProviderRegistry(provider, query)
//!                                                   │
//!                     normalize ◄───────────────────┘
//!                         │
//!                     load template ─► assemble(template, results, clock.now())
//! ```
//!
//! [`ContextPipeline::try_build`] propagates every failure as a typed
//! [`ContextError`]. [`ContextPipeline::build`] is the outer boundary: it
//! logs the failure and hands back the degraded payload instead.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{ContextError, Result};
use crate::fetchers::HttpFetcher;
use crate::pipeline::normalize::normalize;
use crate::pipeline::prompt::assemble;
use crate::pipeline::website::extract_website;
use crate::searchers::ProviderRegistry;
use crate::traits::{
    clock::{Clock, SystemClock},
    fetcher::PageFetcher,
    template::{PromptTemplateSource, StaticTemplate},
};
use crate::types::config::{ContextConfig, WebContextSettings};
use crate::types::payload::PromptPayload;

/// Which branch a call took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMode {
    /// Fetched the website named in the query.
    SingleSite,
    /// Ran a generic web search.
    Search,
}

impl ContextMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::SingleSite => "single_site",
            Self::Search => "search",
        }
    }
}

/// Builds web context for a chat query.
///
/// Holds no per-call state; one instance can serve concurrent calls.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = ContextPipeline::from_config(&ContextConfig::from_env()?)?;
/// let settings = WebContextSettings::new(true, "google");
///
/// let payload = pipeline.build("summarize https://example.com/article for me", &settings).await;
/// ```
#[derive(Clone)]
pub struct ContextPipeline {
    providers: ProviderRegistry,
    fetcher: Arc<dyn PageFetcher>,
    template: Arc<dyn PromptTemplateSource>,
    clock: Arc<dyn Clock>,
}

impl ContextPipeline {
    /// Pipeline over the given providers and fetcher, with the built-in
    /// prompt template and the system clock.
    pub fn new(providers: ProviderRegistry, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            providers,
            fetcher,
            template: Arc::new(StaticTemplate::default()),
            clock: Arc::new(SystemClock),
        }
    }

    /// Pipeline with the built-in HTTP backends.
    pub fn from_config(config: &ContextConfig) -> Result<Self> {
        let providers = ProviderRegistry::with_builtin(config)?;
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::new(providers, Arc::new(fetcher)))
    }

    /// Load the prompt template from `template` on every call.
    pub fn with_template(mut self, template: Arc<dyn PromptTemplateSource>) -> Self {
        self.template = template;
        self
    }

    /// Take "now" from `clock`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Registered search providers.
    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    /// Build the payload, degrading any failure to an empty one.
    ///
    /// Never fails. Failures are logged at `warn` with the error and the
    /// branch taken, since callers can't tell a degraded payload from a
    /// query that simply had no web context.
    pub async fn build(&self, query: &str, settings: &WebContextSettings) -> PromptPayload {
        match self.try_build(query, settings).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(
                    error = %e,
                    kind = error_kind(&e),
                    provider = %settings.search_provider,
                    visit_specific_website = settings.visit_specific_website,
                    "Web context unavailable, returning empty payload"
                );
                PromptPayload::degraded()
            }
        }
    }

    /// Build the payload, propagating failures.
    pub async fn try_build(&self, query: &str, settings: &WebContextSettings) -> Result<PromptPayload> {
        let website = extract_website(query);

        let (mode, raw) = if settings.visit_specific_website && website.has_url {
            debug!(url = %website.url, residual = %website.residual_query, "Single-site mode");
            let raw = self
                .fetcher
                .fetch_and_extract(&website.url, &website.residual_query)
                .await?;
            (ContextMode::SingleSite, raw)
        } else {
            debug!(provider = %settings.search_provider, "Search mode");
            let raw = self
                .providers
                .search(&settings.search_provider, query)
                .await?;
            (ContextMode::Search, raw)
        };

        let results = normalize(raw);
        let template = self.template.load().await?;
        let payload = assemble(&template, &results, &self.clock.now());

        info!(
            mode = mode.as_str(),
            results = results.len(),
            prompt_len = payload.prompt.len(),
            "Web context assembled"
        );
        Ok(payload)
    }
}

fn error_kind(error: &ContextError) -> &'static str {
    match error {
        ContextError::Fetch(_) => "fetch",
        ContextError::Search(_) => "search",
        ContextError::Template(_) => "template",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixedClock, MockPageFetcher, MockWebSearcher, UnavailableTemplate};
    use crate::types::result::RawResult;

    fn pipeline(searcher: &MockWebSearcher, fetcher: &MockPageFetcher) -> ContextPipeline {
        ContextPipeline::new(
            ProviderRegistry::new(Arc::new(searcher.clone())),
            Arc::new(fetcher.clone()),
        )
        .with_template(Arc::new(StaticTemplate::new("{current_date_time}\n{search_results}")))
        .with_clock(Arc::new(FixedClock::utc(2024, 1, 2, 3, 4, 5)))
    }

    #[tokio::test]
    async fn test_url_ignored_when_single_site_disabled() {
        let searcher = MockWebSearcher::named("google");
        let fetcher = MockPageFetcher::new().with_page("https://a.com", &["page"]);
        let settings = WebContextSettings::new(false, "google");

        pipeline(&searcher, &fetcher)
            .try_build("about https://a.com", &settings)
            .await
            .unwrap();

        assert!(fetcher.calls().is_empty());
        assert_eq!(searcher.queries(), vec!["about https://a.com"]);
    }

    #[tokio::test]
    async fn test_single_site_enabled_without_url_searches() {
        let searcher = MockWebSearcher::named("google");
        let fetcher = MockPageFetcher::new();
        let settings = WebContextSettings::new(true, "google");

        let payload = pipeline(&searcher, &fetcher)
            .try_build("rust borrow checker", &settings)
            .await
            .unwrap();

        assert!(fetcher.calls().is_empty());
        assert_eq!(searcher.queries(), vec!["rust borrow checker"]);
        assert_eq!(payload.prompt, "1/2/2024, 3:04:05 AM\n");
        assert!(payload.source.is_empty());
    }

    #[tokio::test]
    async fn test_template_failure_degrades() {
        let searcher = MockWebSearcher::named("google")
            .with_default_results(vec![RawResult::new("https://a.com").with_content("a")]);
        let fetcher = MockPageFetcher::new();
        let pipeline = pipeline(&searcher, &fetcher).with_template(Arc::new(UnavailableTemplate));
        let settings = WebContextSettings::new(false, "google");

        let err = pipeline.try_build("q", &settings).await.unwrap_err();
        assert!(matches!(err, ContextError::Template(_)));
        assert_eq!(pipeline.build("q", &settings).await, PromptPayload::degraded());
    }

    #[tokio::test]
    async fn test_search_failure_degrades() {
        let searcher = MockWebSearcher::named("google").failing();
        let fetcher = MockPageFetcher::new();
        let settings = WebContextSettings::new(true, "google");

        let payload = pipeline(&searcher, &fetcher).build("q", &settings).await;
        assert!(payload.is_empty());
    }
}
