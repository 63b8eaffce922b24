//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the pipeline without
//! making real network calls, and for pinning the prompt timestamp.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult, ProviderResult, SearchError, TemplateError, TemplateResult};
use crate::traits::{
    clock::Clock, fetcher::PageFetcher, searcher::WebSearcher, template::PromptTemplateSource,
};
use crate::types::result::RawResult;

/// Mock web searcher with canned results per query.
///
/// Clones share state, so a test can keep one handle for assertions while
/// the registry owns another.
#[derive(Clone)]
pub struct MockWebSearcher {
    name: String,
    results: Arc<RwLock<HashMap<String, Vec<RawResult>>>>,
    fallback: Arc<RwLock<Vec<RawResult>>>,
    fail: bool,
    queries: Arc<RwLock<Vec<String>>>,
}

impl Default for MockWebSearcher {
    fn default() -> Self {
        Self::named("mock")
    }
}

impl MockWebSearcher {
    /// Create a new mock searcher named "mock".
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock registered under `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            results: Arc::default(),
            fallback: Arc::default(),
            fail: false,
            queries: Arc::default(),
        }
    }

    /// Results returned for an exact query.
    pub fn with_results(self, query: &str, results: Vec<RawResult>) -> Self {
        self.results
            .write()
            .unwrap()
            .insert(query.to_string(), results);
        self
    }

    /// Results returned for any query without its own entry.
    pub fn with_default_results(self, results: Vec<RawResult>) -> Self {
        *self.fallback.write().unwrap() = results;
        self
    }

    /// Make every search fail with an HTTP 503.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Queries received so far, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.read().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    async fn search(&self, query: &str) -> ProviderResult<Vec<RawResult>> {
        self.queries.write().unwrap().push(query.to_string());

        if self.fail {
            return Err(SearchError::Status {
                provider: self.name.clone(),
                status: 503,
            });
        }

        Ok(self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_else(|| self.fallback.read().unwrap().clone()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A recorded call to [`MockPageFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub url: String,
    pub residual_query: String,
}

/// Mock page fetcher with canned page text per URL.
///
/// Unknown URLs fail with a transport error, like an unreachable host.
#[derive(Clone, Default)]
pub struct MockPageFetcher {
    pages: Arc<RwLock<HashMap<String, Vec<String>>>>,
    calls: Arc<RwLock<Vec<FetchCall>>>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `chunks` for `url`, one result per chunk.
    pub fn with_page(self, url: &str, chunks: &[&str]) -> Self {
        self.pages.write().unwrap().insert(
            url.to_string(),
            chunks.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn fetch_and_extract(
        &self,
        url: &str,
        residual_query: &str,
    ) -> FetchResult<Vec<RawResult>> {
        self.calls.write().unwrap().push(FetchCall {
            url: url.to_string(),
            residual_query: residual_query.to_string(),
        });

        let pages = self.pages.read().unwrap();
        let chunks = pages.get(url).ok_or_else(|| FetchError::Http {
            url: url.to_string(),
            source: "connection refused".into(),
        })?;

        Ok(chunks
            .iter()
            .map(|chunk| RawResult::new(url).with_content(chunk.clone()))
            .collect())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Template source that is always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableTemplate;

#[async_trait]
impl PromptTemplateSource for UnavailableTemplate {
    async fn load(&self) -> TemplateResult<String> {
        Err(TemplateError::Unavailable {
            reason: "settings store offline".to_string(),
        })
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    /// A UTC instant.
    pub fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .expect("valid test timestamp");
        Self(instant.fixed_offset())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
