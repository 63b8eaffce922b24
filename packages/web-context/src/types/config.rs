//! Configuration types for fetching, searching and prompt assembly.

use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};

/// Identifier of the mandatory search backend.
pub const DEFAULT_PROVIDER: &str = "google";

/// Runtime knobs for the HTTP backends and the single-site fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Upper bound on any single outbound request, in seconds.
    ///
    /// Applies to both the single-site fetch and provider searches.
    /// Default: 20.
    pub request_timeout_secs: u64,

    /// User agent sent with every request.
    ///
    /// Search engines serve stripped-down markup to unknown agents, so the
    /// default mimics a desktop browser.
    pub user_agent: String,

    /// Maximum results a search backend returns. Default: 5.
    pub max_search_results: usize,

    /// Size of a page chunk in characters. Default: 1000.
    pub chunk_size: usize,

    /// Characters shared between neighbouring chunks. Default: 200.
    pub chunk_overlap: usize,

    /// Chunks kept from a single-site fetch. Default: 4.
    pub max_chunks: usize,

    /// Page text beyond this many characters is ignored. Default: 60 000.
    pub max_page_chars: usize,

    /// Backend used for unknown provider identifiers. Default: "google".
    pub default_provider: String,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 20,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            max_search_results: 5,
            chunk_size: 1000,
            chunk_overlap: 200,
            max_chunks: 4,
            max_page_chars: 60_000,
            default_provider: DEFAULT_PROVIDER.to_string(),
        }
    }
}

impl ContextConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from `WEB_CONTEXT_*` environment variables.
    ///
    /// A `.env` file is read first if present. Unset variables keep their
    /// defaults; set-but-unparsable ones are an error.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenv();

        let mut config = Self::default();
        if let Some(secs) = parse_var("WEB_CONTEXT_REQUEST_TIMEOUT_SECS")? {
            config.request_timeout_secs =
                nonzero_timeout("WEB_CONTEXT_REQUEST_TIMEOUT_SECS", secs)?;
        }
        if let Ok(agent) = env::var("WEB_CONTEXT_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(max) = parse_var("WEB_CONTEXT_MAX_SEARCH_RESULTS")? {
            config.max_search_results = max;
        }
        if let Some(size) = parse_var("WEB_CONTEXT_CHUNK_SIZE")? {
            config.chunk_size = size;
        }
        if let Some(overlap) = parse_var("WEB_CONTEXT_CHUNK_OVERLAP")? {
            config.chunk_overlap = overlap;
        }
        if let Some(max) = parse_var("WEB_CONTEXT_MAX_CHUNKS")? {
            config.max_chunks = max;
        }
        if let Some(max) = parse_var("WEB_CONTEXT_MAX_PAGE_CHARS")? {
            config.max_page_chars = max;
        }
        if let Ok(provider) = env::var("WEB_CONTEXT_DEFAULT_PROVIDER") {
            config.default_provider = provider;
        }
        Ok(config)
    }

    /// Request timeout as a `Duration`, never shorter than one second.
    ///
    /// A zero timeout would fail every request before it is sent.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the maximum number of search results.
    pub fn with_max_search_results(mut self, max: usize) -> Self {
        self.max_search_results = max;
        self
    }

    /// Set chunk size and overlap for single-site extraction.
    pub fn with_chunking(mut self, size: usize, overlap: usize) -> Self {
        self.chunk_size = size;
        self.chunk_overlap = overlap;
        self
    }

    /// Set how many chunks a single-site fetch keeps.
    pub fn with_max_chunks(mut self, max: usize) -> Self {
        self.max_chunks = max;
        self
    }

    /// Set the fallback provider.
    pub fn with_default_provider(mut self, provider: impl Into<String>) -> Self {
        self.default_provider = provider.into();
        self
    }
}

/// Per-call settings owned by the caller's settings store.
///
/// Threaded explicitly into
/// [`ContextPipeline::build`](crate::pipeline::ContextPipeline::build);
/// the pipeline never reads settings from anywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebContextSettings {
    /// Fetch the website named in the query instead of searching.
    pub visit_specific_website: bool,

    /// Provider identifier, e.g. "google" or "duckduckgo".
    pub search_provider: String,
}

impl Default for WebContextSettings {
    fn default() -> Self {
        Self {
            visit_specific_website: true,
            search_provider: DEFAULT_PROVIDER.to_string(),
        }
    }
}

impl WebContextSettings {
    pub fn new(visit_specific_website: bool, search_provider: impl Into<String>) -> Self {
        Self {
            visit_specific_website,
            search_provider: search_provider.into(),
        }
    }

    /// Load settings from `WEB_CONTEXT_VISIT_SPECIFIC_WEBSITE` and
    /// `WEB_CONTEXT_SEARCH_PROVIDER`.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenv();

        let mut settings = Self::default();
        if let Ok(raw) = env::var("WEB_CONTEXT_VISIT_SPECIFIC_WEBSITE") {
            settings.visit_specific_website =
                parse_bool(&raw).ok_or_else(|| ConfigError::Invalid {
                    key: "WEB_CONTEXT_VISIT_SPECIFIC_WEBSITE".to_string(),
                    reason: format!("expected a boolean, got {raw:?}"),
                })?;
        }
        if let Ok(provider) = env::var("WEB_CONTEXT_SEARCH_PROVIDER") {
            settings.search_provider = provider;
        }
        Ok(settings)
    }
}

fn parse_var<T>(key: &str) -> ConfigResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

fn nonzero_timeout(key: &str, secs: u64) -> ConfigResult<u64> {
    if secs == 0 {
        return Err(ConfigError::Invalid {
            key: key.to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    Ok(secs)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
