//! Typed errors for the web-context pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so the pipeline
//! boundary can tell fetch, search and template failures apart before it
//! degrades them into an empty payload.

use thiserror::Error;

/// Any failure that can occur while gathering web context.
///
/// Only [`ContextPipeline::build`](crate::pipeline::ContextPipeline::build)
/// converts this into the degraded payload; everything below it propagates.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Single-site retrieval or extraction failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Search provider failed
    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    /// Prompt template could not be loaded
    #[error("template unavailable: {0}")]
    Template(#[from] TemplateError),
}

/// Errors from the single-site fetcher.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, body read)
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Server answered with a non-2xx status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Request exceeded the configured timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// Response is not text (e.g. PDF, image)
    #[error("unsupported content type {content_type} for {url}")]
    UnsupportedContent { url: String, content_type: String },

    /// Page fetched but yielded no readable text
    #[error("no readable content at {url}")]
    EmptyContent { url: String },

    /// URL could not be parsed or has no host
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

/// Errors from a search provider backend.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Transport-level failure
    #[error("{provider} request failed: {source}")]
    Http {
        provider: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Provider answered with a non-2xx status
    #[error("{provider} returned HTTP {status}")]
    Status { provider: String, status: u16 },

    /// Request exceeded the configured timeout
    #[error("{provider} search timed out")]
    Timeout { provider: String },

    /// Response body could not be interpreted
    #[error("{provider} response could not be parsed: {reason}")]
    Parse { provider: String, reason: String },
}

/// Errors loading the prompt template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template file could not be read
    #[error("failed to read template {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Template store has nothing to hand out
    #[error("template unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Errors loading [`ContextConfig`](crate::types::config::ContextConfig) or
/// [`WebContextSettings`](crate::types::config::WebContextSettings) from the
/// environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Variable is set but its value does not parse
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

impl FetchError {
    /// Classify a reqwest error, keeping timeouts distinct.
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Http {
                url: url.to_string(),
                source: Box::new(err),
            }
        }
    }
}

impl SearchError {
    /// Classify a reqwest error, keeping timeouts distinct.
    pub(crate) fn from_reqwest(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else {
            Self::Http {
                provider: provider.to_string(),
                source: Box::new(err),
            }
        }
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ContextError>;

/// Result type alias for single-site fetches.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for provider searches.
pub type ProviderResult<T> = std::result::Result<T, SearchError>;

/// Result type alias for template loading.
pub type TemplateResult<T> = std::result::Result<T, TemplateError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
