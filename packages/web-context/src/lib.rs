//! Web-Context Augmentation for Chat Prompts
//!
//! Given a user query, decides whether to fetch the one website the query
//! names or to run a generic web search, then turns whatever came back into
//! a prompt for a downstream language model plus the citations behind it.
//!
//! The library never calls the model; it only produces
//! `{ prompt, source[] }`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use web_context::{ContextConfig, ContextPipeline, WebContextSettings};
//!
//! let pipeline = ContextPipeline::from_config(&ContextConfig::default())?;
//! let settings = WebContextSettings::new(true, "google");
//!
//! // Fetches the named page, focused on "summarize  for me"
//! let payload = pipeline
//!     .build("summarize https://example.com/article for me", &settings)
//!     .await;
//!
//! // Searches Google with the full query
//! let payload = pipeline.build("latest tokio release", &settings).await;
//! ```
//!
//! # Modules
//!
//! - [`pipeline`] - Extraction, normalization, prompt assembly, orchestration
//! - [`searchers`] - Search backends and the provider registry
//! - [`fetchers`] - Single-site page fetcher
//! - [`traits`] - Seams for searchers, fetchers, templates and clocks
//! - [`types`] - Data types and configuration
//! - [`testing`] - Mock implementations for testing

mod client;

pub mod error;
pub mod fetchers;
pub mod pipeline;
pub mod searchers;
pub mod testing;
pub mod text;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ConfigError, ContextError, FetchError, SearchError, TemplateError};
pub use traits::{
    clock::{Clock, SystemClock},
    fetcher::PageFetcher,
    searcher::WebSearcher,
    template::{FileTemplate, PromptTemplateSource, StaticTemplate},
};
pub use types::{
    config::{ContextConfig, WebContextSettings, DEFAULT_PROVIDER},
    payload::{Citation, CitationKind, PromptPayload},
    result::{RawResult, SearchResult},
    website::WebsiteReference,
};

pub use pipeline::{
    assemble, extract_website, normalize, ContextMode, ContextPipeline, WEB_SEARCH_PROMPT,
};

pub use fetchers::HttpFetcher;
pub use searchers::{DuckDuckGoSearcher, GoogleSearcher, ProviderRegistry};
