//! Search backend implementations and the provider registry.
//!
//! - `GoogleSearcher` - Google HTML results (mandatory default)
//! - `DuckDuckGoSearcher` - DuckDuckGo HTML endpoint
//! - `ProviderRegistry` - identifier → backend, with default fallback

pub mod duckduckgo;
pub mod google;
pub mod registry;

pub use duckduckgo::DuckDuckGoSearcher;
pub use google::GoogleSearcher;
pub use registry::ProviderRegistry;

// Re-export from traits for convenience
pub use crate::traits::searcher::WebSearcher;
