//! Web searcher trait for pluggable search backends.
//!
//! Every backend (Google, DuckDuckGo, or an app-provided one) implements
//! [`WebSearcher`]. The [`ProviderRegistry`](crate::searchers::ProviderRegistry)
//! maps provider identifiers onto implementations.

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::types::result::RawResult;

/// A web search backend.
///
/// Implementations return results in the provider's relevance order and
/// report failures as [`SearchError`](crate::error::SearchError). They never
/// retry; that policy belongs to the caller.
///
/// # Example
///
/// ```rust,ignore
/// let searcher = GoogleSearcher::new(&ContextConfig::default())?;
/// let results = searcher.search("rust async runtimes").await?;
///
/// for result in results {
///     println!("{:?} - {:?}", result.url, result.title);
/// }
/// ```
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Search the web for `query`.
    async fn search(&self, query: &str) -> ProviderResult<Vec<RawResult>>;

    /// Provider identifier (for logging and registry keys).
    fn name(&self) -> &str;
}
