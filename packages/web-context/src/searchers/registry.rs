//! Provider registry: provider identifier → search backend.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::ProviderResult;
use crate::searchers::{DuckDuckGoSearcher, GoogleSearcher};
use crate::traits::searcher::WebSearcher;
use crate::types::config::ContextConfig;
use crate::types::result::RawResult;

/// Maps provider identifiers onto [`WebSearcher`]s.
///
/// Unknown identifiers resolve to the default backend instead of failing,
/// so settings that name a removed or misspelled provider keep working.
/// Identifiers compare case-insensitively.
#[derive(Clone)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn WebSearcher>>,
    default_id: String,
    default: Arc<dyn WebSearcher>,
}

impl ProviderRegistry {
    /// Create a registry whose default (and only) backend is `default`.
    pub fn new(default: Arc<dyn WebSearcher>) -> Self {
        let default_id = default.name().to_ascii_lowercase();
        let mut providers = HashMap::new();
        providers.insert(default_id.clone(), Arc::clone(&default));
        Self {
            providers,
            default_id,
            default,
        }
    }

    /// Google as the default, DuckDuckGo alongside it.
    ///
    /// If `config.default_provider` names a registered backend it becomes
    /// the default; otherwise Google stays.
    pub fn with_builtin(config: &ContextConfig) -> ProviderResult<Self> {
        let registry = Self::new(Arc::new(GoogleSearcher::new(config)?))
            .with_provider(Arc::new(DuckDuckGoSearcher::new(config)?))
            .with_default(&config.default_provider);
        Ok(registry)
    }

    /// Register a backend under its own name, replacing any previous one.
    pub fn register(&mut self, searcher: Arc<dyn WebSearcher>) {
        let id = searcher.name().to_ascii_lowercase();
        if id == self.default_id {
            self.default = Arc::clone(&searcher);
        }
        self.providers.insert(id, searcher);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_provider(mut self, searcher: Arc<dyn WebSearcher>) -> Self {
        self.register(searcher);
        self
    }

    /// Make a registered provider the fallback. Unknown ids are ignored.
    pub fn with_default(mut self, provider_id: &str) -> Self {
        let id = provider_id.to_ascii_lowercase();
        if let Some(searcher) = self.providers.get(&id) {
            self.default = Arc::clone(searcher);
            self.default_id = id;
        } else {
            info!(provider = %provider_id, default = %self.default_id, "Requested default provider not registered");
        }
        self
    }

    /// Identifier of the fallback provider.
    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    /// Registered identifiers, sorted.
    pub fn provider_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Backend for `provider_id`, or the default when it's unknown.
    pub fn resolve(&self, provider_id: &str) -> Arc<dyn WebSearcher> {
        match self.providers.get(&provider_id.to_ascii_lowercase()) {
            Some(searcher) => Arc::clone(searcher),
            None => {
                debug!(
                    provider = %provider_id,
                    fallback = %self.default_id,
                    "Unknown search provider, using default"
                );
                Arc::clone(&self.default)
            }
        }
    }

    /// Run one search on the resolved backend. No retries.
    pub async fn search(&self, provider_id: &str, query: &str) -> ProviderResult<Vec<RawResult>> {
        self.resolve(provider_id).search(query).await
    }
}
