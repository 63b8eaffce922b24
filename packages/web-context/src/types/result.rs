//! Raw and normalized result records.

use serde::{Deserialize, Serialize};

/// A result as a backend or fetcher produced it.
///
/// Providers differ in what they can fill in: a search engine usually has a
/// title and a snippet, a page fetch has body text but no title. The
/// normalizer turns these into [`SearchResult`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResult {
    pub url: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl RawResult {
    /// Create a raw result for a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// A normalized `(url, content)` record, ready for prompt assembly.
///
/// `content` is plain text, never markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
    pub content: String,
}

impl SearchResult {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
        }
    }
}
