//! Website reference derived from a free-text query.

use serde::{Deserialize, Serialize};

/// An explicit website named inside a user query.
///
/// When `has_url` is false, `url` is empty and `residual_query` is the
/// original query, unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteReference {
    pub has_url: bool,

    /// The URL exactly as it appeared in the query.
    pub url: String,

    /// The query with the URL text removed.
    pub residual_query: String,
}

impl WebsiteReference {
    /// A reference for a query that names no website.
    pub fn none(query: impl Into<String>) -> Self {
        Self {
            has_url: false,
            url: String::new(),
            residual_query: query.into(),
        }
    }

    /// A reference for a query that names `url`.
    pub fn found(url: impl Into<String>, residual_query: impl Into<String>) -> Self {
        Self {
            has_url: true,
            url: url.into(),
            residual_query: residual_query.into(),
        }
    }
}
