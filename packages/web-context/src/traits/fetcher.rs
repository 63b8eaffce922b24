//! Page fetcher trait for single-site mode.

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::types::result::RawResult;

/// Retrieves one explicitly named page and extracts its readable text.
///
/// # Contract
///
/// - Every returned result carries the URL that was *requested*, not a
///   redirect target, so citations stay stable.
/// - Content is derived from the fetched page. A failed fetch is an error,
///   never an empty success.
/// - `residual_query` may focus extraction (e.g. chunk ranking); it never
///   changes which page is fetched.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_and_extract(&self, url: &str, residual_query: &str)
        -> FetchResult<Vec<RawResult>>;

    /// Fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
