//! Single-site fetcher implementations.
//!
//! - `HttpFetcher` - direct HTTP fetch with HTML text extraction
//! - `MockPageFetcher` (in [`testing`](crate::testing)) - for tests

mod http;

pub use http::HttpFetcher;

// Re-export from traits for convenience
pub use crate::traits::fetcher::PageFetcher;
