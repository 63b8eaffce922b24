//! Web-context pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Website extraction from the query
//! - Mode selection (single-site fetch vs. provider search)
//! - Result normalization
//! - Prompt assembly with citations

pub mod context;
pub mod normalize;
pub mod prompt;
pub mod website;

pub use context::{ContextMode, ContextPipeline};
pub use normalize::normalize;
pub use prompt::{
    assemble, format_date_time, format_search_results, DATE_TIME_PLACEHOLDER,
    SEARCH_RESULTS_PLACEHOLDER, WEB_SEARCH_PROMPT,
};
pub use website::extract_website;
