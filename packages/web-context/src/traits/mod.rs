//! Core trait abstractions for the web-context pipeline.
//!
//! These are the seams where applications plug in search backends, page
//! fetchers, template stores and clocks.

pub mod clock;
pub mod fetcher;
pub mod searcher;
pub mod template;
