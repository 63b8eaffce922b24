//! Data types flowing through the web-context pipeline.

pub mod config;
pub mod payload;
pub mod result;
pub mod website;
