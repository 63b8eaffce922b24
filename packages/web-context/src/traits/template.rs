//! Prompt template sources.
//!
//! The web-search prompt is owned by the caller's settings store. The
//! pipeline loads it once per call through [`PromptTemplateSource`], so a
//! store outage surfaces as a [`TemplateError`] like any other failure.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use crate::error::{TemplateError, TemplateResult};
use crate::pipeline::prompt::WEB_SEARCH_PROMPT;

/// Supplies the prompt template containing `{current_date_time}` and
/// `{search_results}`.
#[async_trait]
pub trait PromptTemplateSource: Send + Sync {
    async fn load(&self) -> TemplateResult<String>;
}

/// A template held in memory.
#[derive(Debug, Clone)]
pub struct StaticTemplate(String);

impl StaticTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }
}

impl Default for StaticTemplate {
    fn default() -> Self {
        Self::new(WEB_SEARCH_PROMPT)
    }
}

#[async_trait]
impl PromptTemplateSource for StaticTemplate {
    async fn load(&self) -> TemplateResult<String> {
        Ok(self.0.clone())
    }
}

/// A template read from disk on every load, so edits apply without restart.
#[derive(Debug, Clone)]
pub struct FileTemplate {
    path: PathBuf,
}

impl FileTemplate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PromptTemplateSource for FileTemplate {
    async fn load(&self) -> TemplateResult<String> {
        debug!(path = %self.path.display(), "Loading prompt template");
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| TemplateError::Io {
                path: self.path.display().to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_template_default_has_placeholders() {
        let template = tokio_test::block_on(StaticTemplate::default().load()).unwrap();
        assert!(template.contains("{current_date_time}"));
        assert!(template.contains("{search_results}"));
    }

    #[test]
    fn test_static_template_returns_its_text() {
        let template = tokio_test::block_on(StaticTemplate::new("only {search_results}").load());
        assert_eq!(template.unwrap(), "only {search_results}");
    }

    #[tokio::test]
    async fn test_file_template_reads_file() {
        let path = std::env::temp_dir().join(format!(
            "web-context-template-{}.txt",
            std::process::id()
        ));
        tokio::fs::write(&path, "Now: {current_date_time}\n{search_results}")
            .await
            .unwrap();

        let template = FileTemplate::new(&path).load().await.unwrap();
        assert_eq!(template, "Now: {current_date_time}\n{search_results}");

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_template_error() {
        let err = FileTemplate::new("/nonexistent/web-context/prompt.txt")
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, TemplateError::Io { .. }));
    }
}
