//! Web Context Demo
//!
//! Runs the pipeline once against the real backends and prints the payload
//! as JSON.
//!
//! Settings come from the environment (a `.env` file is honoured):
//! - `WEB_CONTEXT_VISIT_SPECIFIC_WEBSITE` - fetch a URL named in the query
//! - `WEB_CONTEXT_SEARCH_PROVIDER` - `google` or `duckduckgo`
//! - `WEB_CONTEXT_TEMPLATE` - optional path to a prompt template file
//!
//! ```bash
//! cargo run -p web-context --example web_context_demo -- "summarize https://blog.rust-lang.org/ for me"
//! RUST_LOG=debug cargo run -p web-context --example web_context_demo -- "latest tokio release"
//! ```

use std::sync::Arc;

use anyhow::{bail, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use web_context::{ContextConfig, ContextPipeline, FileTemplate, WebContextSettings};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,web_context=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if query.trim().is_empty() {
        bail!("usage: web_context_demo <query>");
    }

    let config = ContextConfig::from_env()?;
    let settings = WebContextSettings::from_env()?;

    let mut pipeline = ContextPipeline::from_config(&config)?;
    if let Ok(path) = std::env::var("WEB_CONTEXT_TEMPLATE") {
        tracing::info!(path = %path, "Using prompt template file");
        pipeline = pipeline.with_template(Arc::new(FileTemplate::new(path)));
    }

    tracing::info!(
        provider = %settings.search_provider,
        visit_specific_website = settings.visit_specific_website,
        providers = ?pipeline.providers().provider_ids(),
        "Building web context"
    );

    let payload = pipeline.build(&query, &settings).await;
    if payload.is_empty() {
        tracing::warn!("No web context gathered");
    }

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
