mod cli;
mod config;
mod errors;
mod generation;
mod images;
mod llm_client;
mod models;
mod render;
mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::content::ContentGenerator;
use crate::generation::stats::StatsLog;
use crate::generation::RecipePipeline;
use crate::images::PixabayClient;
use crate::llm_client::{GeminiProvider, LlmClient, RetryPolicy};
use crate::render::HtmlRenderer;
use crate::storage::FileStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; nothing else starts without both API keys
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            eprintln!("Check your .env file (see GEMINI_API_KEY and PIXABAY_API_KEY).");
            std::process::exit(1);
        }
    };

    // Initialize structured logging (stderr, so it stays out of the prompt)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting recipegen v{}", env!("CARGO_PKG_VERSION"));

    for dir in [&config.output_dir, &config.log_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    // Initialize text generation
    let provider = GeminiProvider::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.request_timeout,
    )
    .context("Failed to build Gemini client")?;
    let llm = LlmClient::new(Arc::new(provider), RetryPolicy::new(config.max_retries));
    info!("LLM client initialized (model: {})", llm.model_name());

    // Initialize image search
    let images = PixabayClient::new(
        config.pixabay_api_key.clone(),
        config.images.clone(),
        config.request_timeout,
    )
    .context("Failed to build Pixabay client")?;

    let pipeline = RecipePipeline::new(
        ContentGenerator::new(llm, config.recipe.clone()),
        Arc::new(images),
        Box::new(HtmlRenderer),
        Box::new(FileStore::new(config.output_dir.clone())),
        config.recipe.clone(),
    )
    .with_stats_log(StatsLog::in_dir(&config.log_dir));

    info!("Writing recipes to {}", config.output_dir.display());

    let exit = cli::run(Arc::new(pipeline)).await?;
    info!("Session ended: {exit:?}");
    Ok(())
}
