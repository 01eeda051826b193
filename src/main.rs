// This is the entry point of the page service.
//
// **Architecture Overview:**
// - `core/` = Business logic (moderation engine, page service, eviction)
// - `infra/` = Implementations of core traits (in-memory store, block-list files)
// - `console/` = Adapter that feeds requests into the core
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Run the console adapter on stdin/stdout

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "console/console_layer.rs"]
mod console;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

mod config;

use crate::config::AppConfig;
use crate::core::moderation::ModerationEngine;
use crate::core::pages::PageService;
use crate::infra::pages::InMemoryPageStore;
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // Logs go to stderr; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env();

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let block_list = config
        .block_list()
        .context("Failed to load block list configuration")?;
    let moderation = Arc::new(
        ModerationEngine::new(&block_list).context("Failed to compile block list patterns")?,
    );

    let store = Arc::new(InMemoryPageStore::new());
    let pages = PageService::new(store, moderation, config.eviction_delay);

    tracing::info!(
        eviction_delay_secs = config.eviction_delay.as_secs(),
        blocklist = ?config.blocklist_path,
        "Page service ready"
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    console::run(&pages, stdin, stdout).await?;

    tracing::info!("Input closed, shutting down");
    Ok(())
}
