//! Development Store Inspector
//!
//! Builds the page and agent services from environment configuration, runs a
//! short scripted session against them and prints the resulting page forest
//! and agent list as JSON. Useful for eyeballing store behaviour without a UI.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p pagedeck-dev-tools --bin dev-seed
//!
//! # Empty store, verbose logging
//! PAGEDECK_SEED_SAMPLE=false RUST_LOG=debug cargo run -p pagedeck-dev-tools --bin dev-seed
//! ```
//!
//! # Environment Variables
//!
//! - `PAGEDECK_*`: see `pagedeck_core::config`
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")

use pagedeck_core::models::{NewPage, PageUpdate};
use pagedeck_core::PageDeckConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = PageDeckConfig::from_env();
    tracing::info!(
        "Seed sample data: {}, event capacity: {}",
        config.seed_sample_data,
        config.event_channel_capacity
    );

    let (pages, agents) = config.build_services();
    pages.initialize().await?;

    // Log every event the session produces
    let mut rx = pages.subscribe_to_events();
    let listener = tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            tracing::info!("event {}", event.event_type());
        }
    });

    let parent = pages.get_roots().await?.first().map(|p| p.id);
    let mut scratch = NewPage::new("Scratchpad").with_status("draft");
    if let Some(parent) = parent {
        scratch = scratch.with_parent(parent);
    }
    let scratch_id = pages.create_page(scratch).await?;
    pages
        .update_page(scratch_id, PageUpdate::new().with_agent("assistant"))
        .await?;

    let agent_id = agents.add_agent("Summarizer").await?;
    agents
        .update_flow(&agent_id, "collect pages\nsummarize\npost digest")
        .await?;

    let forest = pages.build_forest().await?;
    println!("{}", serde_json::to_string_pretty(&forest)?);

    let orphans = pages.find_orphans().await?;
    if !orphans.is_empty() {
        tracing::warn!("{} orphaned pages", orphans.len());
    }

    println!("{}", serde_json::to_string_pretty(&agents.list_agents().await?)?);

    // Dropping the services closes the channel and ends the listener
    drop(pages);
    drop(agents);
    listener.await?;

    Ok(())
}
