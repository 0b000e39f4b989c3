//! Runtime configuration
//!
//! `PageDeckConfig` decides how the stores and services are built: whether the
//! page store starts with the sample pages, how many events the broadcast
//! channel buffers, and which defaults fill omitted page fields.
//!
//! It is rebuilt from the environment on every launch and never persisted.
//!
//! # Environment Variables
//!
//! - `PAGEDECK_SEED_SAMPLE`: seed the sample pages (`true`/`false`/`1`/`0`, default true)
//! - `PAGEDECK_EVENT_CAPACITY`: broadcast channel capacity (positive integer, default 128)
//! - `PAGEDECK_DEFAULT_AGENT`: agent assigned to pages created without one
//! - `PAGEDECK_DEFAULT_STATUS`: status assigned to pages created without one

use crate::db::{AgentStore, InMemoryAgentStore, InMemoryPageStore};
use crate::models::PageDefaults;
use crate::services::{AgentService, PageService, DOMAIN_EVENT_CHANNEL_CAPACITY};
use std::sync::Arc;
use tokio::sync::broadcast;

pub const ENV_SEED_SAMPLE: &str = "PAGEDECK_SEED_SAMPLE";
pub const ENV_EVENT_CAPACITY: &str = "PAGEDECK_EVENT_CAPACITY";
pub const ENV_DEFAULT_AGENT: &str = "PAGEDECK_DEFAULT_AGENT";
pub const ENV_DEFAULT_STATUS: &str = "PAGEDECK_DEFAULT_STATUS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDeckConfig {
    /// Start the page store with the five sample pages
    pub seed_sample_data: bool,

    /// Capacity of the shared domain event channel
    pub event_channel_capacity: usize,

    /// Fallbacks for omitted page fields
    pub page_defaults: PageDefaults,
}

impl Default for PageDeckConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
            event_channel_capacity: DOMAIN_EVENT_CHANNEL_CAPACITY,
            page_defaults: PageDefaults::default(),
        }
    }
}

impl PageDeckConfig {
    /// Build config from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup
    ///
    /// Unparseable values fall back to the default with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_SEED_SAMPLE) {
            match parse_bool(&raw) {
                Some(seed) => config.seed_sample_data = seed,
                None => tracing::warn!(
                    "Ignoring invalid {}={:?}, using {}",
                    ENV_SEED_SAMPLE,
                    raw,
                    config.seed_sample_data
                ),
            }
        }

        if let Some(raw) = lookup(ENV_EVENT_CAPACITY) {
            match raw.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => config.event_channel_capacity = capacity,
                _ => tracing::warn!(
                    "Ignoring invalid {}={:?}, using {}",
                    ENV_EVENT_CAPACITY,
                    raw,
                    config.event_channel_capacity
                ),
            }
        }

        if let Some(agent) = lookup(ENV_DEFAULT_AGENT) {
            config.page_defaults.agent = agent;
        }
        if let Some(status) = lookup(ENV_DEFAULT_STATUS) {
            config.page_defaults.status = status;
        }

        config
    }

    /// Build the page store described by this config
    pub fn build_page_store(&self) -> InMemoryPageStore {
        let store = if self.seed_sample_data {
            InMemoryPageStore::with_sample_data()
        } else {
            InMemoryPageStore::new()
        };
        store.with_defaults(self.page_defaults.clone())
    }

    /// Build both services over fresh in-memory stores, sharing one event channel
    pub fn build_services(&self) -> (PageService, AgentService) {
        let (event_tx, _) = broadcast::channel(self.event_channel_capacity.max(1));

        let agent_store: Arc<dyn AgentStore> = Arc::new(InMemoryAgentStore::new());
        let pages =
            PageService::with_event_sender(Arc::new(self.build_page_store()), event_tx.clone());
        let agents = AgentService::with_event_sender(agent_store, event_tx);

        (pages, agents)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
