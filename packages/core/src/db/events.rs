//! Domain Events
//!
//! Events emitted by the service layer after a record changes. Subscribers
//! (list views, sync bridges) receive them over a tokio broadcast channel, so
//! they can react to mutations without polling the store.
//!
//! # Event Flow
//!
//! 1. A service performs a mutation through its store
//! 2. On success, exactly one domain event is sent on the broadcast channel
//! 3. Not-found outcomes emit nothing

use crate::models::{Agent, Page, PageId};
use serde::{Deserialize, Serialize};

/// Domain events emitted by `PageService` and `AgentService`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DomainEvent {
    /// A new page was created
    #[serde(rename = "page:created")]
    PageCreated(Page),

    /// An existing page was updated (carries the merged record)
    #[serde(rename = "page:updated")]
    PageUpdated(Page),

    /// A page was deleted
    #[serde(rename = "page:deleted")]
    PageDeleted { id: PageId },

    #[serde(rename = "agent:created")]
    AgentCreated(Agent),

    #[serde(rename = "agent:updated")]
    AgentUpdated(Agent),

    #[serde(rename = "agent:deleted")]
    AgentDeleted { id: String },
}

impl DomainEvent {
    /// Get a string representation of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::PageCreated(_) => "page:created",
            DomainEvent::PageUpdated(_) => "page:updated",
            DomainEvent::PageDeleted { .. } => "page:deleted",
            DomainEvent::AgentCreated(_) => "agent:created",
            DomainEvent::AgentUpdated(_) => "agent:updated",
            DomainEvent::AgentDeleted { .. } => "agent:deleted",
        }
    }
}
