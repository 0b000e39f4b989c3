//! Business Services
//!
//! This module contains the service layer over the record stores:
//!
//! - `PageService` - Page CRUD, hierarchy reads and filters
//! - `AgentService` - Agent CRUD and flow editing
//!
//! Both services emit `DomainEvent`s on a broadcast channel after each
//! successful mutation. They can share one channel via `with_event_sender`.

pub mod agent_service;
pub mod error;
pub mod page_service;

pub use agent_service::AgentService;
pub use error::{AgentServiceError, PageServiceError};
pub use page_service::{ForestNode, PageForest, PageService, DOMAIN_EVENT_CHANNEL_CAPACITY};
