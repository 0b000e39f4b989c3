//! Record Store Layer
//!
//! This module holds the persistence contracts and their in-process implementations:
//!
//! - `PageStore` / `InMemoryPageStore` - integer-keyed page records
//! - `AgentStore` / `InMemoryAgentStore` - UUID-keyed agent records
//! - `DomainEvent` - change notifications emitted by the service layer
//!
//! # Architecture
//!
//! The in-memory stores stand in for a hosted real-time database. The traits
//! are the seam: a networked client implementing them can replace the
//! in-memory versions without changes to the services.
//!
//! Deletes never cascade. A page whose parent was removed keeps its
//! `parent_id`; the service layer reports such pages as orphans.

mod agent_store;
mod error;
pub mod events;
mod memory_store;
mod page_store;

pub use agent_store::{AgentStore, InMemoryAgentStore};
pub use error::StoreError;
pub use events::DomainEvent;
pub use memory_store::InMemoryPageStore;
pub use page_store::PageStore;
