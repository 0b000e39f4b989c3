//! Data Models
//!
//! This module contains the record types managed by PageDeck:
//!
//! - `Page` - Hierarchical content unit with integer IDs
//! - `Agent` - Named automation agent with a free-text flow
//!
//! Each record has a creation input (`NewPage`, `NewAgent`) and a partial
//! update type (`PageUpdate`, `AgentUpdate`) applied as a shallow merge.

mod agent;
mod page;

pub use agent::{Agent, AgentUpdate, NewAgent, ValidationError};
pub use page::{sample_pages, NewPage, Page, PageDefaults, PageId, PageUpdate};
