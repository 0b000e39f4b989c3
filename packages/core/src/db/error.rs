//! Store Error Types
//!
//! Record stores report absence through their return values (`Option`, `bool`).
//! The errors here are invariant violations: they mean the store's identity
//! guarantees no longer hold and must be surfaced, never swallowed.

use crate::models::PageId;
use thiserror::Error;

/// Record store invariant violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A generated or seeded ID collides with an existing record
    #[error("Duplicate record id: {id}")]
    DuplicateId { id: String },

    /// The sequential page ID counter cannot advance past `last_id`
    #[error("Page id space exhausted after {last_id}")]
    IdExhausted { last_id: PageId },
}

impl StoreError {
    /// Create a duplicate id error
    pub fn duplicate_id(id: impl ToString) -> Self {
        Self::DuplicateId { id: id.to_string() }
    }

    /// Create an id exhaustion error
    pub fn id_exhausted(last_id: PageId) -> Self {
        Self::IdExhausted { last_id }
    }
}
