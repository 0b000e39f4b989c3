//! Service Layer Error Types
//!
//! Services expose the same absence-as-value contract as the stores. These
//! errors cover the cases a caller explicitly opts into (`*_required` lookups),
//! input validation, and store invariant violations bubbling up.

use crate::db::StoreError;
use crate::models::{PageId, ValidationError};
use thiserror::Error;

/// Page service errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageServiceError {
    /// Page not found by ID
    #[error("Page not found: {id}")]
    PageNotFound { id: PageId },

    /// Store invariant violated
    #[error("Page store failure: {0}")]
    Store(#[from] StoreError),
}

impl PageServiceError {
    /// Create a page not found error
    pub fn page_not_found(id: PageId) -> Self {
        Self::PageNotFound { id }
    }
}

/// Agent service errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentServiceError {
    /// Agent not found by ID
    #[error("Agent not found: {id}")]
    AgentNotFound { id: String },

    /// Input rejected before reaching the store
    #[error("Agent validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Store invariant violated
    #[error("Agent store failure: {0}")]
    Store(#[from] StoreError),
}

impl AgentServiceError {
    /// Create an agent not found error
    pub fn agent_not_found(id: impl Into<String>) -> Self {
        Self::AgentNotFound { id: id.into() }
    }
}
