//! PageStore Trait - Record Store Abstraction
//!
//! This module defines the `PageStore` trait: the contract any page backend must
//! satisfy to sit behind `PageService`. Today the only implementation is
//! [`InMemoryPageStore`](super::InMemoryPageStore); a hosted real-time database
//! client can replace it without touching the service layer.
//!
//! # Design Decisions
//!
//! 1. **Async-First**: All methods are async so an I/O-bound backend can drop in
//! 2. **Absence is not an error**: unknown IDs yield `Ok(None)` / `Ok(false)`
//! 3. **Errors are invariant violations**: `Err(StoreError)` means ID uniqueness
//!    could not be upheld
//! 4. **Snapshots**: `list_all` returns owned copies; callers cannot mutate store state
//! 5. **Returning writes**: `create_returning` / `update_returning` hand back the
//!    record as it was written, so events never depend on a second read
//!
//! # Examples
//!
//! ```rust
//! use pagedeck_core::db::{InMemoryPageStore, PageStore};
//! use pagedeck_core::models::NewPage;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let store: Arc<dyn PageStore> = Arc::new(InMemoryPageStore::new());
//! store.initialize().await?;
//!
//! let id = store.create(NewPage::new("Inbox")).await?;
//! assert_eq!(id, 1);
//! assert!(store.get_by_id(id).await?.is_some());
//! # Ok::<(), pagedeck_core::db::StoreError>(())
//! # }).unwrap();
//! ```

use super::StoreError;
use crate::models::{NewPage, Page, PageId, PageUpdate};
use async_trait::async_trait;

/// Abstraction layer for page persistence operations
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. Any implementation that admits
/// concurrent callers must make the read-modify-write sequences in `create`,
/// `update` and `delete` atomic with respect to each other.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Establish readiness. Idempotent.
    async fn initialize(&self) -> Result<(), StoreError>;

    /// Snapshot of all pages in insertion order
    async fn list_all(&self) -> Result<Vec<Page>, StoreError>;

    /// Get page by ID
    ///
    /// # Returns
    ///
    /// - `Ok(Some(page))` if the page exists
    /// - `Ok(None)` if it doesn't (not an error)
    async fn get_by_id(&self, id: PageId) -> Result<Option<Page>, StoreError>;

    /// Create a page and return the stored record
    ///
    /// The ID is the next value of a strictly increasing counter. Omitted optional
    /// fields are filled from the store's `PageDefaults`. The page is appended to
    /// the end of the ordering. The returned record is the one inserted, read
    /// inside the same atomic step as the insert.
    ///
    /// # Errors
    ///
    /// Only on invariant violation (ID collision or counter exhaustion).
    async fn create_returning(&self, page: NewPage) -> Result<Page, StoreError>;

    /// Shallow-merge `update` over the page with `id` and return the merged record
    ///
    /// Returns `Ok(None)` and changes nothing when the page doesn't exist.
    async fn update_returning(
        &self,
        id: PageId,
        update: PageUpdate,
    ) -> Result<Option<Page>, StoreError>;

    /// Create a page and return its newly assigned ID
    async fn create(&self, page: NewPage) -> Result<PageId, StoreError> {
        Ok(self.create_returning(page).await?.id)
    }

    /// Shallow-merge `update`; `Ok(false)` if the page doesn't exist
    async fn update(&self, id: PageId, update: PageUpdate) -> Result<bool, StoreError> {
        Ok(self.update_returning(id, update).await?.is_some())
    }

    /// Remove the page with `id`
    ///
    /// Returns whether a page was removed. Deletes are non-cascading: children
    /// keep their (now dangling) `parent_id`.
    async fn delete(&self, id: PageId) -> Result<bool, StoreError>;
}
