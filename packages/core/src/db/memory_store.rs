//! In-Memory Page Store
//!
//! `InMemoryPageStore` keeps pages in a `Vec` (insertion order) next to a
//! sequential ID counter, both behind a single `tokio::sync::RwLock`. Every
//! mutation holds the write lock for its whole read-modify-write, which keeps
//! ID assignment unique and each operation atomic under concurrent callers.
//!
//! The store remembers the pages it was seeded with so `reset()` can restore a
//! known state between tests or development sessions.

use super::{PageStore, StoreError};
use crate::models::{sample_pages, NewPage, Page, PageDefaults, PageId, PageUpdate};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Pages plus the next ID to hand out
#[derive(Debug, Clone)]
struct PageTable {
    pages: Vec<Page>,
    next_id: PageId,
}

impl PageTable {
    fn position(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|p| p.id == id)
    }
}

/// In-process page store
///
/// # Examples
///
/// ```rust
/// use pagedeck_core::db::{InMemoryPageStore, PageStore};
/// use pagedeck_core::models::NewPage;
///
/// # tokio_test::block_on(async {
/// let store = InMemoryPageStore::with_sample_data();
/// // Sample data occupies ids 1..=5
/// let id = store.create(NewPage::new("Ideas").with_parent(1)).await?;
/// assert_eq!(id, 6);
/// # Ok::<(), pagedeck_core::db::StoreError>(())
/// # }).unwrap();
/// ```
#[derive(Debug)]
pub struct InMemoryPageStore {
    table: RwLock<PageTable>,

    /// Snapshot restored by `reset()`
    seed: PageTable,

    defaults: PageDefaults,

    initialized: AtomicBool,
}

impl InMemoryPageStore {
    /// Create an empty store; the first page gets ID 1
    pub fn new() -> Self {
        Self::from_table(PageTable {
            pages: Vec::new(),
            next_id: 1,
        })
    }

    /// Create a store seeded with the development sample pages (IDs 1..=5)
    pub fn with_sample_data() -> Self {
        Self::from_table(PageTable {
            pages: sample_pages(),
            next_id: 6,
        })
    }

    /// Create a store seeded with `pages`
    ///
    /// The counter starts one past the highest seeded ID.
    ///
    /// # Errors
    ///
    /// - `StoreError::DuplicateId` if two seeded pages share an ID
    /// - `StoreError::IdExhausted` if the highest seeded ID leaves no room to grow
    pub fn with_pages(pages: Vec<Page>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(pages.len());
        for page in &pages {
            if !seen.insert(page.id) {
                return Err(StoreError::duplicate_id(page.id));
            }
        }

        let next_id = match pages.iter().map(|p| p.id).max() {
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| StoreError::id_exhausted(max))?,
            None => 1,
        };

        Ok(Self::from_table(PageTable { pages, next_id }))
    }

    /// Replace the fallback values used for omitted fields on `create`
    pub fn with_defaults(mut self, defaults: PageDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    fn from_table(table: PageTable) -> Self {
        Self {
            seed: table.clone(),
            table: RwLock::new(table),
            defaults: PageDefaults::default(),
            initialized: AtomicBool::new(false),
        }
    }

    /// Fallbacks applied to omitted fields on `create`
    pub fn defaults(&self) -> &PageDefaults {
        &self.defaults
    }

    /// Whether `initialize()` has run at least once
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Restore the seeded pages and ID counter
    pub async fn reset(&self) {
        let mut table = self.table.write().await;
        *table = self.seed.clone();
        tracing::info!("Page store reset to {} seeded pages", table.pages.len());
    }

    /// Number of pages currently held
    pub async fn len(&self) -> usize {
        self.table.read().await.pages.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.table.read().await.pages.is_empty()
    }
}

impl Default for InMemoryPageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageStore for InMemoryPageStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        if !self.initialized.swap(true, Ordering::AcqRel) {
            let count = self.table.read().await.pages.len();
            tracing::info!("Page store initialized with {} pages", count);
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Page>, StoreError> {
        Ok(self.table.read().await.pages.clone())
    }

    async fn get_by_id(&self, id: PageId) -> Result<Option<Page>, StoreError> {
        let table = self.table.read().await;
        let page = table.pages.iter().find(|p| p.id == id).cloned();
        if page.is_none() {
            tracing::debug!("Page {} not found", id);
        }
        Ok(page)
    }

    async fn create_returning(&self, page: NewPage) -> Result<Page, StoreError> {
        let mut table = self.table.write().await;

        let id = table.next_id;
        let following = id
            .checked_add(1)
            .ok_or_else(|| StoreError::id_exhausted(id))?;

        if table.position(id).is_some() {
            tracing::error!("Generated page id {} collides with an existing page", id);
            return Err(StoreError::duplicate_id(id));
        }

        let created = page.into_page(id, &self.defaults);
        table.pages.push(created.clone());
        table.next_id = following;

        tracing::info!("Created page {}", id);
        Ok(created)
    }

    async fn update_returning(
        &self,
        id: PageId,
        update: PageUpdate,
    ) -> Result<Option<Page>, StoreError> {
        let mut table = self.table.write().await;

        let Some(index) = table.position(id) else {
            tracing::debug!("Update skipped, page {} not found", id);
            return Ok(None);
        };

        let page = &mut table.pages[index];
        update.apply_to(page);
        tracing::info!("Updated page {}", id);
        Ok(Some(page.clone()))
    }

    async fn delete(&self, id: PageId) -> Result<bool, StoreError> {
        let mut table = self.table.write().await;

        let before = table.pages.len();
        table.pages.retain(|p| p.id != id);
        let removed = table.pages.len() < before;

        if removed {
            tracing::info!("Deleted page {}", id);
        } else {
            tracing::debug!("Delete skipped, page {} not found", id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home_only() -> InMemoryPageStore {
        let mut home = sample_pages().remove(0);
        home.title = "Home".to_string();
        InMemoryPageStore::with_pages(vec![home]).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let store = InMemoryPageStore::new();
        assert!(!store.is_initialized());

        store.initialize().await.unwrap();
        store.initialize().await.unwrap();

        assert!(store.is_initialized());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_empty_store_starts_at_one() {
        let store = InMemoryPageStore::new();
        assert_eq!(store.create(NewPage::new("a")).await.unwrap(), 1);
        assert_eq!(store.create(NewPage::new("b")).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_counter_seeded_above_max_id() {
        let mut pages = sample_pages();
        pages.retain(|p| p.id != 3);
        pages[0].id = 40;

        let store = InMemoryPageStore::with_pages(pages).unwrap();
        assert_eq!(store.create(NewPage::new("next")).await.unwrap(), 41);
    }

    #[tokio::test]
    async fn test_with_pages_rejects_duplicate_ids() {
        let mut pages = sample_pages();
        pages[1].id = 1;

        let err = InMemoryPageStore::with_pages(pages).unwrap_err();
        assert_eq!(err, StoreError::duplicate_id(1));
    }

    #[tokio::test]
    async fn test_with_pages_rejects_exhausted_counter() {
        let mut pages = sample_pages();
        pages[4].id = PageId::MAX;

        let err = InMemoryPageStore::with_pages(pages).unwrap_err();
        assert_eq!(err, StoreError::id_exhausted(PageId::MAX));
    }

    #[tokio::test]
    async fn test_create_at_counter_limit_fails() {
        let mut pages = sample_pages();
        pages[4].id = PageId::MAX - 1;
        let store = InMemoryPageStore::with_pages(pages).unwrap();

        let err = store.create(NewPage::new("overflow")).await.unwrap_err();
        assert_eq!(err, StoreError::id_exhausted(PageId::MAX));
        assert_eq!(store.len().await, 5);
    }

    #[tokio::test]
    async fn test_list_all_is_a_snapshot() {
        let store = InMemoryPageStore::with_sample_data();

        let mut snapshot = store.list_all().await.unwrap();
        snapshot[0].title = "Mutated".to_string();
        snapshot.clear();

        let fresh = store.list_all().await.unwrap();
        assert_eq!(fresh.len(), 5);
        assert_eq!(fresh[0].title, "Home Page");
    }

    #[tokio::test]
    async fn test_create_appends_in_insertion_order() {
        let store = InMemoryPageStore::with_sample_data();
        store.create(NewPage::new("Later")).await.unwrap();

        let titles: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(
            titles,
            vec!["Home Page", "Projects", "Notes", "Tasks", "Archive", "Later"]
        );
    }

    #[tokio::test]
    async fn test_seeded_scenario() {
        let store = home_only();

        let id = store.create(NewPage::new("New").with_parent(1)).await.unwrap();
        assert_eq!(id, 2);

        let created = store.get_by_id(2).await.unwrap().unwrap();
        assert_eq!(
            created,
            Page {
                id: 2,
                title: "New".to_string(),
                parent_id: Some(1),
                agent: "default".to_string(),
                idb: "disabled".to_string(),
                turso: "disabled".to_string(),
                status: "active".to_string(),
            }
        );

        assert!(store
            .update(2, PageUpdate::new().with_status("archived"))
            .await
            .unwrap());
        assert_eq!(store.get_by_id(2).await.unwrap().unwrap().status, "archived");

        assert!(store.delete(1).await.unwrap());
        assert!(store.get_by_id(1).await.unwrap().is_none());
        // Dangling parent reference is tolerated
        assert_eq!(store.get_by_id(2).await.unwrap().unwrap().parent_id, Some(1));
    }

    #[tokio::test]
    async fn test_update_missing_page_changes_nothing() {
        let store = InMemoryPageStore::with_sample_data();
        let before = store.list_all().await.unwrap();

        let updated = store
            .update(99, PageUpdate::new().with_title("ghost"))
            .await
            .unwrap();

        assert!(!updated);
        assert_eq!(store.list_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_twice_is_idempotent() {
        let store = InMemoryPageStore::with_sample_data();
        let update = PageUpdate::new().with_title("Work").with_turso("enabled");

        store.update(3, update.clone()).await.unwrap();
        let once = store.get_by_id(3).await.unwrap();
        store.update(3, update).await.unwrap();
        let twice = store.get_by_id(3).await.unwrap();

        assert_eq!(once, twice);

        // An empty update still reports the page as found
        assert!(store.update(3, PageUpdate::new()).await.unwrap());
        assert_eq!(store.get_by_id(3).await.unwrap(), twice);
    }

    #[tokio::test]
    async fn test_delete_missing_page_leaves_collection_unchanged() {
        let store = InMemoryPageStore::with_sample_data();
        let before = store.list_all().await.unwrap();

        assert!(!store.delete(42).await.unwrap());
        assert_eq!(store.list_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = InMemoryPageStore::new();
        let first = store.create(NewPage::new("a")).await.unwrap();
        store.delete(first).await.unwrap();

        let second = store.create(NewPage::new("b")).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_custom_defaults_apply_on_create() {
        let store = InMemoryPageStore::new().with_defaults(PageDefaults {
            status: "draft".to_string(),
            ..Default::default()
        });

        let id = store.create(NewPage::new("WIP")).await.unwrap();
        let page = store.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(page.status, "draft");
        assert_eq!(page.agent, "default");
    }

    #[tokio::test]
    async fn test_reset_restores_seed() {
        let store = InMemoryPageStore::with_sample_data();
        store.create(NewPage::new("temp")).await.unwrap();
        store.delete(1).await.unwrap();

        store.reset().await;

        assert_eq!(store.list_all().await.unwrap(), sample_pages());
        assert_eq!(store.create(NewPage::new("again")).await.unwrap(), 6);
    }
}
