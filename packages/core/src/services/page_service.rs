//! Page Service - CRUD and Hierarchy Reads
//!
//! This module provides the business layer over a [`PageStore`]:
//!
//! - CRUD operations delegating to the store, emitting one domain event per
//!   successful mutation
//! - Hierarchy reads (children, roots, orphans, full forest)
//! - Attribute filters (by status, by agent)
//!
//! # Parent References
//!
//! Parent links are never validated and deletes never cascade. Pages whose
//! `parent_id` points at a missing page are *orphans*: `build_forest` surfaces
//! them as tree heads so they stay visible, and `find_orphans` lists them.
//! Pages only reachable through a parent cycle are reported as `detached`.

use crate::db::{DomainEvent, PageStore};
use crate::models::{NewPage, Page, PageId, PageUpdate};
use crate::services::error::PageServiceError;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Default capacity of the domain event broadcast channel
pub const DOMAIN_EVENT_CHANNEL_CAPACITY: usize = 128;

/// One page's slot in a [`PageForest`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForestNode {
    pub page: Page,

    /// Distance from the tree head (heads are at depth 0)
    pub depth: usize,

    /// Indices into `PageForest::nodes`, in insertion order
    pub children: Vec<usize>,
}

/// Every page arranged into trees
///
/// Nodes live in one flat arena and refer to their children by index, so
/// arbitrarily deep parent chains never nest Rust values. Nodes are stored in
/// pre-order: each head is followed by its whole subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageForest {
    pub nodes: Vec<ForestNode>,

    /// Indices of tree heads (roots and orphans), in insertion order
    pub heads: Vec<usize>,

    /// Pages unreachable from any head (their ancestry loops back on itself)
    pub detached: Vec<Page>,
}

impl PageForest {
    pub fn node(&self, index: usize) -> Option<&ForestNode> {
        self.nodes.get(index)
    }

    /// Pages heading each tree
    pub fn head_pages(&self) -> impl Iterator<Item = &Page> + '_ {
        self.heads
            .iter()
            .filter_map(|&index| self.nodes.get(index))
            .map(|node| &node.page)
    }

    /// Number of pages under `index`, including the node itself
    pub fn subtree_size(&self, index: usize) -> usize {
        let mut count = 0;
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            count += 1;
            stack.extend_from_slice(&node.children);
        }
        count
    }

    /// Number of pages placed in trees
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.detached.is_empty()
    }
}

/// Page service over any `PageStore` backend
///
/// # Examples
///
/// ```rust
/// use pagedeck_core::db::InMemoryPageStore;
/// use pagedeck_core::models::NewPage;
/// use pagedeck_core::services::PageService;
/// use std::sync::Arc;
///
/// # tokio_test::block_on(async {
/// let service = PageService::new(Arc::new(InMemoryPageStore::with_sample_data()));
/// service.initialize().await?;
///
/// let id = service.create_page(NewPage::new("Ideas").with_parent(1)).await?;
/// let children = service.get_children(Some(1)).await?;
/// assert!(children.iter().any(|p| p.id == id));
/// # Ok::<(), pagedeck_core::services::PageServiceError>(())
/// # }).unwrap();
/// ```
#[derive(Clone)]
pub struct PageService {
    store: Arc<dyn PageStore>,

    /// Broadcast channel for domain events
    event_tx: broadcast::Sender<DomainEvent>,
}

impl PageService {
    /// Create a new PageService with the default event channel capacity
    pub fn new(store: Arc<dyn PageStore>) -> Self {
        Self::with_event_capacity(store, DOMAIN_EVENT_CHANNEL_CAPACITY)
    }

    /// Create a new PageService with an explicit event channel capacity
    ///
    /// A capacity of zero is raised to one.
    pub fn with_event_capacity(store: Arc<dyn PageStore>, capacity: usize) -> Self {
        let (event_tx, _) = broadcast::channel(capacity.max(1));
        Self { store, event_tx }
    }

    /// Create a PageService that shares an existing event channel
    pub fn with_event_sender(
        store: Arc<dyn PageStore>,
        event_tx: broadcast::Sender<DomainEvent>,
    ) -> Self {
        Self { store, event_tx }
    }

    /// Get access to the underlying store
    pub fn store(&self) -> &Arc<dyn PageStore> {
        &self.store
    }

    /// Subscribe to domain events
    ///
    /// Receives `PageCreated`, `PageUpdated` and `PageDeleted` for every
    /// successful mutation made through this service (or any clone of it).
    pub fn subscribe_to_events(&self) -> broadcast::Receiver<DomainEvent> {
        self.event_tx.subscribe()
    }

    /// Ignores send errors when nobody is subscribed
    fn emit_event(&self, event: DomainEvent) {
        tracing::debug!("Emitting {}", event.event_type());
        let _ = self.event_tx.send(event);
    }

    pub async fn initialize(&self) -> Result<(), PageServiceError> {
        Ok(self.store.initialize().await?)
    }

    pub async fn list_pages(&self) -> Result<Vec<Page>, PageServiceError> {
        Ok(self.store.list_all().await?)
    }

    pub async fn get_page(&self, id: PageId) -> Result<Option<Page>, PageServiceError> {
        Ok(self.store.get_by_id(id).await?)
    }

    /// Like `get_page`, but absence becomes `PageServiceError::PageNotFound`
    pub async fn get_page_required(&self, id: PageId) -> Result<Page, PageServiceError> {
        self.get_page(id)
            .await?
            .ok_or_else(|| PageServiceError::page_not_found(id))
    }

    /// Create a page and emit `PageCreated`
    pub async fn create_page(&self, page: NewPage) -> Result<PageId, PageServiceError> {
        let created = self.store.create_returning(page).await?;
        let id = created.id;
        self.emit_event(DomainEvent::PageCreated(created));
        Ok(id)
    }

    /// Shallow-merge `update`; emits `PageUpdated` only if the page existed
    pub async fn update_page(
        &self,
        id: PageId,
        update: PageUpdate,
    ) -> Result<bool, PageServiceError> {
        if update.is_empty() {
            tracing::debug!("Empty update for page {}", id);
        }

        match self.store.update_returning(id, update).await? {
            Some(page) => {
                self.emit_event(DomainEvent::PageUpdated(page));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete a page (non-cascading); emits `PageDeleted` only if it existed
    pub async fn delete_page(&self, id: PageId) -> Result<bool, PageServiceError> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            self.emit_event(DomainEvent::PageDeleted { id });
        }
        Ok(deleted)
    }

    /// Direct children of `parent_id`; `None` returns the root pages
    pub async fn get_children(
        &self,
        parent_id: Option<PageId>,
    ) -> Result<Vec<Page>, PageServiceError> {
        let pages = self.store.list_all().await?;
        Ok(pages
            .into_iter()
            .filter(|p| p.parent_id == parent_id)
            .collect())
    }

    /// Pages with no parent reference
    pub async fn get_roots(&self) -> Result<Vec<Page>, PageServiceError> {
        self.get_children(None).await
    }

    /// Pages whose `parent_id` references a page that no longer exists
    pub async fn find_orphans(&self) -> Result<Vec<Page>, PageServiceError> {
        let pages = self.store.list_all().await?;
        let ids: HashSet<PageId> = pages.iter().map(|p| p.id).collect();
        Ok(pages
            .into_iter()
            .filter(|p| p.parent_id.is_some_and(|parent| !ids.contains(&parent)))
            .collect())
    }

    pub async fn list_by_status(&self, status: &str) -> Result<Vec<Page>, PageServiceError> {
        let pages = self.store.list_all().await?;
        Ok(pages.into_iter().filter(|p| p.status == status).collect())
    }

    pub async fn list_by_agent(&self, agent: &str) -> Result<Vec<Page>, PageServiceError> {
        let pages = self.store.list_all().await?;
        Ok(pages.into_iter().filter(|p| p.agent == agent).collect())
    }

    /// Arrange every page into trees
    ///
    /// Heads are roots and orphans. Each page appears exactly once, either in
    /// a tree or in `detached`.
    pub async fn build_forest(&self) -> Result<PageForest, PageServiceError> {
        let pages = self.store.list_all().await?;
        Ok(assemble_forest(pages))
    }
}

fn assemble_forest(pages: Vec<Page>) -> PageForest {
    let ids: HashSet<PageId> = pages.iter().map(|p| p.id).collect();

    let mut children: HashMap<PageId, Vec<usize>> = HashMap::new();
    let mut head_indices = Vec::new();
    for (index, page) in pages.iter().enumerate() {
        match page.parent_id {
            Some(parent) if ids.contains(&parent) => {
                children.entry(parent).or_default().push(index)
            }
            _ => head_indices.push(index),
        }
    }

    let mut visited = vec![false; pages.len()];
    let mut forest = PageForest::default();

    // (page index, depth, arena index of the parent node)
    let mut stack: Vec<(usize, usize, Option<usize>)> = Vec::new();
    for head in head_indices {
        stack.push((head, 0, None));
        while let Some((index, depth, parent)) = stack.pop() {
            if visited[index] {
                continue;
            }
            visited[index] = true;

            let slot = forest.nodes.len();
            let page = &pages[index];
            forest.nodes.push(ForestNode {
                page: page.clone(),
                depth,
                children: Vec::new(),
            });
            match parent {
                Some(parent) => forest.nodes[parent].children.push(slot),
                None => forest.heads.push(slot),
            }

            // Reversed so children pop, and attach, in insertion order
            if let Some(kids) = children.get(&page.id) {
                for &child in kids.iter().rev() {
                    if !visited[child] {
                        stack.push((child, depth + 1, Some(slot)));
                    }
                }
            }
        }
    }

    forest.detached = pages
        .iter()
        .zip(&visited)
        .filter(|(_, seen)| !**seen)
        .map(|(page, _)| page.clone())
        .collect();
    if !forest.detached.is_empty() {
        tracing::warn!(
            "{} pages are unreachable from any root",
            forest.detached.len()
        );
    }

    forest
}


// Forest assembly tests in separate module
#[cfg(test)]
#[path = "page_service_tree_test.rs"]
mod page_service_tree_test;
