//! Page Store Contract Tests
//!
//! Exercises `InMemoryPageStore` strictly through the `PageStore` trait object,
//! the way any replacement backend would be driven.

#[cfg(test)]
mod page_store_contract_tests {
    use anyhow::Result;
    use pagedeck_core::db::{InMemoryPageStore, PageStore};
    use pagedeck_core::models::{sample_pages, NewPage, Page, PageId, PageUpdate};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn sample_store() -> Arc<dyn PageStore> {
        Arc::new(InMemoryPageStore::with_sample_data())
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_strictly_increasing() -> Result<()> {
        let store = sample_store();

        let mut ids = Vec::new();
        for i in 0..50 {
            ids.push(store.create(NewPage::new(format!("page {}", i))).await?);
            if i % 7 == 0 {
                // Deletes must never cause id reuse
                store.delete(*ids.last().unwrap()).await?;
            }
        }

        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ids.first(), Some(&6));

        let all = store.list_all().await?;
        let distinct: HashSet<PageId> = all.iter().map(|p| p.id).collect();
        assert_eq!(distinct.len(), all.len());
        Ok(())
    }

    #[tokio::test]
    async fn test_read_after_write_matches_input_plus_defaults() -> Result<()> {
        let store = sample_store();

        let input = NewPage::new("Research")
            .with_parent(2)
            .with_agent("assistant")
            .with_turso("enabled");
        let id = store.create(input).await?;

        assert_eq!(
            store.get_by_id(id).await?,
            Some(Page {
                id,
                title: "Research".to_string(),
                parent_id: Some(2),
                agent: "assistant".to_string(),
                idb: "disabled".to_string(),
                turso: "enabled".to_string(),
                status: "active".to_string(),
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_partial_update_preserves_other_fields() -> Result<()> {
        let store = sample_store();
        let before = store.get_by_id(2).await?.unwrap();

        assert!(store.update(2, PageUpdate::new().with_title("X")).await?);

        let after = store.get_by_id(2).await?.unwrap();
        assert_eq!(
            after,
            Page {
                title: "X".to_string(),
                ..before
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_reparent_and_detach() -> Result<()> {
        let store = sample_store();

        store
            .update(3, PageUpdate::new().with_parent(Some(5)))
            .await?;
        assert_eq!(store.get_by_id(3).await?.unwrap().parent_id, Some(5));

        store.update(3, PageUpdate::new().with_parent(None)).await?;
        assert!(store.get_by_id(3).await?.unwrap().is_root());

        // Parent references are not validated
        store
            .update(3, PageUpdate::new().with_parent(Some(999)))
            .await?;
        assert_eq!(store.get_by_id(3).await?.unwrap().parent_id, Some(999));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_then_get() -> Result<()> {
        let store = sample_store();

        assert!(store.delete(3).await?);
        assert_eq!(store.get_by_id(3).await?, None);

        let snapshot = store.list_all().await?;
        assert!(!store.delete(3).await?);
        assert_eq!(store.list_all().await?, snapshot);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_does_not_cascade() -> Result<()> {
        let store = sample_store();

        assert!(store.delete(1).await?);

        let children: Vec<PageId> = store
            .list_all()
            .await?
            .into_iter()
            .filter(|p| p.parent_id == Some(1))
            .map(|p| p.id)
            .collect();
        assert_eq!(children, vec![2, 3, 4]);
        Ok(())
    }

    #[tokio::test]
    async fn test_initialize_does_not_touch_data() -> Result<()> {
        let store = sample_store();

        store.initialize().await?;
        store.initialize().await?;

        assert_eq!(store.list_all().await?, sample_pages());
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_assign_distinct_contiguous_ids() -> Result<()> {
        let store = Arc::new(InMemoryPageStore::new());

        let mut handles = Vec::new();
        for task in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let mut ids = Vec::new();
                for n in 0..25 {
                    let page = NewPage::new(format!("task {} page {}", task, n));
                    ids.push(store.create(page).await?);
                }
                Ok::<_, pagedeck_core::db::StoreError>(ids)
            }));
        }

        let mut all_ids = Vec::new();
        for handle in handles {
            let ids = handle.await??;
            // Each caller still observes its own ids increasing
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
            all_ids.extend(ids);
        }

        all_ids.sort_unstable();
        let expected: Vec<PageId> = (1..=200).collect();
        assert_eq!(all_ids, expected);
        assert_eq!(store.list_all().await?.len(), 200);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_and_deletes_stay_consistent() -> Result<()> {
        let store = Arc::new(InMemoryPageStore::with_sample_data());

        let mut handles = Vec::new();
        for id in 1..=5 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .update(id, PageUpdate::new().with_status("archived"))
                    .await?;
                if id % 2 == 0 {
                    store.delete(id).await?;
                }
                Ok::<_, pagedeck_core::db::StoreError>(())
            }));
        }
        for handle in handles {
            handle.await??;
        }

        let remaining = store.list_all().await?;
        let ids: Vec<PageId> = remaining.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        assert!(remaining.iter().all(|p| p.status == "archived"));
        Ok(())
    }
}
