// In-memory implementation of PageStore.
//
// Pages live for the lifetime of the process. Nothing is persisted.

use crate::core::pages::{Page, PageStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory implementation of PageStore.
///
/// **DashMap:**
/// A concurrent HashMap that locks per shard instead of globally. The write
/// path and every fired eviction touch this map from different tasks, and
/// DashMap's `insert` / `remove_if` each hold the shard lock for the whole
/// operation, so the revision check and the delete can't be split by an
/// overwrite.
pub struct InMemoryPageStore {
    /// slug -> page
    pages: DashMap<String, Page>,
    /// Process-wide revision counter. Starts at 1 so 0 never names a page.
    next_revision: AtomicU64,
}

impl InMemoryPageStore {
    pub fn new() -> Self {
        Self {
            pages: DashMap::new(),
            next_revision: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryPageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageStore for InMemoryPageStore {
    async fn put(&self, slug: &str, title: &str, content: &str) -> Result<Page, StoreError> {
        let page = Page {
            slug: slug.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            updated: Utc::now(),
            revision: self.next_revision.fetch_add(1, Ordering::Relaxed),
        };

        // Replace wholesale
        self.pages.insert(page.slug.clone(), page.clone());

        Ok(page)
    }

    async fn get(&self, slug: &str) -> Result<Option<Page>, StoreError> {
        Ok(self.pages.get(slug).map(|entry| entry.clone()))
    }

    async fn list(&self) -> Result<Vec<Page>, StoreError> {
        Ok(self.pages.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn delete(&self, slug: &str) -> Result<bool, StoreError> {
        Ok(self.pages.remove(slug).is_some())
    }

    async fn remove_revision(&self, slug: &str, revision: u64) -> Result<bool, StoreError> {
        Ok(self
            .pages
            .remove_if(slug, |_, page| page.revision == revision)
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_get() {
        let store = InMemoryPageStore::new();

        assert!(store.get("home").await.unwrap().is_none());

        let page = store.put("home", "Home", "Welcome").await.unwrap();
        assert_eq!(page.revision, 1);

        let stored = store.get("home").await.unwrap().unwrap();
        assert_eq!(stored, page);
    }

    #[tokio::test]
    async fn test_put_replaces_and_bumps_revision() {
        let store = InMemoryPageStore::new();

        let first = store.put("home", "Home", "v1").await.unwrap();
        let second = store.put("home", "HOME", "v2").await.unwrap();
        assert!(second.revision > first.revision);

        let stored = store.get("home").await.unwrap().unwrap();
        assert_eq!(stored.title, "HOME");
        assert_eq!(stored.content, "v2");
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryPageStore::new();
        store.put("home", "Home", "Welcome").await.unwrap();

        assert!(store.delete("home").await.unwrap());
        assert!(!store.delete("home").await.unwrap());
        assert!(store.get("home").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_revision_checks_revision() {
        let store = InMemoryPageStore::new();
        let old = store.put("home", "Home", "v1").await.unwrap();
        let new = store.put("home", "Home", "v2").await.unwrap();

        // Stale revision leaves the page alone
        assert!(!store.remove_revision("home", old.revision).await.unwrap());
        assert!(store.get("home").await.unwrap().is_some());

        assert!(store.remove_revision("home", new.revision).await.unwrap());
        assert!(store.get("home").await.unwrap().is_none());

        // Missing slug is a no-op
        assert!(!store.remove_revision("home", new.revision).await.unwrap());
    }
}
