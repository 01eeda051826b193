use super::page_models::Page;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[allow(dead_code)]
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Storage port for pages.
///
/// Implementations must serialize access per slug: `remove_revision` is a
/// check-then-delete that has to be atomic with respect to `put`.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Insert or replace a page wholesale. Assigns a fresh revision and
    /// timestamp and returns the stored page.
    async fn put(&self, slug: &str, title: &str, content: &str) -> Result<Page, StoreError>;

    async fn get(&self, slug: &str) -> Result<Option<Page>, StoreError>;

    async fn list(&self) -> Result<Vec<Page>, StoreError>;

    /// Unconditional delete. Returns whether a page was removed.
    async fn delete(&self, slug: &str) -> Result<bool, StoreError>;

    /// Delete only if the slug still holds exactly this revision.
    async fn remove_revision(&self, slug: &str, revision: u64) -> Result<bool, StoreError>;
}
