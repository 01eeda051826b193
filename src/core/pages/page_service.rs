// Page service - the write path with the moderation gate in front of storage.
//
// Every save is stored first, unconditionally. The title and content are then
// scanned, and a blocked page gets a delayed eviction armed for its revision.
// The writer gets the same answer either way.

use super::eviction::{EvictionEvent, EvictionScheduler};
use super::page_models::{slugify, Page, PageSummary, SaveOutcome};
use super::page_store::{PageStore, StoreError};
use crate::core::moderation::ModerationEngine;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Title required")]
    TitleRequired,
    #[error("Title must contain at least one letter or digit")]
    InvalidTitle,
    #[error("Page not found")]
    NotFound,
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub struct PageService<S: PageStore + 'static> {
    store: Arc<S>,
    moderation: Arc<ModerationEngine>,
    scheduler: EvictionScheduler<S>,
}

impl<S: PageStore + 'static> PageService<S> {
    pub fn new(store: Arc<S>, moderation: Arc<ModerationEngine>, eviction_delay: Duration) -> Self {
        let scheduler = EvictionScheduler::new(Arc::clone(&store), eviction_delay);
        Self {
            store,
            moderation,
            scheduler,
        }
    }

    /// Create or replace a page.
    ///
    /// Returns as soon as the page is stored. If the content is blocked, the
    /// page is removed later by a background task; the caller is not told.
    pub async fn save(&self, title: &str, content: &str) -> Result<SaveOutcome, PageError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PageError::TitleRequired);
        }

        let slug = slugify(title);
        if slug.is_empty() {
            return Err(PageError::InvalidTitle);
        }

        let page = self.store.put(&slug, title, content).await?;
        self.moderate(&page);

        Ok(SaveOutcome {
            slug: page.slug,
            revision: page.revision,
        })
    }

    pub async fn get(&self, slug: &str) -> Result<Page, PageError> {
        self.store.get(slug).await?.ok_or(PageError::NotFound)
    }

    /// All pages, sorted by title (case-insensitive).
    pub async fn list(&self) -> Result<Vec<PageSummary>, PageError> {
        let mut pages: Vec<PageSummary> = self
            .store
            .list()
            .await?
            .iter()
            .map(PageSummary::from)
            .collect();

        pages.sort_by_cached_key(|p| p.title.to_lowercase());
        Ok(pages)
    }

    pub async fn delete(&self, slug: &str) -> Result<(), PageError> {
        if self.store.delete(slug).await? {
            Ok(())
        } else {
            Err(PageError::NotFound)
        }
    }

    /// Re-scan every stored page and arm eviction for the blocked ones.
    ///
    /// Picks up pages that slipped through when an eviction could not be
    /// scheduled, or that match a block list loaded after they were written.
    /// Returns how many evictions were armed.
    pub async fn sweep(&self) -> Result<usize, PageError> {
        let pages = self.store.list().await?;
        let armed = pages.iter().filter(|page| self.moderate(page)).count();

        tracing::info!(scanned = pages.len(), armed, "Moderation sweep finished");
        Ok(armed)
    }

    /// Recently fired evictions, oldest first.
    pub fn evictions(&self) -> Vec<EvictionEvent> {
        self.scheduler.log().events()
    }

    /// Scan a stored page and arm its eviction if blocked.
    /// Returns true when an eviction was armed.
    fn moderate(&self, page: &Page) -> bool {
        let text = format!("{}\n{}", page.title, page.content);
        if !self.moderation.evaluate(&text).is_blocked() {
            return false;
        }

        // Second walk only for blocked pages, to say which rule hit
        let result = self.moderation.explain(&text);

        tracing::info!(
            slug = %page.slug,
            revision = page.revision,
            layer = ?result.layer,
            delay_secs = self.scheduler.delay().as_secs(),
            "Blocked content stored, eviction armed"
        );
        tracing::debug!(slug = %page.slug, rule = ?result.rule, "Matched rule");

        match self.scheduler.arm(&page.slug, page.revision) {
            Ok(()) => true,
            Err(e) => {
                // Page stays stored until the next write or sweep
                tracing::warn!(slug = %page.slug, "Failed to arm eviction: {}", e);
                false
            }
        }
    }
}
