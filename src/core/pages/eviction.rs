// Delayed eviction of blocked pages.
//
// A blocked write is accepted and stored, then `arm` schedules a one-shot
// background task that removes the page once the grace window has passed.
// The caller never waits for it.
//
// Each armed eviction is tied to the revision that was blocked. Overwriting
// the page bumps the revision, so a stale eviction finds a different revision
// at fire time and does nothing. There is no explicit cancel.

use super::page_store::PageStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

/// Reason code attached to every eviction event.
pub const EVICTION_REASON: &str = "blocked-content-auto-delete";

/// Default grace window between a blocked write and its removal.
pub const DEFAULT_EVICTION_DELAY: Duration = Duration::from_secs(5);

// Cap how many events we keep in memory so the log doesn't grow unbounded.
const MAX_EVICTION_EVENTS: usize = 1_000;

#[derive(Debug, Error)]
pub enum EvictionError {
    #[error("No async runtime available to schedule eviction")]
    NoRuntime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionOutcome {
    /// The blocked revision was still stored and has been removed
    Evicted,
    /// The page was deleted or overwritten before the timer fired
    Skipped,
    /// The store returned an error; the page may still be present
    Failed,
}

/// One fired eviction.
#[derive(Debug, Clone, Serialize)]
pub struct EvictionEvent {
    pub slug: String,
    pub revision: u64,
    pub at: DateTime<Utc>,
    pub outcome: EvictionOutcome,
    pub reason: &'static str,
}

/// Bounded in-memory record of fired evictions, oldest first.
#[derive(Debug, Default)]
pub struct EvictionLog {
    events: Mutex<VecDeque<EvictionEvent>>,
}

impl EvictionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: EvictionEvent) {
        // A panic while holding the lock can't leave the deque half-written
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.push_back(event);
        if events.len() > MAX_EVICTION_EVENTS {
            events.pop_front();
        }
    }

    pub fn events(&self) -> Vec<EvictionEvent> {
        let events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.iter().cloned().collect()
    }
}

/// Arms delayed, revision-checked deletions against a page store.
pub struct EvictionScheduler<S: PageStore + 'static> {
    store: Arc<S>,
    delay: Duration,
    log: Arc<EvictionLog>,
}

impl<S: PageStore + 'static> EvictionScheduler<S> {
    pub fn new(store: Arc<S>, delay: Duration) -> Self {
        Self {
            store,
            delay,
            log: Arc::new(EvictionLog::new()),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn log(&self) -> &EvictionLog {
        &self.log
    }

    /// Schedule removal of `slug` at `revision` after the configured delay.
    ///
    /// Returns immediately. Arming the same revision twice schedules two
    /// timers; whichever fires first removes the page and the other one finds
    /// nothing to do.
    pub fn arm(&self, slug: &str, revision: u64) -> Result<(), EvictionError> {
        let handle =
            tokio::runtime::Handle::try_current().map_err(|_| EvictionError::NoRuntime)?;

        let store = Arc::clone(&self.store);
        let log = Arc::clone(&self.log);
        let delay = self.delay;
        let slug = slug.to_string();

        tracing::debug!(slug = %slug, revision, delay_ms = delay.as_millis() as u64, "Eviction armed");

        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            fire(store.as_ref(), &log, slug, revision).await;
        });

        Ok(())
    }
}

/// Timer body: conditional delete, then report.
async fn fire<S: PageStore + ?Sized>(
    store: &S,
    log: &EvictionLog,
    slug: String,
    revision: u64,
) -> EvictionOutcome {
    let outcome = match store.remove_revision(&slug, revision).await {
        Ok(true) => {
            tracing::info!(
                slug = %slug,
                revision,
                reason = EVICTION_REASON,
                "Blocked page auto-deleted"
            );
            EvictionOutcome::Evicted
        }
        Ok(false) => {
            tracing::debug!(slug = %slug, revision, "Eviction skipped, revision no longer stored");
            EvictionOutcome::Skipped
        }
        Err(e) => {
            tracing::warn!(slug = %slug, revision, "Eviction failed: {}", e);
            EvictionOutcome::Failed
        }
    };

    log.record(EvictionEvent {
        slug,
        revision,
        at: Utc::now(),
        outcome,
        reason: EVICTION_REASON,
    });

    outcome
}
