// Pages: model, storage port, the moderated write path, and delayed eviction.
#![allow(unused_imports)]

pub mod eviction;
pub mod page_models;
pub mod page_service;
pub mod page_store;

pub use eviction::{
    EvictionError, EvictionEvent, EvictionLog, EvictionOutcome, EvictionScheduler,
    EVICTION_REASON,
};
pub use page_models::{slugify, Page, PageSummary, SaveOutcome};
pub use page_service::{PageError, PageService};
pub use page_store::{PageStore, StoreError};
