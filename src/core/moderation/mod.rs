// Core moderation module - the content gate every page write passes through.
// Same shape as the pages module: models in one file, logic in another.

pub mod block_lists;
pub mod moderation_models;
pub mod moderation_service;

pub use moderation_models::*;
pub use moderation_service::*;
