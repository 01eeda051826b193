// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "pages/mod.rs"]
pub mod pages;

#[path = "moderation/mod.rs"]
pub mod moderation;
