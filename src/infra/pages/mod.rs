// Implementations for page storage.

pub mod in_memory;

pub use in_memory::InMemoryPageStore;
