pub mod json_block_list;

pub use json_block_list::{BlockListError, JsonBlockListSource};
