// JSON file source for block-list configuration.
//
// Any field missing from the file falls back to the built-in default, so a
// deployment can override just the lists it cares about, e.g.
//
//   { "hashed_layer_enabled": true, "hashed_tokens": ["9f86d0..."] }

use crate::core::moderation::BlockListConfig;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlockListError {
    #[error("Failed to read block list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse block list {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub struct JsonBlockListSource {
    path: PathBuf,
}

impl JsonBlockListSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<BlockListConfig, BlockListError> {
        let shown = self.path.display().to_string();

        let file = std::fs::File::open(&self.path).map_err(|e| BlockListError::Io {
            path: shown.clone(),
            source: e,
        })?;

        let config: BlockListConfig =
            serde_json::from_reader(std::io::BufReader::new(file)).map_err(|e| {
                BlockListError::Parse {
                    path: shown.clone(),
                    source: e,
                }
            })?;

        tracing::info!(
            path = %shown,
            plain_words = config.plain_words.len(),
            sexual_patterns = config.sexual_patterns.len(),
            profanity_words = config.profanity_words.len(),
            slur_patterns = config.slur_patterns.len(),
            hashed_tokens = config.hashed_tokens.len(),
            "Loaded block list"
        );

        Ok(config)
    }
}
