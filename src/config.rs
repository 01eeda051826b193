// Runtime configuration, read from the environment (and .env via dotenv).
//
// EVICTION_DELAY_SECS         grace window before a blocked page is removed (default 5)
// BLOCKLIST_PATH              optional JSON block-list file
// MODERATION_WORD_BOUNDARIES  true/false, overrides plain_word_boundaries
// MODERATION_HASHED_LAYER     true/false, overrides hashed_layer_enabled

use crate::core::moderation::BlockListConfig;
use crate::core::pages::eviction::DEFAULT_EVICTION_DELAY;
use crate::infra::moderation::{BlockListError, JsonBlockListSource};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub eviction_delay: Duration,
    pub blocklist_path: Option<PathBuf>,
    pub word_boundaries: Option<bool>,
    pub hashed_layer: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            eviction_delay: DEFAULT_EVICTION_DELAY,
            blocklist_path: None,
            word_boundaries: None,
            hashed_layer: None,
        }
    }
}

/// Parse an optional variable, warning and falling back on bad input.
fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}, using default", key, raw);
            None
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            eviction_delay: parse_var(&lookup, "EVICTION_DELAY_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.eviction_delay),
            blocklist_path: lookup("BLOCKLIST_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            word_boundaries: parse_var(&lookup, "MODERATION_WORD_BOUNDARIES"),
            hashed_layer: parse_var(&lookup, "MODERATION_HASHED_LAYER"),
        }
    }

    /// Built-in lists, or the configured file, with env overrides on top.
    pub fn block_list(&self) -> Result<BlockListConfig, BlockListError> {
        let mut config = match &self.blocklist_path {
            Some(path) => JsonBlockListSource::new(path).load()?,
            None => BlockListConfig::default(),
        };

        if let Some(enabled) = self.word_boundaries {
            config.plain_word_boundaries = enabled;
        }
        if let Some(enabled) = self.hashed_layer {
            config.hashed_layer_enabled = enabled;
        }

        Ok(config)
    }
}
