// Moderation domain models - verdicts, layers and the block-list configuration.
//
// These are pure domain types with no I/O. The infra layer is responsible for
// loading a BlockListConfig from disk; the engine only ever sees the struct.

use super::block_lists;
use serde::{Deserialize, Serialize};

/// The binary moderation outcome for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Allowed,
    Blocked,
}

impl Verdict {
    pub fn is_blocked(self) -> bool {
        matches!(self, Verdict::Blocked)
    }
}

/// One independent rule set. Declared in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layer {
    PlainWord,
    SexualPattern,
    Profanity,
    SlurCategory,
    HashedToken,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layer::PlainWord => write!(f, "plain-word"),
            Layer::SexualPattern => write!(f, "sexual-pattern"),
            Layer::Profanity => write!(f, "profanity"),
            Layer::SlurCategory => write!(f, "slur-category"),
            Layer::HashedToken => write!(f, "hashed-token"),
        }
    }
}

/// Result of scanning a piece of text, with enough detail to explain a block.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationResult {
    pub verdict: Verdict,
    /// The layer that matched first (None when allowed)
    pub layer: Option<Layer>,
    /// The rule inside that layer: a word, a pattern, or a token digest
    pub rule: Option<String>,
}

impl ModerationResult {
    /// Create an "allowed" result
    pub fn allowed() -> Self {
        Self {
            verdict: Verdict::Allowed,
            layer: None,
            rule: None,
        }
    }

    /// Create a "blocked" result
    pub fn blocked(layer: Layer, rule: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Blocked,
            layer: Some(layer),
            rule: Some(rule.into()),
        }
    }
}

/// Block-list configuration. Every field has a default, so a JSON file only
/// needs to carry the lists it wants to override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockListConfig {
    /// Lowercase literal words (violence/crime/drug/harassment/danger)
    pub plain_words: Vec<String>,
    /// Case-insensitive regexes for sexual content
    pub sexual_patterns: Vec<String>,
    /// Bare words, compiled into obfuscation-tolerant patterns
    pub profanity_words: Vec<String>,
    /// Case-insensitive regexes for slur category labels
    pub slur_patterns: Vec<String>,
    /// Hex SHA-256 digests of lowercase tokens or space-joined n-grams
    pub hashed_tokens: Vec<String>,
    /// Require word boundaries around plain words instead of substring matches
    pub plain_word_boundaries: bool,
    /// Consult `hashed_tokens` when evaluating
    pub hashed_layer_enabled: bool,
    /// Longest n-gram (in words) hashed by the hashed layer
    pub hashed_max_ngram: usize,
}

impl Default for BlockListConfig {
    fn default() -> Self {
        fn owned(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        Self {
            plain_words: owned(block_lists::PLAIN_WORDS),
            sexual_patterns: owned(block_lists::SEXUAL_PATTERNS),
            profanity_words: owned(block_lists::PROFANITY_WORDS),
            slur_patterns: owned(block_lists::SLUR_PATTERNS),
            hashed_tokens: Vec::new(),
            plain_word_boundaries: false, // substring matching, over-broad on purpose
            hashed_layer_enabled: false,
            hashed_max_ngram: 2,
        }
    }
}
