// Moderation engine - core business logic for the content gate.
//
// Scans text against five layers, in this order:
// - Plain words (substring, or word-bounded when configured)
// - Sexual-content patterns
// - Obfuscation-tolerant profanity ("f.u.c.k", "f u c k")
// - Slur category labels ("slur_<id>", "hate_<id>", "<id>-slur")
// - Hashed tokens (optional, private extension without literal text)
//
// The first match wins. Any single match blocks, so the order only affects
// which layer gets reported.
//
// NO I/O here - the config is built elsewhere and handed in.

use super::moderation_models::{BlockListConfig, Layer, ModerationResult, Verdict};
use regex::{Regex, RegexBuilder};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

// ============================================================================
// ERRORS
// ============================================================================

/// Only construction can fail. Evaluation is total.
#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("Invalid {layer} pattern `{pattern}`: {source}")]
    InvalidPattern {
        layer: Layer,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

// ============================================================================
// COMPILED LAYERS
// ============================================================================

/// A compiled regex that remembers the config entry it came from.
#[derive(Debug)]
struct Rule {
    source: String,
    regex: Regex,
}

impl Rule {
    fn compile(layer: Layer, source: &str, pattern: &str) -> Result<Self, ModerationError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ModerationError::InvalidPattern {
                layer,
                pattern: pattern.to_string(),
                source: e,
            })?;

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }
}

#[derive(Debug)]
enum PlainWords {
    Substring(Vec<String>),
    Bounded(Vec<Rule>),
}

#[derive(Debug)]
struct HashedTable {
    digests: HashSet<String>,
    max_ngram: usize,
}

/// Hash a token (or a space-joined n-gram) the way the hashed layer does.
///
/// Operators use this to produce `hashed_tokens` entries without writing the
/// token itself into a shared config file.
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.trim().to_lowercase().as_bytes()))
}

/// Build the obfuscation-tolerant pattern for a profanity word:
/// `\b` + letters joined by `\W*` + `\b`.
fn obfuscation_pattern(word: &str) -> String {
    let letters: Vec<String> = word
        .chars()
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    format!(r"\b{}\b", letters.join(r"\W*"))
}

fn cleaned(list: &[String]) -> impl Iterator<Item = String> + '_ {
    list.iter()
        .map(|entry| entry.trim().to_lowercase())
        .filter(|entry| !entry.is_empty())
}

// ============================================================================
// ENGINE
// ============================================================================

/// Deterministic, layered pattern matcher.
///
/// Built once at startup from a [`BlockListConfig`] and shared read-only
/// (usually behind an `Arc`) by every write.
#[derive(Debug)]
pub struct ModerationEngine {
    plain: PlainWords,
    sexual: Vec<Rule>,
    profanity: Vec<Rule>,
    slurs: Vec<Rule>,
    hashed: Option<HashedTable>,
}

impl ModerationEngine {
    /// Compile every layer. Fails if any configured regex is invalid.
    pub fn new(config: &BlockListConfig) -> Result<Self, ModerationError> {
        let plain = if config.plain_word_boundaries {
            let rules = cleaned(&config.plain_words)
                .map(|word| {
                    let pattern = format!(r"\b{}\b", regex::escape(&word));
                    Rule::compile(Layer::PlainWord, &word, &pattern)
                })
                .collect::<Result<Vec<_>, _>>()?;
            PlainWords::Bounded(rules)
        } else {
            PlainWords::Substring(cleaned(&config.plain_words).collect())
        };

        let sexual = config
            .sexual_patterns
            .iter()
            .filter(|p| !p.trim().is_empty())
            .map(|p| Rule::compile(Layer::SexualPattern, p, p))
            .collect::<Result<Vec<_>, _>>()?;

        let profanity = cleaned(&config.profanity_words)
            .map(|word| Rule::compile(Layer::Profanity, &word, &obfuscation_pattern(&word)))
            .collect::<Result<Vec<_>, _>>()?;

        let slurs = config
            .slur_patterns
            .iter()
            .filter(|p| !p.trim().is_empty())
            .map(|p| Rule::compile(Layer::SlurCategory, p, p))
            .collect::<Result<Vec<_>, _>>()?;

        let hashed = config.hashed_layer_enabled.then(|| HashedTable {
            digests: cleaned(&config.hashed_tokens).collect(),
            max_ngram: config.hashed_max_ngram.max(1),
        });

        tracing::debug!(
            sexual = sexual.len(),
            profanity = profanity.len(),
            slurs = slurs.len(),
            hashed_layer = hashed.is_some(),
            "Moderation engine compiled"
        );

        Ok(Self {
            plain,
            sexual,
            profanity,
            slurs,
            hashed,
        })
    }

    /// Verdict only.
    pub fn evaluate(&self, text: &str) -> Verdict {
        self.explain(text).verdict
    }

    /// Walk the layers in order and report the first match.
    pub fn explain(&self, text: &str) -> ModerationResult {
        if let Some(word) = self.match_plain(text) {
            return ModerationResult::blocked(Layer::PlainWord, word);
        }

        let regex_layers = [
            (Layer::SexualPattern, &self.sexual),
            (Layer::Profanity, &self.profanity),
            (Layer::SlurCategory, &self.slurs),
        ];
        for (layer, rules) in regex_layers {
            if let Some(rule) = rules.iter().find(|r| r.regex.is_match(text)) {
                return ModerationResult::blocked(layer, rule.source.clone());
            }
        }

        if let Some(digest) = self.match_hashed(text) {
            return ModerationResult::blocked(Layer::HashedToken, digest);
        }

        ModerationResult::allowed()
    }

    fn match_plain(&self, text: &str) -> Option<String> {
        match &self.plain {
            PlainWords::Substring(words) => {
                let lowered = text.to_lowercase();
                words.iter().find(|w| lowered.contains(w.as_str())).cloned()
            }
            PlainWords::Bounded(rules) => rules
                .iter()
                .find(|r| r.regex.is_match(text))
                .map(|r| r.source.clone()),
        }
    }

    fn match_hashed(&self, text: &str) -> Option<String> {
        let table = self.hashed.as_ref()?;
        if table.digests.is_empty() {
            return None;
        }

        let words: Vec<String> = text.unicode_words().map(str::to_lowercase).collect();
        for n in 1..=table.max_ngram.min(words.len()) {
            for window in words.windows(n) {
                let digest = hash_token(&window.join(" "));
                if table.digests.contains(&digest) {
                    return Some(digest);
                }
            }
        }

        None
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn default_engine() -> ModerationEngine {
        ModerationEngine::new(&BlockListConfig::default()).unwrap()
    }

    #[test]
    fn test_plain_word_substring_blocks() {
        let engine = default_engine();

        let result = engine.explain("this is a crime scene");
        assert_eq!(result.verdict, Verdict::Blocked);
        assert_eq!(result.layer, Some(Layer::PlainWord));
        assert_eq!(result.rule.as_deref(), Some("crime"));

        // Case-insensitive
        assert_eq!(engine.evaluate("CRIME Scene"), Verdict::Blocked);
        assert_eq!(engine.evaluate("kill the bug"), Verdict::Blocked);
    }

    #[test]
    fn test_clean_text_allowed() {
        let engine = default_engine();

        assert_eq!(engine.evaluate("recipe for pancakes"), Verdict::Allowed);
        assert_eq!(engine.evaluate(""), Verdict::Allowed);

        let result = engine.explain("Notes on the garden");
        assert_eq!(result, ModerationResult::allowed());
    }

    #[test]
    fn test_substring_matching_is_over_broad() {
        let engine = default_engine();

        // "skilled" contains "kill" - intentional over-blocking by default
        assert_eq!(engine.evaluate("a skilled worker"), Verdict::Blocked);
    }

    #[test]
    fn test_plain_word_boundaries_option() {
        let config = BlockListConfig {
            plain_word_boundaries: true,
            ..Default::default()
        };
        let engine = ModerationEngine::new(&config).unwrap();

        assert_eq!(engine.evaluate("a skilled worker"), Verdict::Allowed);
        assert_eq!(engine.evaluate("Kill it now"), Verdict::Blocked);
    }

    #[test]
    fn test_boundary_mode_catches_inflections() {
        let config = BlockListConfig {
            plain_word_boundaries: true,
            ..Default::default()
        };
        let engine = ModerationEngine::new(&config).unwrap();

        for text in [
            "online harassment report",
            "smuggling ring",
            "they smuggle goods",
            "a doxxing campaign",
            "kidnapping case",
        ] {
            assert_eq!(engine.evaluate(text), Verdict::Blocked, "{}", text);
        }
        assert_eq!(engine.evaluate("a smuggler's cove"), Verdict::Allowed);
    }

    #[test]
    fn test_sexual_patterns() {
        let engine = default_engine();

        let result = engine.explain("NSFW gallery");
        assert_eq!(result.layer, Some(Layer::SexualPattern));
        assert_eq!(engine.evaluate("18+ only"), Verdict::Blocked);
        assert_eq!(engine.evaluate("XXX rated"), Verdict::Blocked);
    }

    #[test]
    fn test_obfuscated_profanity() {
        let engine = default_engine();

        let result = engine.explain("f.u.c.k this");
        assert_eq!(result.layer, Some(Layer::Profanity));
        assert_eq!(result.rule.as_deref(), Some("fuck"));

        assert_eq!(engine.evaluate("f u c k"), Verdict::Blocked);
        assert_eq!(engine.evaluate("F-U-C-K that"), Verdict::Blocked);
        assert_eq!(engine.evaluate("S.h.I.t happens"), Verdict::Blocked);
    }

    #[test]
    fn test_profanity_no_false_positive_inside_words() {
        let engine = default_engine();

        assert_eq!(engine.evaluate("duck this"), Verdict::Allowed);
        // "ass" is word-bounded in the profanity layer
        assert_eq!(engine.evaluate("assassin"), Verdict::Allowed);
        assert_eq!(engine.evaluate("first class pass"), Verdict::Allowed);
    }

    #[test]
    fn test_slur_category_tokens() {
        let engine = default_engine();

        let result = engine.explain("see the slur_cat_01 list");
        assert_eq!(result.layer, Some(Layer::SlurCategory));

        assert_eq!(engine.evaluate("hate_group7 mentioned"), Verdict::Blocked);
        assert_eq!(engine.evaluate("an anti-slur campaign"), Verdict::Blocked);
        assert_eq!(engine.evaluate("no slurs please"), Verdict::Blocked);
        assert_eq!(engine.evaluate("Slur"), Verdict::Blocked);
    }

    #[test]
    fn test_slur_boundary_prevents_false_positives() {
        let engine = default_engine();

        // \b does not fall between "slur" and "ry"
        assert_eq!(engine.evaluate("slurry mixture"), Verdict::Allowed);
        assert_eq!(engine.evaluate("a hateful remark"), Verdict::Allowed);
    }

    #[test]
    fn test_layer_order_reports_first_match() {
        let engine = default_engine();

        let result = engine.explain("f.u.c.k, kill the slur_x list");
        assert_eq!(result.layer, Some(Layer::PlainWord));
    }

    #[test]
    fn test_hashed_layer_disabled_by_default() {
        let config = BlockListConfig {
            hashed_tokens: vec![hash_token("badger")],
            ..Default::default()
        };
        let engine = ModerationEngine::new(&config).unwrap();

        assert_eq!(engine.evaluate("a badger appeared"), Verdict::Allowed);
    }

    #[test]
    fn test_hashed_layer_unigrams_and_bigrams() {
        let config = BlockListConfig {
            hashed_tokens: vec![hash_token("badger"), hash_token("secret phrase")],
            hashed_layer_enabled: true,
            ..Default::default()
        };
        let engine = ModerationEngine::new(&config).unwrap();

        let result = engine.explain("a Badger appeared");
        assert_eq!(result.layer, Some(Layer::HashedToken));
        assert_eq!(result.rule, Some(hash_token("badger")));

        assert_eq!(
            engine.evaluate("the SECRET   phrase here"),
            Verdict::Blocked
        );
        assert_eq!(engine.evaluate("secret garden phrase"), Verdict::Allowed);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let config = BlockListConfig {
            sexual_patterns: vec!["(unclosed".to_string()],
            ..Default::default()
        };

        let err = ModerationEngine::new(&config).unwrap_err();
        assert!(matches!(
            err,
            ModerationError::InvalidPattern {
                layer: Layer::SexualPattern,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_entries_ignored() {
        let config = BlockListConfig {
            plain_words: vec!["".to_string(), "   ".to_string()],
            ..Default::default()
        };
        let engine = ModerationEngine::new(&config).unwrap();

        // An empty plain word would otherwise match everything
        assert_eq!(engine.evaluate("recipe for pancakes"), Verdict::Allowed);
    }

    #[test]
    fn test_obfuscation_pattern_shape() {
        assert_eq!(obfuscation_pattern("ab"), r"\ba\W*b\b");
    }
}
