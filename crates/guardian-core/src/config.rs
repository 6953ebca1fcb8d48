use serde::{Deserialize, Serialize};

use crate::constants;

/// A sensitive-data pattern definition. Patterns are applied in vector
/// order, each over the cumulative output of the previous one, so earlier
/// patterns win on overlapping text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternDef {
    /// Human-readable pattern name (`email`, `credit_card`, ...).
    pub name: String,
    /// Placeholder tag minted for matches (`EMAIL`, `CREDITCARD`, ...).
    pub tag: String,
    /// The regular expression. Compiled once when the set is built.
    pub regex: String,
}

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardianConfig {
    /// Pattern definitions for the synchronous pass, in priority order.
    pub patterns: Vec<PatternDef>,
    /// Quiet interval before the deep scan fires (ms).
    pub debounce_ms: u64,
    /// Reentrancy guard release delay after a programmatic overwrite (ms).
    pub guard_release_ms: u64,
    /// Minimum trimmed entity length for deep-pass redaction.
    pub min_entity_chars: usize,
    /// `(label substring, tag)` pairs the deep pass redacts.
    pub entity_labels: Vec<(String, String)>,
}

impl Default for GuardianConfig {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            debounce_ms: constants::DEFAULT_DEBOUNCE_MS,
            guard_release_ms: constants::DEFAULT_GUARD_RELEASE_MS,
            min_entity_chars: constants::DEFAULT_MIN_ENTITY_CHARS,
            entity_labels: constants::DEFAULT_ENTITY_LABELS
                .iter()
                .map(|(l, t)| (l.to_string(), t.to_string()))
                .collect(),
        }
    }
}

/// The built-in pattern set: email, credit card, SSN, in that order.
pub fn default_patterns() -> Vec<PatternDef> {
    vec![
        PatternDef {
            name: "email".to_string(),
            tag: "EMAIL".to_string(),
            regex: r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}".to_string(),
        },
        PatternDef {
            name: "credit_card".to_string(),
            tag: "CREDITCARD".to_string(),
            regex: r"\b\d{4}[\s\-]?\d{4}[\s\-]?\d{4}[\s\-]?\d{4}\b".to_string(),
        },
        PatternDef {
            name: "ssn".to_string(),
            tag: "SSN".to_string(),
            regex: r"\b\d{3}-\d{2}-\d{4}\b".to_string(),
        },
    ]
}
