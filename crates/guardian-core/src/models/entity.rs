use serde::{Deserialize, Serialize};

/// A raw span from the named-entity classifier.
///
/// Sub-word tokenization can fragment one natural-language word into
/// several spans; `is_continuation` marks a fragment that belongs to the
/// immediately preceding span rather than starting a new word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub word: String,
    pub label: String,
    pub is_continuation: bool,
}

impl EntitySpan {
    pub fn new(word: impl Into<String>, label: impl Into<String>, is_continuation: bool) -> Self {
        Self {
            word: word.into(),
            label: label.into(),
            is_continuation,
        }
    }
}

/// A whole word reconstructed from classifier spans, with its dominant
/// label. Exists only for the duration of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedEntity {
    pub word: String,
    pub label: String,
}
