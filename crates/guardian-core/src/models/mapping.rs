use serde::{Deserialize, Serialize};

/// A single placeholder↔real-value association.
///
/// Placeholders are unique keys of form `[TAG_n]`; the real value is never
/// empty. Entries are added for the lifetime of a session and removed only
/// by an explicit clear-all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub placeholder: String,
    pub real_value: String,
}

impl MappingEntry {
    pub fn new(placeholder: impl Into<String>, real_value: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            real_value: real_value.into(),
        }
    }
}
