//! Synchronous pattern pass.

use std::borrow::Cow;

use tracing::debug;

use guardian_store::MappingStore;

use crate::patterns::PatternSet;

/// The fast pass: applies each pattern in priority order over the
/// cumulative output of the previous one, replacing every match with a
/// placeholder registered in the mapping store.
///
/// Deterministic and suspension-free, so it can run on every keystroke.
/// A real value seen before reuses its placeholder (the store's reverse
/// index), which also makes re-running the pass over already-redacted
/// text a no-op.
pub struct PatternDetector {
    set: PatternSet,
}

impl PatternDetector {
    pub fn new(set: PatternSet) -> Self {
        Self { set }
    }

    /// Redact all pattern matches in `text`, registering each substitution
    /// in `store`. Returns the redacted text.
    pub fn redact(&self, store: &MappingStore, text: &str) -> String {
        let mut working = text.to_string();
        for pattern in self.set.iter() {
            let replaced = pattern.regex.replace_all(&working, |caps: &regex::Captures| {
                let matched = caps.get(0).expect("group 0 always present").as_str();
                let placeholder = store.placeholder_for(matched, &pattern.tag);
                debug!(pattern = %pattern.name, %placeholder, "pattern match redacted");
                placeholder
            });
            if let Cow::Owned(s) = replaced {
                working = s;
            }
        }
        working
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new(PatternSet::builtin())
    }
}
