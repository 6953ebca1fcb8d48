//! Reverse substitution over rendered output.

use std::sync::Arc;

use guardian_core::models::placeholder_regex;
use guardian_store::MappingStore;

/// Watches rendered output for known placeholders and substitutes the
/// real values back.
///
/// Decoupled from any rendering technology: the host feeds in each piece
/// of newly rendered text and applies the returned replacement. Callers
/// must never feed the editable input region through this — restoring the
/// user's own in-progress placeholders would undo their redaction while
/// they are still composing.
pub struct RenderWatcher {
    store: Arc<MappingStore>,
}

impl RenderWatcher {
    pub fn new(store: Arc<MappingStore>) -> Self {
        Self { store }
    }

    /// Replace every known placeholder in `text` with its registered real
    /// value. Returns `None` when nothing changed (including when
    /// protection is off or the store is empty). Placeholder-shaped tokens
    /// with no registered mapping are left untouched.
    pub fn restore(&self, text: &str) -> Option<String> {
        if !self.store.protection_enabled() || self.store.is_empty() {
            return None;
        }

        let mut changed = false;
        let restored = placeholder_regex().replace_all(text, |caps: &regex::Captures| {
            let token = caps.get(0).expect("group 0 always present").as_str();
            match self.store.lookup_real(token) {
                Some(real) => {
                    changed = true;
                    real
                }
                None => token.to_string(),
            }
        });

        changed.then(|| restored.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardian_store::MemoryKeyValueStore;

    fn store_with(entries: &[(&str, &str)]) -> Arc<MappingStore> {
        let store = Arc::new(MappingStore::new(Arc::new(MemoryKeyValueStore::new())));
        for (placeholder, real) in entries {
            store.put(real, placeholder);
        }
        store
    }

    #[test]
    fn known_placeholders_are_restored() {
        let store = store_with(&[("[EMAIL_1]", "john@x.com"), ("[PER_2]", "Dana")]);
        let watcher = RenderWatcher::new(store);

        let restored = watcher.restore("Tell [PER_2] to mail [EMAIL_1].").unwrap();
        assert_eq!(restored, "Tell Dana to mail john@x.com.");
    }

    #[test]
    fn unknown_placeholder_is_left_alone() {
        let store = store_with(&[("[EMAIL_1]", "john@x.com")]);
        let watcher = RenderWatcher::new(store);

        let restored = watcher.restore("see [EMAIL_1] and [LOC_9]").unwrap();
        assert_eq!(restored, "see john@x.com and [LOC_9]");
    }

    #[test]
    fn unchanged_text_returns_none() {
        let store = store_with(&[("[EMAIL_1]", "john@x.com")]);
        let watcher = RenderWatcher::new(store);

        assert!(watcher.restore("no placeholders here").is_none());
        assert!(watcher.restore("unknown [SSN_7] only").is_none());
    }

    #[test]
    fn empty_store_or_disabled_protection_skips_scanning() {
        let empty = RenderWatcher::new(store_with(&[]));
        assert!(empty.restore("[EMAIL_1]").is_none());

        let store = store_with(&[("[EMAIL_1]", "john@x.com")]);
        store.set_protection_enabled(false);
        let watcher = RenderWatcher::new(store);
        assert!(watcher.restore("[EMAIL_1]").is_none());
    }
}
