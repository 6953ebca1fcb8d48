use std::sync::Arc;

use proptest::prelude::*;

use guardian_anonymize::AnonymizerEngine;
use guardian_core::config::GuardianConfig;
use guardian_store::{MappingStore, MemoryKeyValueStore};

fn engine() -> AnonymizerEngine {
    let store = Arc::new(MappingStore::new(Arc::new(MemoryKeyValueStore::new())));
    AnonymizerEngine::new(store, GuardianConfig::default()).expect("default config compiles")
}

// ── Redacted output never contains the raw value ──────────────────────────

proptest! {
    #[test]
    fn output_never_contains_raw_email(
        user in "[a-z]{3,10}",
        domain in "[a-z]{3,10}"
    ) {
        let email = format!("{user}@{domain}.com");
        let input = format!("contact {email} today");
        let engine = engine();
        let out = engine.anonymize_sync(&input);
        prop_assert!(
            !out.contains(&email),
            "raw email leaked into output: {out}"
        );
    }

    #[test]
    fn output_never_contains_raw_ssn(
        a in 100u32..999,
        b in 10u32..99,
        c in 1000u32..9999
    ) {
        let ssn = format!("{a}-{b}-{c}");
        let input = format!("ssn is {ssn}");
        let engine = engine();
        let out = engine.anonymize_sync(&input);
        prop_assert!(
            !out.contains(&ssn),
            "raw SSN leaked into output: {out}"
        );
    }
}

// ── Idempotence ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn sync_pass_idempotent(
        user in "[a-z]{3,8}",
        filler in "[ a-zA-Z0-9.,]{0,40}"
    ) {
        let input = format!("{filler} {user}@example.org {filler}");
        let engine = engine();
        let first = engine.anonymize_sync(&input);
        let second = engine.anonymize_sync(&first);
        prop_assert_eq!(first, second);
    }
}

// ── Reverse round-trip ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn placeholders_resolve_back_to_original(
        user in "[a-z]{3,8}",
        card_tail in 1000u32..9999
    ) {
        let email = format!("{user}@corp.net");
        let card = format!("4111-1111-1111-{card_tail}");
        let input = format!("mail {email} card {card}");
        let engine = engine();
        let out = engine.anonymize_sync(&input);

        // Substituting every placeholder back through the store must
        // reproduce the input exactly.
        let mut restored = out.clone();
        for entry in engine.store().entries() {
            restored = restored.replace(&entry.placeholder, &entry.real_value);
        }
        prop_assert_eq!(restored, input);
    }
}
