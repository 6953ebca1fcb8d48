use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use guardian_core::constants::{KEY_ANONYMIZATION_MAP, KEY_ORDINAL_COUNTER};
use guardian_core::errors::GuardianResult;
use guardian_core::traits::IKeyValueStore;
use guardian_store::{FailingKeyValueStore, MappingStore, MemoryKeyValueStore, SqliteKeyValueStore};

// ── Bidirectional lookups ─────────────────────────────────────────────────

#[test]
fn put_resolves_in_both_directions() {
    let store = MappingStore::new(Arc::new(MemoryKeyValueStore::new()));
    store.put("john@x.com", "[EMAIL_1]");

    assert_eq!(store.lookup_real("[EMAIL_1]").as_deref(), Some("john@x.com"));
    assert_eq!(
        store.lookup_placeholder("john@x.com").as_deref(),
        Some("[EMAIL_1]")
    );
    assert_eq!(store.lookup_real("[EMAIL_99]"), None);
}

#[test]
fn repeated_value_reuses_placeholder() {
    let store = MappingStore::new(Arc::new(MemoryKeyValueStore::new()));
    let first = store.placeholder_for("john@x.com", "EMAIL");
    let second = store.placeholder_for("john@x.com", "EMAIL");

    assert_eq!(first, second);
    assert_eq!(store.len(), 1);
}

#[test]
fn distinct_values_share_one_ordinal_sequence() {
    let store = MappingStore::new(Arc::new(MemoryKeyValueStore::new()));
    let email = store.placeholder_for("john@x.com", "EMAIL");
    let ssn = store.placeholder_for("123-45-6789", "SSN");

    // The ordinal counter is shared across tags, not per-tag.
    assert_eq!(email, "[EMAIL_1]");
    assert_eq!(ssn, "[SSN_2]");
}

#[test]
fn empty_value_is_never_mapped() {
    let store = MappingStore::new(Arc::new(MemoryKeyValueStore::new()));
    store.put("", "[EMAIL_1]");

    assert!(store.is_empty());
    assert_eq!(store.lookup_real("[EMAIL_1]"), None);
}

#[test]
fn rebound_placeholder_drops_stale_reverse_entry() {
    let store = MappingStore::new(Arc::new(MemoryKeyValueStore::new()));
    store.put("old@x.com", "[EMAIL_1]");
    store.put("new@x.com", "[EMAIL_1]");

    assert_eq!(store.lookup_real("[EMAIL_1]").as_deref(), Some("new@x.com"));
    assert_eq!(store.lookup_placeholder("old@x.com"), None);
}

// ── Clear-all and ordinal reuse ───────────────────────────────────────────

#[test]
fn clear_all_empties_store_but_never_reuses_ordinals() {
    let store = MappingStore::new(Arc::new(MemoryKeyValueStore::new()));
    store.placeholder_for("john@x.com", "EMAIL");
    store.placeholder_for("123-45-6789", "SSN");
    store.clear_all();

    assert!(store.is_empty());
    let next = store.placeholder_for("jane@x.com", "EMAIL");
    assert_eq!(next, "[EMAIL_3]");
}

// ── Persistence round-trips ───────────────────────────────────────────────

#[tokio::test]
async fn save_and_load_round_trip_in_memory() {
    let kv: Arc<MemoryKeyValueStore> = Arc::new(MemoryKeyValueStore::new());
    let store = MappingStore::new(kv.clone());
    store.placeholder_for("john@x.com", "EMAIL");
    store.set_protection_enabled(false);
    store.save().await;

    let reloaded = MappingStore::new(kv);
    reloaded.load().await;

    assert_eq!(
        reloaded.lookup_real("[EMAIL_1]").as_deref(),
        Some("john@x.com")
    );
    assert!(!reloaded.protection_enabled());
    // Counter resumes past the persisted value.
    assert_eq!(reloaded.placeholder_for("jane@x.com", "EMAIL"), "[EMAIL_2]");
}

#[tokio::test]
async fn save_and_load_round_trip_sqlite() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("guardian.db");

    let kv = Arc::new(SqliteKeyValueStore::open(&path).expect("open sqlite"));
    let store = MappingStore::new(kv);
    store.placeholder_for("4111-1111-1111-1111", "CREDITCARD");
    store.save().await;

    let kv = Arc::new(SqliteKeyValueStore::open(&path).expect("reopen sqlite"));
    let reloaded = MappingStore::new(kv);
    reloaded.load().await;

    assert_eq!(
        reloaded.lookup_real("[CREDITCARD_1]").as_deref(),
        Some("4111-1111-1111-1111")
    );
}

/// Backend whose first write stalls, so a save scheduled earlier can
/// still be in flight when a later one completes.
struct SlowFirstWriteStore {
    inner: MemoryKeyValueStore,
    stalled_once: AtomicBool,
}

impl SlowFirstWriteStore {
    fn new() -> Self {
        Self {
            inner: MemoryKeyValueStore::new(),
            stalled_once: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl IKeyValueStore for SlowFirstWriteStore {
    async fn get(&self, key: &str) -> GuardianResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> GuardianResult<()> {
        if !self.stalled_once.swap(true, Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> GuardianResult<()> {
        self.inner.remove(key).await
    }
}

#[tokio::test(start_paused = true)]
async fn delayed_save_never_clobbers_newer_snapshot() {
    let kv = Arc::new(SlowFirstWriteStore::new());
    let store = MappingStore::new(kv.clone());
    store.placeholder_for("john@x.com", "EMAIL");
    store.placeholder_for("123-45-6789", "SSN");

    // Let both scheduled saves run to completion, stall included.
    tokio::time::sleep(Duration::from_secs(2)).await;

    let raw = kv
        .get(KEY_ANONYMIZATION_MAP)
        .await
        .expect("get")
        .expect("map key present");
    let map: HashMap<String, String> = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(map.get("[EMAIL_1]").map(String::as_str), Some("john@x.com"));
    assert_eq!(map.get("[SSN_2]").map(String::as_str), Some("123-45-6789"));

    // The counter landed with that map, not with an older snapshot.
    let counter = kv
        .get(KEY_ORDINAL_COUNTER)
        .await
        .expect("get")
        .expect("counter present");
    assert_eq!(counter, "3");
}

#[tokio::test]
async fn clear_all_persists_empty_state() {
    let kv: Arc<MemoryKeyValueStore> = Arc::new(MemoryKeyValueStore::new());
    let store = MappingStore::new(kv.clone());
    store.placeholder_for("john@x.com", "EMAIL");
    store.save().await;
    store.clear_all();
    store.save().await;

    let raw = kv
        .get(KEY_ANONYMIZATION_MAP)
        .await
        .expect("get")
        .expect("map key present");
    assert_eq!(raw, "{}");
}

// ── Failure policy ────────────────────────────────────────────────────────

#[tokio::test]
async fn persistence_failure_is_swallowed() {
    let store = MappingStore::new(Arc::new(FailingKeyValueStore::new()));
    store.put("john@x.com", "[EMAIL_1]");
    store.save().await;
    store.load().await;

    // In-memory state stays authoritative for the session.
    assert_eq!(store.lookup_real("[EMAIL_1]").as_deref(), Some("john@x.com"));
}

#[tokio::test]
async fn malformed_persisted_state_starts_empty() {
    let kv: Arc<MemoryKeyValueStore> = Arc::new(MemoryKeyValueStore::new());
    kv.set(KEY_ANONYMIZATION_MAP, "not json").await.expect("set");

    let store = MappingStore::new(kv);
    store.load().await;
    assert!(store.is_empty());
}

// ── Status surface ────────────────────────────────────────────────────────

#[test]
fn status_reports_toggle_and_entry_count() {
    let store = MappingStore::new(Arc::new(MemoryKeyValueStore::new()));
    store.placeholder_for("john@x.com", "EMAIL");

    let status = store.status();
    assert!(status.protection_enabled);
    assert_eq!(status.mapping_entries, 1);

    store.set_protection_enabled(false);
    assert!(!store.status().protection_enabled);
}
