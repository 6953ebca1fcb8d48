//! MappingStore — bidirectional placeholder↔real-value dictionary.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use guardian_core::constants::{
    KEY_ANONYMIZATION_MAP, KEY_ORDINAL_COUNTER, KEY_PROTECTION_ENABLED,
};
use guardian_core::models::{format_placeholder, MappingEntry, StatusReport};
use guardian_core::traits::IKeyValueStore;

/// Thread-safe mapping store shared by the fast pass, the deep pass, and
/// the reverse watcher.
///
/// The forward map (`placeholder → real_value`) serves reverse
/// substitution in O(1); the reverse index (`real_value → placeholder`)
/// keeps anonymization idempotent — a real value seen twice reuses its
/// placeholder instead of minting a new ordinal.
///
/// The ordinal counter is process-lifetime monotonic, shared across all
/// tags, and never reused — not even after `clear_all`. Persistence is
/// fire-and-forget: every mutation schedules a save, and failures are
/// logged, never escalated. Saves are version-gated: each mutation bumps
/// a state version, writers run one at a time, and a snapshot that has
/// been superseded by an already-persisted newer one is skipped, so a
/// slow save can never clobber newer persisted state or tear the map
/// apart from its counter.
pub struct MappingStore {
    forward: DashMap<String, String>,
    reverse: DashMap<String, String>,
    next_ordinal: AtomicU64,
    protection_enabled: AtomicBool,
    state_version: AtomicU64,
    persist: Arc<PersistGate>,
    kv: Arc<dyn IKeyValueStore>,
}

impl MappingStore {
    /// Create an empty store backed by the given persistence layer.
    /// Call [`load`](Self::load) afterwards to resynchronize with any
    /// previously persisted state.
    pub fn new(kv: Arc<dyn IKeyValueStore>) -> Self {
        Self {
            forward: DashMap::new(),
            reverse: DashMap::new(),
            next_ordinal: AtomicU64::new(1),
            protection_enabled: AtomicBool::new(true),
            state_version: AtomicU64::new(0),
            persist: Arc::new(PersistGate::default()),
            kv,
        }
    }

    /// Load persisted state into the in-memory cache. Best-effort: a
    /// missing or malformed backend state leaves the store empty.
    pub async fn load(&self) {
        match self.kv.get(KEY_ANONYMIZATION_MAP).await {
            Ok(Some(raw)) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => {
                    for (placeholder, real_value) in map {
                        self.reverse.insert(real_value.clone(), placeholder.clone());
                        self.forward.insert(placeholder, real_value);
                    }
                }
                Err(e) => warn!(error = %e, "persisted mapping state is malformed, starting empty"),
            },
            Ok(None) => {}
            Err(e) => warn!(error = %e, "failed to load mapping state"),
        }

        if let Ok(Some(raw)) = self.kv.get(KEY_ORDINAL_COUNTER).await {
            if let Ok(persisted) = raw.parse::<u64>() {
                // Never move the counter backwards; ordinals are never reused.
                self.next_ordinal
                    .fetch_max(persisted, Ordering::SeqCst);
            }
        }

        match self.kv.get(KEY_PROTECTION_ENABLED).await {
            // Protection defaults to on; only an explicit "false" disables it.
            Ok(Some(raw)) => self
                .protection_enabled
                .store(raw != "false", Ordering::SeqCst),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "failed to load protection flag"),
        }

        debug!(entries = self.forward.len(), "mapping store loaded");
    }

    /// Insert or overwrite a mapping. Persists asynchronously; the caller
    /// never blocks on persistence completion. An empty real value is
    /// never a valid mapping target and is ignored.
    pub fn put(&self, real_value: &str, placeholder: &str) {
        if real_value.is_empty() {
            warn!(placeholder, "ignoring mapping for empty value");
            return;
        }
        // Keep the reverse index consistent if the placeholder is rebound.
        if let Some(old_real) = self
            .forward
            .insert(placeholder.to_string(), real_value.to_string())
        {
            if old_real != real_value {
                self.reverse.remove(&old_real);
            }
        }
        self.reverse
            .insert(real_value.to_string(), placeholder.to_string());
        self.schedule_save();
    }

    /// Resolve a placeholder back to its real value.
    pub fn lookup_real(&self, placeholder: &str) -> Option<String> {
        self.forward.get(placeholder).map(|r| r.clone())
    }

    /// Find the placeholder already registered for a real value.
    pub fn lookup_placeholder(&self, real_value: &str) -> Option<String> {
        self.reverse.get(real_value).map(|r| r.clone())
    }

    /// Return the placeholder for `real_value`, minting a fresh `[TAG_n]`
    /// if the value has not been seen before in this session.
    pub fn placeholder_for(&self, real_value: &str, tag: &str) -> String {
        if let Some(existing) = self.lookup_placeholder(real_value) {
            return existing;
        }
        let ordinal = self.next_ordinal.fetch_add(1, Ordering::SeqCst);
        let placeholder = format_placeholder(tag, ordinal);
        self.put(real_value, &placeholder);
        placeholder
    }

    /// Empty the store and persist the empty state. The ordinal counter is
    /// deliberately not reset, so cleared ordinals are never reissued.
    pub fn clear_all(&self) {
        self.forward.clear();
        self.reverse.clear();
        self.schedule_save();
    }

    /// Number of mapping entries held.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Whether protection is currently enabled.
    pub fn protection_enabled(&self) -> bool {
        self.protection_enabled.load(Ordering::SeqCst)
    }

    /// Flip the protection toggle and persist it.
    pub fn set_protection_enabled(&self, enabled: bool) {
        self.protection_enabled.store(enabled, Ordering::SeqCst);
        self.schedule_save();
    }

    /// The read-only status surface for UI glue.
    pub fn status(&self) -> StatusReport {
        StatusReport {
            protection_enabled: self.protection_enabled(),
            mapping_entries: self.len(),
        }
    }

    /// Snapshot of all entries, for inspection and tests.
    pub fn entries(&self) -> Vec<MappingEntry> {
        self.forward
            .iter()
            .map(|r| MappingEntry::new(r.key().clone(), r.value().clone()))
            .collect()
    }

    /// Persist current state immediately. Best-effort: failures are
    /// logged and the in-memory state stays authoritative.
    pub async fn save(&self) {
        let version = self.state_version.load(Ordering::SeqCst);
        persist_snapshot(
            Arc::clone(&self.kv),
            Arc::clone(&self.persist),
            self.snapshot_state(version),
        )
        .await;
    }

    /// Schedule a fire-and-forget save on the current runtime. Outside a
    /// runtime (plain sync tests), persistence is skipped; in-memory state
    /// remains authoritative either way.
    fn schedule_save(&self) {
        // Bump before snapshotting so a later snapshot always carries a
        // higher version than any snapshot of the state it replaced.
        let version = self.state_version.fetch_add(1, Ordering::SeqCst) + 1;

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("no async runtime, skipping persistence");
            return;
        };

        let kv = Arc::clone(&self.kv);
        let gate = Arc::clone(&self.persist);
        let state = self.snapshot_state(version);
        handle.spawn(persist_snapshot(kv, gate, state));
    }

    fn snapshot_state(&self, version: u64) -> PersistedState {
        PersistedState {
            version,
            map: self
                .forward
                .iter()
                .map(|r| (r.key().clone(), r.value().clone()))
                .collect(),
            ordinal: self.next_ordinal.load(Ordering::SeqCst),
            enabled: self.protection_enabled(),
        }
    }
}

/// Serializes snapshot writers and remembers the newest version that made
/// it to the backend, so concurrent fire-and-forget saves cannot land out
/// of order or interleave the map with a mismatched counter.
#[derive(Default)]
struct PersistGate {
    writer: tokio::sync::Mutex<()>,
    last_persisted: AtomicU64,
}

struct PersistedState {
    version: u64,
    map: HashMap<String, String>,
    ordinal: u64,
    enabled: bool,
}

async fn persist_snapshot(kv: Arc<dyn IKeyValueStore>, gate: Arc<PersistGate>, state: PersistedState) {
    // One writer at a time; the three keys below land as a unit.
    let _writer = gate.writer.lock().await;
    if state.version <= gate.last_persisted.load(Ordering::SeqCst) {
        debug!(version = state.version, "snapshot superseded, save skipped");
        return;
    }

    let serialized = match serde_json::to_string(&state.map) {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "failed to serialize mapping state");
            return;
        }
    };
    let mut complete = true;
    if let Err(e) = kv.set(KEY_ANONYMIZATION_MAP, &serialized).await {
        warn!(error = %e, "failed to persist mapping state");
        complete = false;
    }
    if let Err(e) = kv.set(KEY_ORDINAL_COUNTER, &state.ordinal.to_string()).await {
        warn!(error = %e, "failed to persist ordinal counter");
        complete = false;
    }
    let flag = if state.enabled { "true" } else { "false" };
    if let Err(e) = kv.set(KEY_PROTECTION_ENABLED, flag).await {
        warn!(error = %e, "failed to persist protection flag");
        complete = false;
    }
    if complete {
        // A partially failed save stays retryable at the same version.
        gate.last_persisted.store(state.version, Ordering::SeqCst);
    }
}
