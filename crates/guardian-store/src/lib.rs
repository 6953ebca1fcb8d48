//! # guardian-store
//!
//! The mapping store: a bidirectional dictionary between real sensitive
//! values and their placeholder tokens, persisted best-effort through an
//! [`IKeyValueStore`](guardian_core::traits::IKeyValueStore) backend.

pub mod memory;
pub mod sqlite;
pub mod store;

pub use memory::{FailingKeyValueStore, MemoryKeyValueStore};
pub use sqlite::SqliteKeyValueStore;
pub use store::MappingStore;
