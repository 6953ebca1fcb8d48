//! In-memory key-value backends for tests and ephemeral sessions.

use async_trait::async_trait;
use dashmap::DashMap;

use guardian_core::errors::{GuardianResult, StoreError};
use guardian_core::traits::IKeyValueStore;

/// `IKeyValueStore` held entirely in memory.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    data: DashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held (for tests).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[async_trait]
impl IKeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> GuardianResult<Option<String>> {
        Ok(self.data.get(key).map(|r| r.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> GuardianResult<()> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> GuardianResult<()> {
        self.data.remove(key);
        Ok(())
    }
}

/// A backend that fails every operation. Used to verify that persistence
/// failures are logged and swallowed, never escalated.
#[derive(Default)]
pub struct FailingKeyValueStore;

impl FailingKeyValueStore {
    pub fn new() -> Self {
        Self
    }

    fn err() -> guardian_core::errors::GuardianError {
        StoreError::BackendError {
            message: "backend unavailable".to_string(),
        }
        .into()
    }
}

#[async_trait]
impl IKeyValueStore for FailingKeyValueStore {
    async fn get(&self, _key: &str) -> GuardianResult<Option<String>> {
        Err(Self::err())
    }

    async fn set(&self, _key: &str, _value: &str) -> GuardianResult<()> {
        Err(Self::err())
    }

    async fn remove(&self, _key: &str) -> GuardianResult<()> {
        Err(Self::err())
    }
}
