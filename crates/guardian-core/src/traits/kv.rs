use async_trait::async_trait;

use crate::errors::GuardianResult;

/// Persistent key-value storage.
///
/// Persistence is best-effort: callers log failures and carry on with
/// in-memory state as the session authority. No method may panic on a
/// transient backend failure.
#[async_trait]
pub trait IKeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    async fn get(&self, key: &str) -> GuardianResult<Option<String>>;

    /// Store `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: &str) -> GuardianResult<()>;

    /// Remove the value stored under `key`. Missing keys are not an error.
    async fn remove(&self, key: &str) -> GuardianResult<()>;
}
