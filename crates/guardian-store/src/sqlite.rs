//! SQLite-backed key-value persistence.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};

use guardian_core::errors::{GuardianResult, StoreError};
use guardian_core::traits::IKeyValueStore;

/// `IKeyValueStore` backed by a single-table SQLite database.
///
/// rusqlite is synchronous, so every operation hops to the blocking pool;
/// the connection is mutex-guarded for exclusive access.
pub struct SqliteKeyValueStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteKeyValueStore {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path) -> GuardianResult<Self> {
        let conn = Connection::open(path).map_err(backend_err)?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(backend_err)?;
        Self::initialize(conn)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> GuardianResult<Self> {
        let conn = Connection::open_in_memory().map_err(backend_err)?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> GuardianResult<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .map_err(backend_err)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> GuardianResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|e| StoreError::BackendError {
                message: format!("connection lock poisoned: {e}"),
            })?;
            f(&guard).map_err(backend_err)
        })
        .await
        .map_err(|e| StoreError::BackendError {
            message: format!("blocking task failed: {e}"),
        })?
        .map_err(Into::into)
    }
}

#[async_trait]
impl IKeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> GuardianResult<Option<String>> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            conn.query_row("SELECT value FROM kv WHERE key = ?1", [&key], |row| {
                row.get(0)
            })
            .optional()
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> GuardianResult<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                [&key, &value],
            )
            .map(|_| ())
        })
        .await
    }

    async fn remove(&self, key: &str) -> GuardianResult<()> {
        let key = key.to_string();
        self.with_conn(move |conn| conn.execute("DELETE FROM kv WHERE key = ?1", [&key]).map(|_| ()))
            .await
    }
}

fn backend_err(e: rusqlite::Error) -> StoreError {
    StoreError::BackendError {
        message: e.to_string(),
    }
}
