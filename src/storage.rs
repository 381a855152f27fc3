// 🗄️ Storage Layer - Key-Value persistence
// Models the browser's origin-scoped localStorage as a pluggable backend:
// string keys, string values, last-writer-wins, no cross-key transactions.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, RwLock};

// ============================================================================
// WELL-KNOWN KEYS
// ============================================================================

/// Keys used by the dashboard, kept verbatim from the persisted layout.
pub mod keys {
    /// Ordered list of registered company profiles.
    pub const REGISTROS_EMPRESAS: &str = "registrosEmpresas";

    /// Session snapshot (versioned envelope).
    pub const AUTH_STORAGE: &str = "auth-storage";

    /// Dashboard client list.
    pub const CLIENTS: &str = "clients";

    /// Cached client count.
    pub const CLIENTS_COUNT: &str = "clientsCount";

    /// Display currency token.
    pub const CURRENCY: &str = "cobrix-currency";

    /// Theme token.
    pub const THEME: &str = "cobrix-theme";
}

// ============================================================================
// BACKEND TRAIT
// ============================================================================

/// Single access point for persisted state.
///
/// Every component reads and writes through this trait instead of touching
/// its own storage, so parsing and serialization live in one place.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Unconditional overwrite. Last writer wins.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    fn keys(&self) -> Result<Vec<String>>;
}

/// Read a JSON-encoded value.
///
/// Absent keys, backend failures and malformed JSON all collapse to `None`:
/// callers treat bad persisted data as "not found", never as an error.
pub fn get_json<T: DeserializeOwned>(storage: &dyn StorageBackend, key: &str) -> Option<T> {
    let raw = storage.get(key).ok().flatten()?;
    serde_json::from_str(&raw).ok()
}

/// Write a value as JSON.
pub fn set_json<T: Serialize>(storage: &dyn StorageBackend, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)
        .with_context(|| format!("Failed to serialize value for key '{}'", key))?;
    storage.set(key, &raw)
}

// ============================================================================
// IN-MEMORY BACKEND
// ============================================================================

/// HashMap-backed storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().unwrap();
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = self.entries.read().unwrap();
        Ok(entries.keys().cloned().collect())
    }
}

// ============================================================================
// SQLITE BACKEND
// ============================================================================

/// Durable storage backed by a single SQLite key-value table.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open (or create) the store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("Failed to open store at {:?}", path.as_ref()))?;
        Self::from_connection(conn)
    }

    /// In-process store with no file behind it.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        // Enable WAL mode for crash recovery
        conn.pragma_update(None, "journal_mode", "WAL")?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        Ok(SqliteStorage {
            conn: Mutex::new(conn),
        })
    }
}

impl StorageBackend for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT value FROM kv_store WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;

        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

// ============================================================================
// TESTS
// ============================================================================
