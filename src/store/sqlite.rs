//! SQLite-backed session store.
//!
//! The database is in-memory, so the store lives exactly as long as the
//! session. Useful when slot contents get large enough that a single mutexed
//! map starts to hurt, or when SQL visibility into the cache helps debugging.

use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, Connection};
use std::sync::Mutex;
use tracing::warn;

use super::KeyValueStore;

/// Schema for the session store.
const KV_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Session store backed by an in-memory SQLite database.
pub struct SqliteStore {
  conn: Mutex<Connection>,
}

impl SqliteStore {
  /// Open a fresh, empty session store.
  pub fn open() -> Result<Self> {
    let conn =
      Connection::open_in_memory().map_err(|e| eyre!("Failed to open session store: {}", e))?;

    conn
      .execute_batch(KV_SCHEMA)
      .map_err(|e| eyre!("Failed to run session store migrations: {}", e))?;

    Ok(Self {
      conn: Mutex::new(conn),
    })
  }
}

impl KeyValueStore for SqliteStore {
  fn get_raw(&self, key: &str) -> Option<String> {
    let conn = self.conn.lock().ok()?;
    conn
      .query_row("SELECT value FROM kv WHERE key = ?", params![key], |row| {
        row.get(0)
      })
      .ok()
  }

  fn set_raw(&self, key: &str, value: &str) {
    let conn = match self.conn.lock() {
      Ok(conn) => conn,
      Err(_) => return,
    };
    if let Err(e) = conn.execute(
      "INSERT OR REPLACE INTO kv (key, value) VALUES (?, ?)",
      params![key, value],
    ) {
      warn!("Failed to write session store entry {}: {}", key, e);
    }
  }

  fn delete(&self, key: &str) {
    let conn = match self.conn.lock() {
      Ok(conn) => conn,
      Err(_) => return,
    };
    if let Err(e) = conn.execute("DELETE FROM kv WHERE key = ?", params![key]) {
      warn!("Failed to delete session store entry {}: {}", key, e);
    }
  }
}
