//! Session-scoped key/value storage backing the cache slots.
//!
//! The store is the only shared mutable state under the cache layer. Each
//! resource owns its slot name and is the sole writer for it, which keeps
//! slots and in-memory state consistent without a locking protocol.

mod memory;
mod sqlite;

pub use memory::{MemoryStore, NoopStore};
pub use sqlite::SqliteStore;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

/// String-keyed, JSON-capable store scoped to the current session.
///
/// Implementations absorb their own failures: a missing or unreadable key is
/// a miss, and a failed write is dropped. Nothing at this boundary raises.
pub trait KeyValueStore: Send + Sync {
  /// Raw string lookup. `None` on a missing key.
  fn get_raw(&self, key: &str) -> Option<String>;

  /// Raw string write.
  fn set_raw(&self, key: &str, value: &str);

  /// Remove a key. Removing a missing key is a no-op.
  fn delete(&self, key: &str);
}

/// Read a JSON value from the store. A missing or corrupt entry is a miss.
pub fn get<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
  let raw = store.get_raw(key)?;
  match serde_json::from_str(&raw) {
    Ok(value) => Some(value),
    Err(e) => {
      warn!("Discarding corrupt cache entry for {}: {}", key, e);
      None
    }
  }
}

/// Write a JSON value to the store. A value that fails to serialize drops
/// the write rather than failing the operation that produced it.
pub fn set<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
  match serde_json::to_string(value) {
    Ok(raw) => store.set_raw(key, &raw),
    Err(e) => warn!("Failed to serialize cache entry for {}: {}", key, e),
  }
}
