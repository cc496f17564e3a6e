//! In-memory store implementations.

use std::collections::HashMap;
use std::sync::Mutex;

use super::KeyValueStore;

/// The default session store: a mutex-guarded map that lives exactly as long
/// as the process, matching the sessionStorage semantics the cache design
/// assumes.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl KeyValueStore for MemoryStore {
  fn get_raw(&self, key: &str) -> Option<String> {
    self.entries.lock().ok()?.get(key).cloned()
  }

  fn set_raw(&self, key: &str, value: &str) {
    if let Ok(mut entries) = self.entries.lock() {
      entries.insert(key.to_string(), value.to_string());
    }
  }

  fn delete(&self, key: &str) {
    if let Ok(mut entries) = self.entries.lock() {
      entries.remove(key);
    }
  }
}

/// Store implementation that doesn't cache anything.
/// Used when caching is disabled - all operations are no-ops.
#[derive(Debug, Default)]
pub struct NoopStore;

impl KeyValueStore for NoopStore {
  fn get_raw(&self, _key: &str) -> Option<String> {
    None // Always miss
  }

  fn set_raw(&self, _key: &str, _value: &str) {
    // Discard
  }

  fn delete(&self, _key: &str) {}
}
