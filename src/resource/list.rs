//! Cached, reactive list resources with optimistic toggle mutations.

use color_eyre::{eyre::eyre, Result};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::cache::ResourceKey;
use crate::remote::RemoteOps;
use crate::store::{self, KeyValueStore};

use super::outcome::ToggleOutcome;
use super::state::ListState;
use super::traits::Entity;

/// A named, cached, synchronized collection of entities of one type.
///
/// The resource is the sole writer of both its cache slot and its in-memory
/// state; views subscribe through [`ListResource::subscribe`] and re-render
/// on change. After any successful operation the slot value equals `items`.
///
/// Overlapping `refetch`/`toggle` calls are not sequenced - their post-await
/// writes land in arrival order and the last one wins. The UI issues
/// mutations serially (one toggle per click, the control disabled while
/// `updating` is set), and this layer relies on that discipline. Calls
/// cannot be cancelled once issued.
///
/// Share a resource by wrapping it in `Arc`; all methods take `&self`.
pub struct ListResource<T: Entity> {
  slot: String,
  label: String,
  store: Arc<dyn KeyValueStore>,
  ops: Arc<dyn RemoteOps<T>>,
  state: watch::Sender<ListState<T>>,
}

impl<T: Entity> ListResource<T> {
  /// Create a resource bound to a cache slot and a remote implementation.
  pub fn new(key: &dyn ResourceKey, store: Arc<dyn KeyValueStore>, ops: Arc<dyn RemoteOps<T>>) -> Self {
    let (state, _) = watch::channel(ListState::default());
    Self {
      slot: key.slot_name(),
      label: key.description(),
      store,
      ops,
      state,
    }
  }

  /// Watch the resource state; the receiver observes every change.
  pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
    self.state.subscribe()
  }

  /// Snapshot of the current state.
  pub fn state(&self) -> ListState<T> {
    self.state.borrow().clone()
  }

  /// Snapshot of the current items.
  pub fn items(&self) -> Vec<T> {
    self.state.borrow().items.clone()
  }

  /// Whether an entity with this id is currently in the collection.
  ///
  /// A derived presence check, not a guard: `toggle` never consults it, the
  /// server alone decides whether a mutation adds or removes.
  pub fn contains(&self, id: &T::Id) -> bool {
    self.state.borrow().items.iter().any(|item| item.id() == *id)
  }

  /// Cache-first load.
  ///
  /// A cache hit fills `items` without a loading flicker and never touches
  /// the remote. A miss flags `loading`, calls the remote, and persists the
  /// result to the slot and to `items` in the same step. A failed load
  /// keeps the last known items, records the error on the state, and
  /// returns it; the view offers retry by calling this again.
  pub async fn refetch(&self) -> Result<()> {
    if let Some(cached) = store::get::<Vec<T>>(self.store.as_ref(), &self.slot) {
      debug!("Cache hit for {}", self.label);
      self.state.send_modify(|state| {
        state.items = cached;
        state.error = None;
      });
      return Ok(());
    }

    debug!("Cache miss for {}, fetching", self.label);
    self.state.send_modify(|state| state.loading = true);

    match self.ops.fetch_all().await {
      Ok(response) if response.success => {
        let items = response.data.unwrap_or_default();
        store::set(self.store.as_ref(), &self.slot, &items);
        self.state.send_modify(|state| {
          state.items = items;
          state.loading = false;
          state.error = None;
        });
        Ok(())
      }
      Ok(response) => {
        let message = response
          .message
          .unwrap_or_else(|| format!("Failed to load {}", self.label));
        self.fail_load(message)
      }
      Err(e) => self.fail_load(format!("Failed to load {}: {}", self.label, e)),
    }
  }

  /// Optimistic toggle mutation: one round trip, the response decides
  /// whether the entity was added or removed.
  ///
  /// On an add, the returned entity is appended to the slot (seeding an
  /// empty list when no slot exists yet) and to `items`. On a remove, both
  /// are filtered by id. On failure nothing changes locally and the error
  /// is returned for the caller to surface. The `updating` flag is cleared
  /// on every exit path.
  pub async fn toggle(&self, id: T::Id, patch: Value) -> Result<ToggleOutcome<T>> {
    self.state.send_modify(|state| state.updating = true);
    let _guard = ClearUpdating(&self.state);

    let response = self
      .ops
      .toggle(id.clone(), patch)
      .await
      .map_err(|e| eyre!("Failed to toggle {}: {}", self.label, e))?;

    let outcome = ToggleOutcome::from_response(id, response);
    match &outcome {
      ToggleOutcome::Added(entity) => {
        let mut cached =
          store::get::<Vec<T>>(self.store.as_ref(), &self.slot).unwrap_or_default();
        cached.push(entity.clone());
        store::set(self.store.as_ref(), &self.slot, &cached);

        let entity = entity.clone();
        self.state.send_modify(|state| state.items.push(entity));
      }
      ToggleOutcome::Removed(removed_id) => {
        let cached =
          store::get::<Vec<T>>(self.store.as_ref(), &self.slot).unwrap_or_default();
        let remaining: Vec<T> = cached
          .into_iter()
          .filter(|item| item.id() != *removed_id)
          .collect();
        store::set(self.store.as_ref(), &self.slot, &remaining);

        let removed_id = removed_id.clone();
        self
          .state
          .send_modify(|state| state.items.retain(|item| item.id() != removed_id));
      }
      ToggleOutcome::Failed(message) => {
        warn!("Toggle rejected for {}: {}", self.label, message);
        return Err(eyre!(message.clone()));
      }
    }

    Ok(outcome)
  }

  /// Drop the cache slot so the next `refetch` goes to the remote.
  pub fn invalidate(&self) {
    self.store.delete(&self.slot);
  }

  fn fail_load(&self, message: String) -> Result<()> {
    warn!("Load failed for {}: {}", self.label, message);
    self.state.send_modify(|state| {
      state.loading = false;
      state.error = Some(message.clone());
    });
    Err(eyre!(message))
  }
}

/// Clears the `updating` flag when dropped, so early returns and errors
/// can't leave the flag stuck.
struct ClearUpdating<'a, T: Entity>(&'a watch::Sender<ListState<T>>);

impl<T: Entity> Drop for ClearUpdating<'_, T> {
  fn drop(&mut self) {
    self.0.send_modify(|state| state.updating = false);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::remote::ApiResponse;
  use crate::store::MemoryStore;
  use futures::future::BoxFuture;
  use serde::{Deserialize, Serialize};
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Mutex;

  #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
  struct Item {
    id: u64,
    name: String,
  }

  impl Entity for Item {
    type Id = u64;

    fn id(&self) -> u64 {
      self.id
    }
  }

  fn item(id: u64, name: &str) -> Item {
    Item {
      id,
      name: name.to_string(),
    }
  }

  struct TestKey;

  impl ResourceKey for TestKey {
    fn slot_name(&self) -> String {
      "test-items".to_string()
    }

    fn description(&self) -> String {
      "test items".to_string()
    }
  }

  /// Remote double with scripted responses and call counters.
  struct FakeRemote {
    fetch_count: AtomicUsize,
    fetch_response: Result<ApiResponse<Vec<Item>>, String>,
    toggle_responses: Mutex<Vec<ApiResponse<Item>>>,
  }

  impl FakeRemote {
    fn fetching(items: Vec<Item>) -> Self {
      Self {
        fetch_count: AtomicUsize::new(0),
        fetch_response: Ok(ApiResponse::ok(items)),
        toggle_responses: Mutex::new(Vec::new()),
      }
    }

    fn failing(message: &str) -> Self {
      Self {
        fetch_count: AtomicUsize::new(0),
        fetch_response: Ok(ApiResponse::failed(message)),
        toggle_responses: Mutex::new(Vec::new()),
      }
    }

    fn with_toggles(mut self, responses: Vec<ApiResponse<Item>>) -> Self {
      self.toggle_responses = Mutex::new(responses);
      self
    }
  }

  impl RemoteOps<Item> for FakeRemote {
    fn fetch_all(&self) -> BoxFuture<'_, Result<ApiResponse<Vec<Item>>>> {
      self.fetch_count.fetch_add(1, Ordering::SeqCst);
      let response = self.fetch_response.clone();
      Box::pin(async move { response.map_err(|e| eyre!(e)) })
    }

    fn toggle(&self, _id: u64, _patch: Value) -> BoxFuture<'_, Result<ApiResponse<Item>>> {
      let response = self.toggle_responses.lock().unwrap().remove(0);
      Box::pin(async move { Ok(response) })
    }
  }

  fn resource(store: Arc<dyn KeyValueStore>, remote: Arc<FakeRemote>) -> ListResource<Item> {
    ListResource::new(&TestKey, store, remote)
  }

  #[tokio::test]
  async fn test_cache_hit_skips_the_remote() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let cached = vec![item(1, "cached")];
    store::set(store.as_ref(), "test-items", &cached);

    let remote = Arc::new(FakeRemote::fetching(vec![item(2, "remote")]));
    let resource = resource(store, remote.clone());

    resource.refetch().await.unwrap();

    assert_eq!(remote.fetch_count.load(Ordering::SeqCst), 0);
    assert_eq!(resource.items(), cached);
    assert!(!resource.state().loading);
  }

  #[tokio::test]
  async fn test_cache_miss_populates_slot_and_items() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let fetched = vec![item(1, "a"), item(2, "b")];
    let remote = Arc::new(FakeRemote::fetching(fetched.clone()));
    let resource = resource(store.clone(), remote.clone());

    resource.refetch().await.unwrap();

    assert_eq!(remote.fetch_count.load(Ordering::SeqCst), 1);
    assert_eq!(resource.items(), fetched);
    assert_eq!(
      store::get::<Vec<Item>>(store.as_ref(), "test-items"),
      Some(fetched)
    );
    let state = resource.state();
    assert!(!state.loading);
    assert_eq!(state.error, None);
  }

  #[tokio::test]
  async fn test_failed_load_keeps_last_items_and_records_error() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let remote = Arc::new(FakeRemote::failing("server exploded"));
    let resource = resource(store.clone(), remote);

    // Seed in-memory state, then drop the slot so the next load misses
    store::set(store.as_ref(), "test-items", &vec![item(1, "old")]);
    resource.refetch().await.unwrap();
    resource.invalidate();

    assert!(resource.refetch().await.is_err());

    let state = resource.state();
    assert_eq!(state.items, vec![item(1, "old")]);
    assert_eq!(state.error.as_deref(), Some("server exploded"));
    assert!(!state.loading);
  }

  #[tokio::test]
  async fn test_toggle_add_then_remove_restores_the_set() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let base = vec![item(1, "base")];
    let remote = Arc::new(FakeRemote::fetching(base.clone()).with_toggles(vec![
      ApiResponse::ok(item(7, "saved")),
      ApiResponse::removed(),
    ]));
    let resource = resource(store.clone(), remote);
    resource.refetch().await.unwrap();

    let outcome = resource.toggle(7, Value::Null).await.unwrap();
    assert!(matches!(outcome, ToggleOutcome::Added(_)));
    assert!(resource.contains(&7));
    assert_eq!(
      store::get::<Vec<Item>>(store.as_ref(), "test-items"),
      Some(vec![item(1, "base"), item(7, "saved")])
    );

    let outcome = resource.toggle(7, Value::Null).await.unwrap();
    assert!(matches!(outcome, ToggleOutcome::Removed(7)));
    assert!(!resource.contains(&7));
    assert_eq!(resource.items(), base);
    assert_eq!(
      store::get::<Vec<Item>>(store.as_ref(), "test-items"),
      Some(base)
    );
    assert!(!resource.state().updating);
  }

  #[tokio::test]
  async fn test_toggle_add_seeds_an_empty_slot() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let remote = Arc::new(
      FakeRemote::fetching(Vec::new()).with_toggles(vec![ApiResponse::ok(item(3, "first"))]),
    );
    let resource = resource(store.clone(), remote);

    // No refetch, no slot: the add must create the list
    resource.toggle(3, Value::Null).await.unwrap();

    assert_eq!(resource.items(), vec![item(3, "first")]);
    assert_eq!(
      store::get::<Vec<Item>>(store.as_ref(), "test-items"),
      Some(vec![item(3, "first")])
    );
  }

  #[tokio::test]
  async fn test_failed_toggle_is_a_no_op() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let base = vec![item(1, "base")];
    let remote = Arc::new(
      FakeRemote::fetching(base.clone())
        .with_toggles(vec![ApiResponse::failed("already closed")]),
    );
    let resource = resource(store.clone(), remote);
    resource.refetch().await.unwrap();

    let before_slot = store.get_raw("test-items");
    let err = resource.toggle(1, Value::Null).await.unwrap_err();

    assert_eq!(err.to_string(), "already closed");
    assert_eq!(resource.items(), base);
    assert_eq!(store.get_raw("test-items"), before_slot);
    assert!(!resource.state().updating);
  }

  #[tokio::test]
  async fn test_toggle_rejected_for_read_only_resources() {
    struct ReadOnly;

    impl RemoteOps<Item> for ReadOnly {
      fn fetch_all(&self) -> BoxFuture<'_, Result<ApiResponse<Vec<Item>>>> {
        Box::pin(async { Ok(ApiResponse::ok(Vec::new())) })
      }
    }

    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let resource: ListResource<Item> = ListResource::new(&TestKey, store, Arc::new(ReadOnly));

    assert!(resource.toggle(1, Value::Null).await.is_err());
    assert!(!resource.state().updating);
  }

  #[tokio::test]
  async fn test_subscribers_observe_changes() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let remote = Arc::new(FakeRemote::fetching(vec![item(1, "a")]));
    let resource = resource(store, remote);

    let mut rx = resource.subscribe();
    resource.refetch().await.unwrap();

    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().items, vec![item(1, "a")]);
  }
}
