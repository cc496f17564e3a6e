//! Fetch wrapper with a named cache slot.

use color_eyre::Result;
use futures::future::BoxFuture;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

use crate::store::{self, KeyValueStore};

/// Factory closure producing the fetch future.
type FetchFn<T> = Box<dyn Fn() -> BoxFuture<'static, Result<T>> + Send + Sync>;

/// Wraps a zero-argument async fetch with a named cache slot.
///
/// The first `run()` invokes the fetch and populates the slot; later calls
/// return the cached value without touching the remote until the slot is
/// explicitly cleared. A failed fetch propagates and leaves the slot
/// untouched, so the next call retries.
///
/// Two `run()` calls racing before the first resolves will both invoke the
/// fetch and the second write wins. Callers that can't tolerate the double
/// fetch must serialize their calls.
pub struct CachedFetcher<T> {
  name: String,
  store: Arc<dyn KeyValueStore>,
  fetch: FetchFn<T>,
}

impl<T> CachedFetcher<T>
where
  T: Serialize + DeserializeOwned,
{
  /// Create a fetcher for the named slot.
  pub fn new<F, Fut>(name: impl Into<String>, store: Arc<dyn KeyValueStore>, fetch: F) -> Self
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
  {
    Self {
      name: name.into(),
      store,
      fetch: Box::new(move || Box::pin(fetch())),
    }
  }

  /// Return the cached value if present, otherwise fetch, store, and return.
  pub async fn run(&self) -> Result<T> {
    if let Some(cached) = store::get::<T>(self.store.as_ref(), &self.name) {
      debug!("Cache hit for {}", self.name);
      return Ok(cached);
    }

    debug!("Cache miss for {}, fetching", self.name);
    let value = (self.fetch)().await?;
    store::set(self.store.as_ref(), &self.name, &value);
    Ok(value)
  }

  /// Drop the cached value so the next `run()` fetches again.
  pub fn invalidate(&self) {
    self.store.delete(&self.name);
  }
}
