//! Remote operations consumed by list resources.

use color_eyre::{eyre::eyre, Result};
use futures::future::BoxFuture;
use serde_json::Value;

use crate::resource::Entity;

use super::api_types::ApiResponse;

/// The two async capabilities a list resource consumes.
///
/// Implementations are injected at construction time; the cache layer never
/// constructs one itself. Every call is a suspension point - the cache-check
/// and state-write steps around it stay synchronous.
pub trait RemoteOps<T: Entity>: Send + Sync {
  /// Bulk collection fetch.
  fn fetch_all(&self) -> BoxFuture<'_, Result<ApiResponse<Vec<T>>>>;

  /// Single-entity add/remove mutation. The response shape decides which of
  /// the two happened. Read-only resources keep the default, which rejects
  /// the call.
  fn toggle(&self, id: T::Id, patch: Value) -> BoxFuture<'_, Result<ApiResponse<T>>> {
    let _ = (id, patch);
    Box::pin(async { Err(eyre!("This resource does not support toggle mutations")) })
  }
}
