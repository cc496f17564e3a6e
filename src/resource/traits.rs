//! Entity contract for cached collections.

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

/// Trait for entities managed by a list resource.
///
/// The cache layer treats entities as opaque except for one requirement: a
/// stable unique identifier, used to target removals and drive presence
/// checks.
pub trait Entity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static {
  /// Stable unique identifier type.
  type Id: Clone + PartialEq + Debug + Send + Sync + 'static;

  /// Unique identifier for this entity.
  fn id(&self) -> Self::Id;
}
