//! Cache slot naming.

/// Names a resource's cache slot.
///
/// Fixed resources can use a plain stable name. Parameterized resources
/// (per-user, per-employer) should hash their inputs so slot names stay
/// fixed-length and cannot collide across resource types.
pub trait ResourceKey {
  /// Stable storage key for this resource's slot.
  fn slot_name(&self) -> String;

  /// Human-readable form for log messages.
  fn description(&self) -> String;
}
