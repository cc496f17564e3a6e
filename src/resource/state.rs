//! Reactive state snapshot for list resources.

/// Snapshot of a resource's list and in-flight flags.
///
/// `items` is the source of truth for rendering and is kept consistent with
/// the backing cache slot: every write to one is mirrored to the other in
/// the same operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
  /// Current collection contents
  pub items: Vec<T>,
  /// A remote load is in flight. Cache hits fill `items` without setting
  /// this, so served-from-cache views don't flicker.
  pub loading: bool,
  /// Last load failure, cleared by the next successful load
  pub error: Option<String>,
  /// A toggle mutation is in flight; callers disable the triggering control
  /// while this is set
  pub updating: bool,
}

impl<T> Default for ListState<T> {
  fn default() -> Self {
    Self {
      items: Vec::new(),
      loading: false,
      error: None,
      updating: false,
    }
  }
}

impl<T> ListState<T> {
  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}
