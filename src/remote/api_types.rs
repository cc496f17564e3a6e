//! Transport envelope shared by every remote operation.

use serde::{Deserialize, Serialize};

/// Envelope the remote responds with for both bulk fetches and mutations.
///
/// A toggle mutation overloads add and remove onto this one shape: a
/// response carrying `data` means the relation was attached, a bare success
/// means it was detached. [`crate::resource::ToggleOutcome`] turns that
/// convention into an explicit tagged result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
  pub success: bool,
  #[serde(default)]
  pub message: Option<String>,
  #[serde(default)]
  pub data: Option<T>,
}

impl<T> ApiResponse<T> {
  /// Successful response carrying a payload.
  pub fn ok(data: T) -> Self {
    Self {
      success: true,
      message: None,
      data: Some(data),
    }
  }

  /// Successful response with no payload (a detached relation).
  pub fn removed() -> Self {
    Self {
      success: true,
      message: None,
      data: None,
    }
  }

  /// Failed response with a user-facing message.
  pub fn failed(message: impl Into<String>) -> Self {
    Self {
      success: false,
      message: Some(message.into()),
      data: None,
    }
  }
}
