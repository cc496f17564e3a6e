//! Tagged outcome of a toggle mutation.

use crate::remote::ApiResponse;

use super::traits::Entity;

/// What a toggle round-trip did.
///
/// The transport reports add and remove through one response shape; this
/// enum makes the three-way branch explicit so the state machine can be
/// matched exhaustively and tested independent of the wire format.
#[derive(Debug, Clone)]
pub enum ToggleOutcome<T: Entity> {
  /// The remote attached the relation and returned the entity to append.
  Added(T),
  /// The remote detached the relation for this id.
  Removed(T::Id),
  /// The remote rejected the mutation; no local state may change.
  Failed(String),
}

impl<T: Entity> ToggleOutcome<T> {
  /// Classify a transport response against the id the mutation targeted.
  ///
  /// A response carrying an entity is an add regardless of anything else; a
  /// bare success is a remove of the targeted id; everything else failed.
  pub fn from_response(id: T::Id, response: ApiResponse<T>) -> Self {
    match response {
      ApiResponse {
        data: Some(entity), ..
      } => Self::Added(entity),
      ApiResponse { success: true, .. } => Self::Removed(id),
      ApiResponse { message, .. } => {
        Self::Failed(message.unwrap_or_else(|| "Mutation failed".to_string()))
      }
    }
  }
}
