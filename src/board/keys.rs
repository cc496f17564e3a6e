//! Cache slot keys for board resources.

use sha2::{Digest, Sha256};

use crate::cache::ResourceKey;

/// Cache slots for the board's resources.
///
/// Per-user and per-employer slots hash their parameters so slot names stay
/// fixed-length and can't collide across resource types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardSlot {
  /// All active postings, shared across the portal
  ActiveJobs,
  /// Jobs a student has saved
  SavedJobs { user_id: u64 },
  /// Postings an employer owns
  OwnedJobs { employer_id: u64 },
  /// A student's submitted applications
  Applications { user_id: u64 },
  /// Job type label/code lookup table
  JobTypes,
  /// Work mode label/code lookup table
  WorkModes,
}

impl ResourceKey for BoardSlot {
  fn slot_name(&self) -> String {
    match self {
      Self::ActiveJobs => "active-jobs".to_string(),
      Self::JobTypes => "job-types".to_string(),
      Self::WorkModes => "work-modes".to_string(),
      Self::SavedJobs { user_id } => hashed("saved_jobs", *user_id),
      Self::OwnedJobs { employer_id } => hashed("owned_jobs", *employer_id),
      Self::Applications { user_id } => hashed("applications", *user_id),
    }
  }

  fn description(&self) -> String {
    match self {
      Self::ActiveJobs => "active jobs".to_string(),
      Self::JobTypes => "job types".to_string(),
      Self::WorkModes => "work modes".to_string(),
      Self::SavedJobs { user_id } => format!("saved jobs for user {}", user_id),
      Self::OwnedJobs { employer_id } => format!("jobs owned by employer {}", employer_id),
      Self::Applications { user_id } => format!("applications for user {}", user_id),
    }
  }
}

/// SHA256 hash for stable, fixed-length keys.
fn hashed(prefix: &str, id: u64) -> String {
  let mut hasher = Sha256::new();
  hasher.update(format!("{}:{}", prefix, id).as_bytes());
  format!("{}:{}", prefix, hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_fixed_slots_use_plain_names() {
    assert_eq!(BoardSlot::ActiveJobs.slot_name(), "active-jobs");
    assert_eq!(BoardSlot::JobTypes.slot_name(), "job-types");
  }

  #[test]
  fn test_hashed_slots_are_stable() {
    let a = BoardSlot::SavedJobs { user_id: 42 }.slot_name();
    let b = BoardSlot::SavedJobs { user_id: 42 }.slot_name();
    assert_eq!(a, b);
  }

  #[test]
  fn test_hashed_slots_do_not_collide() {
    let users = BoardSlot::SavedJobs { user_id: 1 }.slot_name();
    let other_user = BoardSlot::SavedJobs { user_id: 2 }.slot_name();
    assert_ne!(users, other_user);

    // Same id, different resource type
    let owned = BoardSlot::OwnedJobs { employer_id: 1 }.slot_name();
    assert_ne!(users, owned);
  }
}
