//! The generic synchronization primitive behind every list view.
//!
//! A [`ListResource`] owns a reactive list of entities, loads it once per
//! session (cache-first, then remote), and patches it optimistically from
//! toggle mutation responses instead of refetching.

mod list;
mod outcome;
mod state;
mod traits;

pub use list::ListResource;
pub use outcome::ToggleOutcome;
pub use state::ListState;
pub use traits::Entity;
