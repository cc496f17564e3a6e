//! Job-board domain: entities, slot keys, filtering, the HTTP client, and
//! the specialized resources the portal views mount.

pub mod client;
pub mod filter;
pub mod keys;
pub mod lookups;
pub mod resources;
pub mod types;

pub use client::HttpRemote;
pub use filter::{filter_jobs, FilterCriteria};
pub use keys::BoardSlot;
pub use lookups::LabelCodes;
pub use resources::{BoardRemotes, BoardSession, JobBoard};
pub use types::{Application, ApplicationStatus, Job, LabelCode};
