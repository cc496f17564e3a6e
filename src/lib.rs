//! Client-side cache and synchronization layer for a job-board application.
//!
//! The crate answers three questions for list-oriented resources (active
//! jobs, saved jobs, owned postings, applications): when to fetch versus
//! serve from the session cache, how a toggle mutation patches that cache
//! from its own response without a refetch, and how an unfiltered collection
//! becomes paginated, filtered views without extra round-trips.
//!
//! The layering, leaf-first: [`store`] holds the session-scoped slots,
//! [`cache`] populates them once per session, [`resource`] keeps a reactive
//! list in sync with its slot and the remote, [`view`] slices derived pages,
//! and [`board`] binds it all to the job-board domain.
//!
//! # Example
//!
//! ```ignore
//! use jobsync::{BoardRemotes, BoardSession, JobBoard, MemoryStore};
//!
//! let config = jobsync::config::Config::load(None)?;
//! let store = config.session_store()?;
//! let remote = std::sync::Arc::new(jobsync::board::HttpRemote::new(&config)?);
//!
//! let session = BoardSession::student(user_id);
//! let board = JobBoard::new(session, store, BoardRemotes::http(remote, &session));
//!
//! board.saved.refetch().await?;
//! board.toggle_saved(job_id, serde_json::json!({ "user_id": user_id })).await?;
//! ```

pub mod board;
pub mod cache;
pub mod config;
pub mod remote;
pub mod resource;
pub mod store;
pub mod view;

pub use board::{BoardRemotes, BoardSession, FilterCriteria, JobBoard, LabelCodes};
pub use cache::{CachedFetcher, ResourceKey};
pub use config::Config;
pub use remote::{ApiResponse, RemoteOps};
pub use resource::{Entity, ListResource, ListState, ToggleOutcome};
pub use store::{KeyValueStore, MemoryStore, NoopStore, SqliteStore};
pub use view::{page_count, paginate, Page};
