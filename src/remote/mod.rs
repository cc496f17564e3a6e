//! External interfaces to the remote API.
//!
//! The cache layer does not define wire formats. It consumes two narrow
//! async capabilities - bulk fetch and toggle mutation - behind a strategy
//! trait, so the caller decides at construction time whether to inject the
//! real HTTP client, a simulated remote, or a test double.

mod api_types;
mod ops;

pub use api_types::ApiResponse;
pub use ops::RemoteOps;
