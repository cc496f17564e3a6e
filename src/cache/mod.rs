//! Populate-once-per-session caching primitives.
//!
//! This module provides the domain-agnostic pieces of the cache layer:
//! - Named cache slots with stable keys
//! - A fetch wrapper that hits the remote at most once per session
//!
//! There is deliberately no TTL and no staleness check. Callers that need
//! freshness clear the slot (e.g. on logout) instead of relying on expiry.

mod fetcher;
mod keys;

pub use fetcher::CachedFetcher;
pub use keys::ResourceKey;
