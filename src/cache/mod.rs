//! Cache Module
//!
//! Look-aside caching in front of the property store: key strategy,
//! TTL-bounded in-memory storage, and the read-through accessor.

mod client;
mod entry;
pub mod keys;
mod read_through;
mod stats;
mod store;


use std::time::Duration;

// Re-export public types
pub use client::{CacheClient, InMemoryCache};
pub use entry::CacheEntry;
pub use keys::{detail_key, list_key, search_key, CacheKey, KeyFamily, SEARCH_PREFIX};
pub use read_through::{CacheSource, Cached, ReadThrough};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 512;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 8 * 1024 * 1024; // 8 MB

/// Longest lifetime an entry can be given; longer TTLs are capped to it
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);
