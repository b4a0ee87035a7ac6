//! Cache Entry Module
//!
//! A cached JSON payload with its expiry instant.

use std::time::Duration;

use tokio::time::Instant;

use crate::cache::MAX_TTL;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
///
/// Instants come from `tokio::time`, so a paused test runtime controls expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Serialized value
    pub value: String,
    /// When the entry stops being served
    pub expires_at: Instant,
    /// Logical access tick, used to pick the least recently used entry
    pub last_access: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry that lives for `ttl`, capped at [`MAX_TTL`].
    pub fn new(value: String, ttl: Duration, tick: u64) -> Self {
        let now = Instant::now();
        Self {
            value,
            expires_at: now + ttl.min(MAX_TTL),
            last_access: tick,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its expiry instant,
    /// so an entry written with TTL `T` is gone exactly when `T` has elapsed.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Expiry check against a caller-supplied instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
