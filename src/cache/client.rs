//! Cache Client
//!
//! The look-aside cache interface the catalog talks to, and the in-process
//! implementation backed by [`CacheStore`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore};
use crate::error::CacheError;

/// Key-value cache with per-entry TTL.
///
/// Each call is a single atomic key operation; implementations synchronize
/// internally and are shared across requests behind an `Arc`.
#[async_trait]
pub trait CacheClient: Send + Sync {
    /// Returns the live value for `key`, or `None` on a miss.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key` for `ttl`.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;

    /// Removes `key`. Returns whether it was present.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;

    /// Removes every key starting with `prefix`. Returns how many were removed.
    async fn delete_prefix(&self, prefix: &str) -> Result<usize, CacheError>;

    /// Removes every key.
    async fn clear(&self) -> Result<(), CacheError>;

    /// Hit/miss counters and entry totals.
    async fn stats(&self) -> Result<CacheStats, CacheError>;
}

// == In-Memory Cache ==
/// Process-local [`CacheClient`] over a lock-guarded [`CacheStore`].
///
/// Cloning is cheap and every clone sees the same entries.
#[derive(Debug, Clone)]
pub struct InMemoryCache {
    store: Arc<RwLock<CacheStore>>,
}

impl InMemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries))),
        }
    }

    /// Purges expired entries. Used by the background cleanup task.
    pub async fn cleanup_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    /// Remaining lifetime of a live entry.
    pub async fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.store.read().await.ttl_remaining(key)
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl CacheClient for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        // Write lock: a lookup updates counters and access order
        Ok(self.store.write().await.get(key))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.store.write().await.set(key, value, ttl)
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.store.write().await.delete(key))
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<usize, CacheError> {
        Ok(self.store.write().await.delete_prefix(prefix))
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.store.write().await.clear();
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats, CacheError> {
        Ok(self.store.read().await.stats())
    }
}
