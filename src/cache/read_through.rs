//! Read-through accessor.
//!
//! Check the cache, and on a miss run the loader against the store and cache
//! what it returns. Only successful loads are cached.
//!
//! Two concurrent misses on one key both run their loader and both write the
//! entry; the last write wins. Loads are idempotent, so no single-flight
//! guard is kept.
//!
//! A reader that loaded before a write can also set its pre-write value after
//! the write's invalidation evicted the key. That stale entry is served until
//! its TTL runs out.

use std::future::Future;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::cache::{CacheClient, CacheKey};
use crate::config::TtlPolicy;
use crate::error::{CacheError, StoreError};

// == Cache Source ==
/// Where a read was answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheSource {
    /// Cache hit
    Cache,
    /// Cache miss, loaded from the store
    Store,
    /// The cache was not consulted at all
    Bypassed,
}

/// A value annotated with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    pub value: T,
    pub source: CacheSource,
}

impl<T> Cached<T> {
    pub fn is_hit(&self) -> bool {
        self.source == CacheSource::Cache
    }
}

// == Read Through ==
#[derive(Clone)]
pub struct ReadThrough {
    cache: Arc<dyn CacheClient>,
    ttl: TtlPolicy,
}

impl ReadThrough {
    pub fn new(cache: Arc<dyn CacheClient>, ttl: TtlPolicy) -> Self {
        Self { cache, ttl }
    }

    /// Returns the cached value for `key`, or loads, caches and returns it.
    ///
    /// Loader errors are returned untouched and nothing is written, so a
    /// not-found lookup never leaves a negative entry behind. Cache failures
    /// are logged and the call proceeds as on a miss.
    pub async fn fetch<T, F, Fut>(&self, key: &CacheKey, loader: F) -> Result<Cached<T>, StoreError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T, StoreError>> + Send,
    {
        let rendered = key.render();

        if let Some(value) = self.lookup::<T>(&rendered).await {
            debug!("Cache HIT for key: {}", rendered);
            return Ok(Cached {
                value,
                source: CacheSource::Cache,
            });
        }

        debug!("Cache MISS for key: {}", rendered);
        let value = loader().await?;

        let ttl = self.ttl.for_family(key.family());
        if let Err(e) = self.populate(&rendered, &value, ttl).await {
            warn!("Failed to cache key {}: {}", rendered, e);
        }

        Ok(Cached {
            value,
            source: CacheSource::Store,
        })
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.cache.get(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Cache read failed for key {}, treating as miss: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Dropping undecodable cache entry {}: {}", key, e);
                if let Err(e) = self.cache.delete(key).await {
                    warn!("Failed to drop cache entry {}: {}", key, e);
                }
                None
            }
        }
    }

    async fn populate<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: std::time::Duration,
    ) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.cache.set(key, raw, ttl).await
    }
}
