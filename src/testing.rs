//! Test doubles for the cache and store seams.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Barrier;

use crate::cache::{CacheClient, CacheStats};
use crate::error::{CacheError, StoreError};
use crate::models::{NewProperty, Property, PropertyFilter, PropertyId, PropertyUpdate};
use crate::store::PropertyStore;

// == Failing Cache ==
/// Cache whose every operation reports the backend as unreachable.
pub struct FailingCache;

fn unreachable_cache<T>() -> Result<T, CacheError> {
    Err(CacheError::Unavailable("connection refused".to_string()))
}

#[async_trait]
impl CacheClient for FailingCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        unreachable_cache()
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), CacheError> {
        unreachable_cache()
    }

    async fn delete(&self, _key: &str) -> Result<bool, CacheError> {
        unreachable_cache()
    }

    async fn delete_prefix(&self, _prefix: &str) -> Result<usize, CacheError> {
        unreachable_cache()
    }

    async fn clear(&self) -> Result<(), CacheError> {
        unreachable_cache()
    }

    async fn stats(&self) -> Result<CacheStats, CacheError> {
        unreachable_cache()
    }
}

// == Counting Cache ==
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheCalls {
    pub gets: usize,
    pub sets: usize,
    pub deletes: usize,
    pub prefix_deletes: usize,
    pub clears: usize,
    pub stats: usize,
}

impl CacheCalls {
    pub fn total(&self) -> usize {
        self.gets + self.sets + self.deletes + self.prefix_deletes + self.clears + self.stats
    }
}

/// Wraps a cache and counts calls per operation.
pub struct CountingCache<C> {
    inner: C,
    gets: AtomicUsize,
    sets: AtomicUsize,
    deletes: AtomicUsize,
    prefix_deletes: AtomicUsize,
    clears: AtomicUsize,
    stats: AtomicUsize,
}

impl<C> CountingCache<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            gets: AtomicUsize::new(0),
            sets: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            prefix_deletes: AtomicUsize::new(0),
            clears: AtomicUsize::new(0),
            stats: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> CacheCalls {
        CacheCalls {
            gets: self.gets.load(Ordering::SeqCst),
            sets: self.sets.load(Ordering::SeqCst),
            deletes: self.deletes.load(Ordering::SeqCst),
            prefix_deletes: self.prefix_deletes.load(Ordering::SeqCst),
            clears: self.clears.load(Ordering::SeqCst),
            stats: self.stats.load(Ordering::SeqCst),
        }
    }
}

#[async_trait]
impl<C: CacheClient> CacheClient for CountingCache<C> {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(key).await
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<usize, CacheError> {
        self.prefix_deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_prefix(prefix).await
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.inner.clear().await
    }

    async fn stats(&self) -> Result<CacheStats, CacheError> {
        self.stats.fetch_add(1, Ordering::SeqCst);
        self.inner.stats().await
    }
}

// == Counting Store ==
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCalls {
    pub gets: usize,
    pub lists: usize,
    pub writes: usize,
}

impl StoreCalls {
    pub fn total(&self) -> usize {
        self.gets + self.lists + self.writes
    }
}

/// Wraps a store and counts calls. Optionally holds every `get` at a barrier
/// so concurrent callers are forced to overlap.
pub struct CountingStore<S> {
    inner: S,
    gets: AtomicUsize,
    lists: AtomicUsize,
    writes: AtomicUsize,
    get_barrier: Option<Arc<Barrier>>,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            gets: AtomicUsize::new(0),
            lists: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            get_barrier: None,
        }
    }

    pub fn with_get_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.get_barrier = Some(barrier);
        self
    }

    pub fn calls(&self) -> StoreCalls {
        StoreCalls {
            gets: self.gets.load(Ordering::SeqCst),
            lists: self.lists.load(Ordering::SeqCst),
            writes: self.writes.load(Ordering::SeqCst),
        }
    }
}

#[async_trait]
impl<S: PropertyStore> PropertyStore for CountingStore<S> {
    async fn create(&self, new: NewProperty) -> Result<Property, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.create(new).await
    }

    async fn get(&self, id: PropertyId) -> Result<Property, StoreError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if let Some(barrier) = &self.get_barrier {
            barrier.wait().await;
        }
        self.inner.get(id).await
    }

    async fn update(
        &self,
        id: PropertyId,
        update: PropertyUpdate,
    ) -> Result<Property, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.update(id, update).await
    }

    async fn delete(&self, id: PropertyId) -> Result<Property, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(id).await
    }

    async fn list(&self, filter: &PropertyFilter) -> Result<Vec<Property>, StoreError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.inner.list(filter).await
    }
}

/// Store that is always unreachable.
pub struct DownStore;

fn unreachable_store<T>() -> Result<T, StoreError> {
    Err(StoreError::Unavailable("database offline".to_string()))
}

#[async_trait]
impl PropertyStore for DownStore {
    async fn create(&self, _new: NewProperty) -> Result<Property, StoreError> {
        unreachable_store()
    }

    async fn get(&self, _id: PropertyId) -> Result<Property, StoreError> {
        unreachable_store()
    }

    async fn update(
        &self,
        _id: PropertyId,
        _update: PropertyUpdate,
    ) -> Result<Property, StoreError> {
        unreachable_store()
    }

    async fn delete(&self, _id: PropertyId) -> Result<Property, StoreError> {
        unreachable_store()
    }

    async fn list(&self, _filter: &PropertyFilter) -> Result<Vec<Property>, StoreError> {
        unreachable_store()
    }
}
