//! Invalidation on write.
//!
//! The catalog calls [`InvalidationListener::on_mutation`] right after every
//! successful create, update or delete, before the write returns. The detail
//! and list keys are always evicted; what happens to search results depends
//! on the [`InvalidationPolicy`].
//!
//! Eviction failures are logged and dropped. A write never fails because the
//! cache could not be reached; the stale entry expires with its TTL instead.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::{detail_key, list_key, CacheClient, SEARCH_PREFIX};
use crate::models::{Property, PropertyId};

// == Invalidation Policy ==
/// How search results are handled when any property changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvalidationPolicy {
    /// Clear the entire cache
    #[default]
    ClearAll,
    /// Evict every `search:` key
    SearchPrefix,
    /// Leave search results to expire with their TTL
    TtlOnly,
}

impl fmt::Display for InvalidationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InvalidationPolicy::ClearAll => "clear_all",
            InvalidationPolicy::SearchPrefix => "search_prefix",
            InvalidationPolicy::TtlOnly => "ttl_only",
        };
        f.write_str(name)
    }
}

impl FromStr for InvalidationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clear_all" => Ok(InvalidationPolicy::ClearAll),
            "search_prefix" => Ok(InvalidationPolicy::SearchPrefix),
            "ttl_only" => Ok(InvalidationPolicy::TtlOnly),
            other => Err(format!("unknown invalidation policy: {}", other)),
        }
    }
}

// == Property Event ==
/// A completed mutation of one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyEvent {
    Created(Property),
    Updated(Property),
    Deleted(Property),
}

impl PropertyEvent {
    pub fn property(&self) -> &Property {
        match self {
            PropertyEvent::Created(p) | PropertyEvent::Updated(p) | PropertyEvent::Deleted(p) => p,
        }
    }

    pub fn id(&self) -> PropertyId {
        self.property().id
    }

    fn action(&self) -> &'static str {
        match self {
            PropertyEvent::Created(_) => "Created",
            PropertyEvent::Updated(_) => "Updated",
            PropertyEvent::Deleted(_) => "Deleted",
        }
    }
}

// == Invalidation Listener ==
#[derive(Clone)]
pub struct InvalidationListener {
    cache: Arc<dyn CacheClient>,
    policy: InvalidationPolicy,
}

impl InvalidationListener {
    pub fn new(cache: Arc<dyn CacheClient>, policy: InvalidationPolicy) -> Self {
        Self { cache, policy }
    }

    /// Evicts every cache entry the mutation may have made stale.
    pub async fn on_mutation(&self, event: &PropertyEvent) {
        self.evict(&detail_key(event.id())).await;
        self.evict(&list_key()).await;

        match self.policy {
            InvalidationPolicy::ClearAll => match self.cache.clear().await {
                Ok(()) => info!("Cleared entire cache (policy {})", self.policy),
                Err(e) => warn!("Failed to clear cache: {}", e),
            },
            InvalidationPolicy::SearchPrefix => {
                match self.cache.delete_prefix(SEARCH_PREFIX).await {
                    Ok(count) => info!("Invalidated {} search cache keys", count),
                    Err(e) => warn!("Failed to invalidate search cache keys: {}", e),
                }
            }
            InvalidationPolicy::TtlOnly => {}
        }

        let property = event.property();
        info!(
            "Property {}: {} (ID: {})",
            event.action(),
            property.title,
            property.id
        );
    }

    async fn evict(&self, key: &str) {
        match self.cache.delete(key).await {
            Ok(_) => info!("Invalidated cache key: {}", key),
            Err(e) => warn!("Failed to invalidate cache key {}: {}", key, e),
        }
    }
}
