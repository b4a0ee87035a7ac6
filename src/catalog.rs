//! Property catalog.
//!
//! The operations the HTTP layer calls. Reads go through the read-through
//! accessor; writes go to the store and then, before returning, through the
//! invalidation listener.

use std::sync::Arc;

use tracing::info;

use crate::cache::{CacheClient, CacheKey, CacheSource, Cached, ReadThrough};
use crate::config::TtlPolicy;
use crate::error::StoreError;
use crate::invalidation::{InvalidationListener, InvalidationPolicy, PropertyEvent};
use crate::metrics::{CacheMetrics, MetricsReporter};
use crate::models::{NewProperty, Property, PropertyFilter, PropertyId, PropertyUpdate};
use crate::store::PropertyStore;

#[derive(Clone)]
pub struct PropertyCatalog {
    store: Arc<dyn PropertyStore>,
    reader: ReadThrough,
    listener: InvalidationListener,
    metrics: MetricsReporter,
}

impl PropertyCatalog {
    pub fn new(
        store: Arc<dyn PropertyStore>,
        cache: Arc<dyn CacheClient>,
        ttl: TtlPolicy,
        policy: InvalidationPolicy,
    ) -> Self {
        info!(
            "Catalog cache: detail_ttl={}s, list_ttl={}s, search_ttl={}s, invalidation={}",
            ttl.detail.as_secs(),
            ttl.list.as_secs(),
            ttl.search.as_secs(),
            policy
        );
        Self {
            store,
            reader: ReadThrough::new(cache.clone(), ttl),
            listener: InvalidationListener::new(cache.clone(), policy),
            metrics: MetricsReporter::new(cache),
        }
    }

    pub fn metrics_reporter(&self) -> &MetricsReporter {
        &self.metrics
    }

    // == Reads ==

    /// One property by id. `NotFound` is returned, never cached.
    pub async fn get_property(&self, id: PropertyId) -> Result<Cached<Property>, StoreError> {
        let store = &self.store;
        self.reader
            .fetch(&CacheKey::Detail(id), || store.get(id))
            .await
    }

    /// Every property, most recent first.
    pub async fn list_properties(&self) -> Result<Cached<Vec<Property>>, StoreError> {
        let store = &self.store;
        self.reader
            .fetch(&CacheKey::List, || async move {
                store.list(&PropertyFilter::all()).await
            })
            .await
    }

    /// Properties whose title or description contains `query` and whose
    /// location contains `location`, case-insensitively.
    ///
    /// With both filters empty this returns an empty list without touching
    /// the store or the cache.
    pub async fn search_properties(
        &self,
        query: &str,
        location: &str,
    ) -> Result<Cached<Vec<Property>>, StoreError> {
        let filter = PropertyFilter::search(query, location);
        if filter.is_empty() {
            return Ok(Cached {
                value: Vec::new(),
                source: CacheSource::Bypassed,
            });
        }

        let key = CacheKey::search(query, location);
        let store = &self.store;
        self.reader
            .fetch(&key, || async move { store.list(&filter).await })
            .await
    }

    pub async fn get_cache_metrics(&self) -> CacheMetrics {
        self.metrics.snapshot().await
    }

    // == Writes ==

    pub async fn create_property(&self, new: NewProperty) -> Result<Property, StoreError> {
        let property = self.store.create(new).await?;
        self.listener
            .on_mutation(&PropertyEvent::Created(property.clone()))
            .await;
        Ok(property)
    }

    pub async fn update_property(
        &self,
        id: PropertyId,
        update: PropertyUpdate,
    ) -> Result<Property, StoreError> {
        let property = self.store.update(id, update).await?;
        self.listener
            .on_mutation(&PropertyEvent::Updated(property.clone()))
            .await;
        Ok(property)
    }

    /// Deletes and returns the property.
    pub async fn delete_property(&self, id: PropertyId) -> Result<Property, StoreError> {
        let property = self.store.delete(id).await?;
        self.listener
            .on_mutation(&PropertyEvent::Deleted(property.clone()))
            .await;
        Ok(property)
    }
}
