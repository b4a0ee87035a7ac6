//! In-process property store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::PropertyStore;
use crate::error::StoreError;
use crate::models::{NewProperty, Property, PropertyFilter, PropertyId, PropertyUpdate};

#[derive(Debug, Default)]
struct Records {
    rows: HashMap<PropertyId, Property>,
    last_id: u64,
}

/// [`PropertyStore`] held in memory behind a tokio `RwLock`.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPropertyStore {
    records: Arc<RwLock<Records>>,
}

impl InMemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PropertyStore for InMemoryPropertyStore {
    async fn create(&self, new: NewProperty) -> Result<Property, StoreError> {
        let mut records = self.records.write().await;
        records.last_id += 1;

        let property = Property {
            id: PropertyId(records.last_id),
            title: new.title,
            description: new.description,
            price: new.price,
            location: new.location,
            created_at: Utc::now(),
        };
        records.rows.insert(property.id, property.clone());

        debug!("Stored property {}", property.id);
        Ok(property)
    }

    async fn get(&self, id: PropertyId) -> Result<Property, StoreError> {
        self.records
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn update(
        &self,
        id: PropertyId,
        update: PropertyUpdate,
    ) -> Result<Property, StoreError> {
        let mut records = self.records.write().await;
        let property = records.rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        update.apply(property);
        Ok(property.clone())
    }

    async fn delete(&self, id: PropertyId) -> Result<Property, StoreError> {
        self.records
            .write()
            .await
            .rows
            .remove(&id)
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self, filter: &PropertyFilter) -> Result<Vec<Property>, StoreError> {
        let records = self.records.read().await;
        let mut matches: Vec<Property> = records
            .rows
            .values()
            .filter(|property| filter.matches(property))
            .cloned()
            .collect();

        // Most recent first; ids break ties between identical timestamps
        matches.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(matches)
    }
}
