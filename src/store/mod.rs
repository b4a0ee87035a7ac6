//! Record Store Module
//!
//! The authoritative source of property records. The catalog only reaches it
//! through [`PropertyStore`].

mod memory;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{NewProperty, Property, PropertyFilter, PropertyId, PropertyUpdate};

pub use memory::InMemoryPropertyStore;

/// Durable property records.
///
/// Implementations assign ids and creation timestamps, and return listings
/// most-recent-first.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    async fn create(&self, new: NewProperty) -> Result<Property, StoreError>;

    async fn get(&self, id: PropertyId) -> Result<Property, StoreError>;

    async fn update(&self, id: PropertyId, update: PropertyUpdate)
        -> Result<Property, StoreError>;

    /// Removes the record and returns it.
    async fn delete(&self, id: PropertyId) -> Result<Property, StoreError>;

    async fn list(&self, filter: &PropertyFilter) -> Result<Vec<Property>, StoreError>;
}
