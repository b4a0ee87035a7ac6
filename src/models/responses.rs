//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use super::property::{Property, PropertyId};
use crate::cache::{CacheSource, Cached};

/// Response body for GET /properties/:id
#[derive(Debug, Clone, Serialize)]
pub struct PropertyResponse {
    /// Whether the entity was served from the cache
    pub cached: bool,
    /// Where the entity came from
    pub source: CacheSource,
    #[serde(flatten)]
    pub property: Property,
}

impl From<Cached<Property>> for PropertyResponse {
    fn from(cached: Cached<Property>) -> Self {
        Self {
            cached: cached.is_hit(),
            source: cached.source,
            property: cached.value,
        }
    }
}

/// Response body for the listing and search endpoints
#[derive(Debug, Clone, Serialize)]
pub struct PropertyListResponse {
    pub count: usize,
    pub cached: bool,
    pub source: CacheSource,
    pub properties: Vec<Property>,
}

impl From<Cached<Vec<Property>>> for PropertyListResponse {
    fn from(cached: Cached<Vec<Property>>) -> Self {
        Self {
            count: cached.value.len(),
            cached: cached.is_hit(),
            source: cached.source,
            properties: cached.value,
        }
    }
}

/// Response body for DELETE /properties/:id
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The id that was deleted
    pub id: PropertyId,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(property: &Property) -> Self {
        Self {
            message: format!("Property '{}' deleted successfully", property.title),
            id: property.id,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Price;
    use chrono::Utc;

    fn property() -> Property {
        Property {
            id: PropertyId(3),
            title: "Charming Cottage".to_string(),
            description: "Original features".to_string(),
            price: Price::from_units(420_000).unwrap(),
            location: "Maple Grove".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_property_response_flattens_entity() {
        let resp = PropertyResponse::from(Cached {
            value: property(),
            source: CacheSource::Cache,
        });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["cached"], true);
        assert_eq!(json["source"], "cache");
        assert_eq!(json["id"], 3);
        assert_eq!(json["price"], "420000.00");
    }

    #[test]
    fn test_list_response_counts() {
        let resp = PropertyListResponse::from(Cached {
            value: vec![property(), property()],
            source: CacheSource::Store,
        });
        assert_eq!(resp.count, 2);
        assert!(!resp.cached);
    }

    #[test]
    fn test_delete_response_serialize() {
        let resp = DeleteResponse::new(&property());
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("Charming Cottage"));
        assert!(json.contains("deleted"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
