//! Domain model and request/response DTOs
//!
//! `property` holds the entity the catalog serves; `requests` and `responses`
//! are the HTTP bodies built around it.

pub mod property;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use property::{
    NewProperty, Price, PriceError, Property, PropertyFilter, PropertyId, PropertyUpdate,
};
pub use requests::{CreatePropertyRequest, SearchParams, UpdatePropertyRequest};
pub use responses::{DeleteResponse, HealthResponse, PropertyListResponse, PropertyResponse};
