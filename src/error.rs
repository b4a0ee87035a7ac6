//! Error types for the property catalog
//!
//! Store and cache failures are kept apart: store errors reach the caller,
//! cache errors are logged and swallowed by the core.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::PropertyId;

// == Store Error Enum ==
/// Failures reported by the record store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The requested property does not exist
    #[error("Property not found: {0}")]
    NotFound(PropertyId),

    /// The store could not serve the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

// == Cache Error Enum ==
/// Failures reported by the cache client.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache backend unreachable or the operation failed
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// Entry refused by the store (key or value out of bounds)
    #[error("Cache rejected entry: {0}")]
    Rejected(String),

    /// Value could not be encoded or decoded
    #[error("Cache serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Catalog Error Enum ==
/// Error surfaced by the HTTP layer.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Property not found
    #[error("Property not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The record store failed
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => CatalogError::NotFound(id.to_string()),
            StoreError::Unavailable(msg) => CatalogError::StoreUnavailable(msg),
        }
    }
}

// Extractor rejections become 400s with the usual JSON error body
impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        CatalogError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for CatalogError {
    fn from(rejection: PathRejection) -> Self {
        CatalogError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for CatalogError {
    fn from(rejection: QueryRejection) -> Self {
        CatalogError::InvalidRequest(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CatalogError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP layer.
pub type Result<T> = std::result::Result<T, CatalogError>;
