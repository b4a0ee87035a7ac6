//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint. Handlers only translate
//! between HTTP and [`PropertyCatalog`]; caching happens below them.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::cache::InMemoryCache;
use crate::catalog::PropertyCatalog;
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::metrics::CacheMetrics;
use crate::models::{
    CreatePropertyRequest, DeleteResponse, HealthResponse, Property, PropertyId,
    PropertyListResponse, PropertyResponse, SearchParams, UpdatePropertyRequest,
};
use crate::store::{InMemoryPropertyStore, PropertyStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Catalog operations
    pub catalog: Arc<PropertyCatalog>,
    /// The cache behind the catalog, kept for background housekeeping
    pub cache: InMemoryCache,
}

impl AppState {
    /// Creates an AppState over the given store and cache.
    pub fn new(store: Arc<dyn PropertyStore>, cache: InMemoryCache, config: &Config) -> Self {
        let catalog = PropertyCatalog::new(
            store,
            Arc::new(cache.clone()),
            config.ttl,
            config.invalidation_policy,
        );
        Self {
            catalog: Arc::new(catalog),
            cache,
        }
    }

    /// Creates an AppState with in-memory store and cache sized from the Config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(InMemoryPropertyStore::new()),
            InMemoryCache::new(config.max_entries),
            config,
        )
    }
}

/// Handler for GET /properties
pub async fn list_handler(State(state): State<AppState>) -> Result<Json<PropertyListResponse>> {
    let listing = state.catalog.list_properties().await?;
    Ok(Json(listing.into()))
}

/// Handler for GET /properties/:id
pub async fn detail_handler(
    State(state): State<AppState>,
    id: std::result::Result<Path<u64>, PathRejection>,
) -> Result<Json<PropertyResponse>> {
    let Path(id) = id?;
    let property = state.catalog.get_property(PropertyId(id)).await?;
    Ok(Json(property.into()))
}

/// Handler for GET /properties/search?q=&location=
pub async fn search_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<PropertyListResponse>> {
    let Query(params) = params?;
    let results = state
        .catalog
        .search_properties(&params.q, &params.location)
        .await?;
    Ok(Json(results.into()))
}

/// Handler for POST /properties
pub async fn create_handler(
    State(state): State<AppState>,
    req: std::result::Result<Json<CreatePropertyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Property>)> {
    let Json(req) = req?;
    if let Some(error_msg) = req.validate() {
        return Err(CatalogError::InvalidRequest(error_msg));
    }

    let property = state.catalog.create_property(req.into()).await?;
    Ok((StatusCode::CREATED, Json(property)))
}

/// Handler for PUT /properties/:id
pub async fn update_handler(
    State(state): State<AppState>,
    id: std::result::Result<Path<u64>, PathRejection>,
    req: std::result::Result<Json<UpdatePropertyRequest>, JsonRejection>,
) -> Result<Json<Property>> {
    let Path(id) = id?;
    let Json(req) = req?;
    if let Some(error_msg) = req.validate() {
        return Err(CatalogError::InvalidRequest(error_msg));
    }

    let property = state
        .catalog
        .update_property(PropertyId(id), req.into())
        .await?;
    Ok(Json(property))
}

/// Handler for DELETE /properties/:id
pub async fn delete_handler(
    State(state): State<AppState>,
    id: std::result::Result<Path<u64>, PathRejection>,
) -> Result<Json<DeleteResponse>> {
    let Path(id) = id?;
    let property = state.catalog.delete_property(PropertyId(id)).await?;
    Ok(Json(DeleteResponse::new(&property)))
}

/// Handler for GET /cache-stats
///
/// Always answers 200; a degraded snapshot carries an `error` field.
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheMetrics> {
    Json(state.catalog.get_cache_metrics().await)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
