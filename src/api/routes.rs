//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, create_handler, delete_handler, detail_handler, health_handler,
    list_handler, search_handler, update_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /properties` - List all properties, newest first
/// - `POST /properties` - Create a property
/// - `GET /properties/search` - Search by `q` and `location`
/// - `GET /properties/:id` - Property detail
/// - `PUT /properties/:id` - Update a property
/// - `DELETE /properties/:id` - Delete a property
/// - `GET /cache-stats` - Hit/miss counters and hit ratio
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Static segment first so "search" never parses as an id
    Router::new()
        .route("/properties", get(list_handler).post(create_handler))
        .route("/properties/search", get(search_handler))
        .route(
            "/properties/:id",
            get(detail_handler).put(update_handler).delete(delete_handler),
        )
        .route("/cache-stats", get(cache_stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
