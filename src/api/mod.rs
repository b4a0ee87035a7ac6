//! API Module
//!
//! HTTP handlers and routing for the property catalog REST API.
//!
//! # Endpoints
//! - `GET|POST /properties` - List or create properties
//! - `GET /properties/search` - Filtered search
//! - `GET|PUT|DELETE /properties/:id` - Read, update or delete one property
//! - `GET /cache-stats` - Cache hit/miss metrics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
