//! Property Catalog - real-estate listings behind a read-through cache
//!
//! Reads go through the cache and fall back to the store on a miss; writes go
//! to the store and then evict the cache entries they made stale.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod invalidation;
pub mod metrics;
pub mod models;
pub mod store;
pub mod tasks;

#[cfg(test)]
mod testing;

pub use api::AppState;
pub use catalog::PropertyCatalog;
pub use config::Config;
pub use tasks::{spawn_cleanup_task, spawn_metrics_task};
