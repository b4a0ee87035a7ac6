//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired cache entries at configured intervals
//! - Metrics: Logs hit/miss counters at configured intervals

mod cleanup;
mod metrics;

pub use cleanup::spawn_cleanup_task;
pub use metrics::spawn_metrics_task;
