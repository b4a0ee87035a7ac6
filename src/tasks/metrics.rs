//! Metrics Logging Task
//!
//! Periodically logs a cache metrics snapshot, the way an operator would
//! otherwise poll `/cache-stats`.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::metrics::{CacheMetrics, MetricsReporter};

/// Spawns a background task that logs cache metrics every `interval_secs`
/// seconds.
pub fn spawn_metrics_task(reporter: MetricsReporter, interval_secs: u64) -> JoinHandle<()> {
    spawn_with_sink(reporter, interval_secs, |_| {})
}

fn spawn_with_sink<F>(reporter: MetricsReporter, interval_secs: u64, mut sink: F) -> JoinHandle<()>
where
    F: FnMut(CacheMetrics) + Send + 'static,
{
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting metrics task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;
            sink(reporter.snapshot().await);
        }
    })
}
