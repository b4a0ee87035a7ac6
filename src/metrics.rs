//! Cache metrics reporting.
//!
//! Reads the hit/miss counters from the cache client and derives a hit ratio.
//! A failing counter source yields a zeroed snapshot carrying the error, never
//! an error to the caller.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::cache::{CacheClient, CacheStats};

/// `hits / (hits + misses)`, or `0.0` when there were no lookups.
pub fn hit_ratio(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

// == Cache Metrics ==
/// Point-in-time cache metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    /// In `[0, 1]`
    pub hit_ratio: f64,
    pub total_entries: usize,
    pub evictions: u64,
    pub expirations: u64,
    /// Set when the counters could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CacheMetrics {
    pub fn from_stats(stats: &CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            hit_ratio: hit_ratio(stats.hits, stats.misses),
            total_entries: stats.total_entries,
            evictions: stats.evictions,
            expirations: stats.expirations,
            error: None,
        }
    }

    /// Zeroed metrics flagged with `error`.
    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::from_stats(&CacheStats::default())
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

// == Metrics Reporter ==
#[derive(Clone)]
pub struct MetricsReporter {
    cache: Arc<dyn CacheClient>,
}

impl MetricsReporter {
    pub fn new(cache: Arc<dyn CacheClient>) -> Self {
        Self { cache }
    }

    /// Reads the current counters and logs them.
    pub async fn snapshot(&self) -> CacheMetrics {
        match self.cache.stats().await {
            Ok(stats) => {
                let metrics = CacheMetrics::from_stats(&stats);
                info!(
                    "Cache Metrics: Hits={}, Misses={}, Hit Ratio={:.2}%",
                    metrics.hits,
                    metrics.misses,
                    metrics.hit_ratio * 100.0
                );
                metrics
            }
            Err(e) => {
                error!("Error retrieving cache metrics: {}", e);
                CacheMetrics::unavailable(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCache;
    use crate::testing::FailingCache;
    use std::time::Duration;

    #[test]
    fn test_hit_ratio_mixed() {
        assert!((hit_ratio(7, 3) - 0.7).abs() < f64::EPSILON);
        assert_eq!(hit_ratio(1, 1), 0.5);
    }

    #[test]
    fn test_hit_ratio_no_requests() {
        assert_eq!(hit_ratio(0, 0), 0.0);
    }

    #[test]
    fn test_hit_ratio_bounds() {
        assert_eq!(hit_ratio(5, 0), 1.0);
        assert_eq!(hit_ratio(0, 5), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_reads_cache_counters() {
        let cache = InMemoryCache::new(10);
        cache
            .set("detail:1", "{}".to_string(), Duration::from_secs(60))
            .await
            .unwrap();
        for _ in 0..7 {
            cache.get("detail:1").await.unwrap();
        }
        for _ in 0..3 {
            cache.get("detail:2").await.unwrap();
        }

        let metrics = MetricsReporter::new(Arc::new(cache)).snapshot().await;

        assert_eq!(metrics.hits, 7);
        assert_eq!(metrics.misses, 3);
        assert!((metrics.hit_ratio - 0.7).abs() < f64::EPSILON);
        assert_eq!(metrics.total_entries, 1);
        assert!(!metrics.is_degraded());
    }

    #[tokio::test]
    async fn test_snapshot_degrades_when_counters_unavailable() {
        let metrics = MetricsReporter::new(Arc::new(FailingCache)).snapshot().await;

        assert_eq!(metrics.hits, 0);
        assert_eq!(metrics.misses, 0);
        assert_eq!(metrics.hit_ratio, 0.0);
        assert!(metrics.error.unwrap().contains("connection refused"));
    }

    #[test]
    fn test_error_field_only_serialized_when_present() {
        let ok = serde_json::to_value(CacheMetrics::from_stats(&CacheStats::default())).unwrap();
        assert!(ok.get("error").is_none());

        let degraded = serde_json::to_value(CacheMetrics::unavailable("down")).unwrap();
        assert_eq!(degraded["error"], "down");
        assert_eq!(degraded["hit_ratio"], 0.0);
    }
}
