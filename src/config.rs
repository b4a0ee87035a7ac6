//! Configuration Module
//!
//! Resolved once at startup from environment variables and handed to each
//! component by value.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::cache::{KeyFamily, MAX_TTL};
use crate::invalidation::InvalidationPolicy;

/// Default TTL for every key family, in seconds
pub const DEFAULT_TTL_SECS: u64 = 3600;

// == TTL Policy ==
/// Time-to-live per key family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    pub detail: Duration,
    pub list: Duration,
    pub search: Duration,
}

impl TtlPolicy {
    /// Same TTL for every family.
    pub fn uniform(ttl: Duration) -> Self {
        Self {
            detail: ttl,
            list: ttl,
            search: ttl,
        }
    }

    pub fn for_family(&self, family: KeyFamily) -> Duration {
        match family {
            KeyFamily::Detail => self.detail,
            KeyFamily::List => self.list,
            KeyFamily::Search => self.search,
        }
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self::uniform(Duration::from_secs(DEFAULT_TTL_SECS))
    }
}

// == Config ==
/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// TTL applied when populating each key family
    pub ttl: TtlPolicy,
    /// How writes evict search results
    pub invalidation_policy: InvalidationPolicy,
    /// Expired-entry cleanup interval in seconds
    pub cleanup_interval: u64,
    /// Metrics log interval in seconds, 0 disables the task
    pub metrics_log_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL_DETAIL` / `CACHE_TTL_LIST` / `CACHE_TTL_SEARCH` - TTL in
    ///   seconds per key family, must be positive, capped at one year (default: 3600)
    /// - `INVALIDATION_POLICY` - `clear_all`, `search_prefix` or `ttl_only`
    ///   (default: `clear_all`)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `METRICS_LOG_INTERVAL` - Metrics log frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from any name-to-value lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let ttl_secs = |name: &str, fallback: Duration| match read_var::<u64>(&lookup, name) {
            Some(0) => {
                warn!("{} must be positive, using {}s", name, fallback.as_secs());
                fallback
            }
            Some(secs) if secs > MAX_TTL.as_secs() => {
                warn!("{}={}s is too long, capping at {}s", name, secs, MAX_TTL.as_secs());
                MAX_TTL
            }
            Some(secs) => Duration::from_secs(secs),
            None => fallback,
        };

        Self {
            server_port: read_var(&lookup, "SERVER_PORT").unwrap_or(defaults.server_port),
            max_entries: read_var(&lookup, "CACHE_MAX_ENTRIES").unwrap_or(defaults.max_entries),
            ttl: TtlPolicy {
                detail: ttl_secs("CACHE_TTL_DETAIL", defaults.ttl.detail),
                list: ttl_secs("CACHE_TTL_LIST", defaults.ttl.list),
                search: ttl_secs("CACHE_TTL_SEARCH", defaults.ttl.search),
            },
            invalidation_policy: read_var(&lookup, "INVALIDATION_POLICY")
                .unwrap_or(defaults.invalidation_policy),
            cleanup_interval: read_var::<u64>(&lookup, "CLEANUP_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cleanup_interval),
            metrics_log_interval: read_var(&lookup, "METRICS_LOG_INTERVAL")
                .unwrap_or(defaults.metrics_log_interval),
        }
    }
}

fn read_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    lookup(name).and_then(|value| parse_var(name, &value))
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Option<T> {
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("Ignoring unparseable {}={:?}", name, value);
            None
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            max_entries: 1000,
            ttl: TtlPolicy::default(),
            invalidation_policy: InvalidationPolicy::default(),
            cleanup_interval: 1,
            metrics_log_interval: 60,
        }
    }
}
