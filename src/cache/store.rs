//! Cache Store Module
//!
//! Map-backed storage with per-entry TTL and a capacity bound. Callers wrap it
//! in a lock; every method here is one atomic key operation under that lock.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::CacheError;

// == Cache Store ==
/// Key-value storage with TTL expiry and least-recently-used capacity eviction.
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
    max_entries: usize,
    /// Monotonic access counter stamped onto entries on write and hit
    tick: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store bounded to `max_entries` live entries (minimum 1).
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
            tick: 0,
        }
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl`, replacing any previous entry.
    ///
    /// When full, expired entries are purged first; if that frees nothing the
    /// least recently used entry is evicted.
    pub fn set(&mut self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        if key.is_empty() {
            return Err(CacheError::Rejected("Key cannot be empty".to_string()));
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::Rejected(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }
        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::Rejected(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        if !self.entries.contains_key(key) && self.entries.len() >= self.max_entries {
            if self.cleanup_expired() == 0 {
                self.evict_least_recent();
            }
        }

        let tick = self.next_tick();
        self.entries
            .insert(key.to_string(), CacheEntry::new(value, ttl, tick));
        self.stats.total_entries = self.entries.len();
        Ok(())
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
            self.stats.record_evictions(1);
        }
    }

    // == Get ==
    /// Returns the live value for `key`, counting a hit or a miss.
    ///
    /// An expired entry is dropped on the spot and counted as a miss.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                self.stats.record_lookup(false);
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            self.stats.record_lookup(false);
            self.stats.total_entries = self.entries.len();
            return None;
        }

        let tick = self.next_tick();
        let entry = self.entries.get_mut(key)?;
        entry.last_access = tick;
        self.stats.record_lookup(true);
        Some(entry.value.clone())
    }

    /// Remaining lifetime of a live entry, without touching counters.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(CacheEntry::ttl_remaining)
    }

    // == Delete ==
    /// Removes `key`. Returns whether an entry was present.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.stats.record_invalidations(1);
            self.stats.total_entries = self.entries.len();
        }
        removed
    }

    /// Removes every key starting with `prefix`. Returns how many were removed.
    pub fn delete_prefix(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - self.entries.len();

        self.stats.record_invalidations(removed);
        self.stats.total_entries = self.entries.len();
        removed
    }

    /// Drops every entry. Counters other than the entry total are kept.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();

        self.stats.record_invalidations(removed);
        self.stats.total_entries = 0;
        removed
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats;
        stats.total_entries = self.entries.len();
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries. Returns the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - self.entries.len();

        self.stats.record_expirations(removed);
        self.stats.total_entries = self.entries.len();
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
