use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats, CacheStatsSnapshot};

/// In-memory TTL cache keyed by logical query string.
///
/// Locking lives inside the store and is never held across an await, so the
/// background sweep cannot block in-flight reads or writes. An expired entry
/// is treated as absent by [`get`](TtlCache::get) but left in place until the
/// sweep removes it; [`get_stale`](TtlCache::get_stale) can still read it for
/// degraded serving while the origin is unreachable.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    stats: CacheStats,
    default_ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stats: CacheStats::default(),
            default_ttl,
        }
    }

    /// Look up a live entry. Expired or absent keys are misses.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let entries = self.entries.read().expect("cache lock poisoned");
        match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Look up an entry regardless of expiry. Returns the payload and
    /// whether it had already expired. Does not touch the hit/miss counters;
    /// this is the degraded-mode fallback path, not a normal read.
    pub fn get_stale(&self, key: &str) -> Option<(V, bool)> {
        let now = Instant::now();
        let entries = self.entries.read().expect("cache lock poisoned");
        entries
            .get(key)
            .map(|entry| (entry.value.clone(), entry.is_expired(now)))
    }

    /// Store under the default TTL. Unconditional overwrite; resets expiry.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Store with an explicit TTL. Unconditional overwrite; resets expiry.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry::new(value, ttl);
        let mut entries = self.entries.write().expect("cache lock poisoned");
        entries.insert(key.into(), entry);
    }

    /// Remove every expired entry. Returns how many were dropped.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().expect("cache lock poisoned");
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - entries.len();
        self.stats.record_evictions(removed as u64);
        removed
    }

    /// Drop all entries. Used for explicit invalidation.
    pub fn clear(&self) {
        self.entries.write().expect("cache lock poisoned").clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStatsSnapshot {
        self.stats.snapshot(self.len())
    }
}
