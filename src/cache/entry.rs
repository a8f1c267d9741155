use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// A single cache entry: payload plus expiry metadata.
///
/// Entries are replaced wholesale on refresh, never mutated in place.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    /// Wall-clock time the entry was stored, for freshness reporting.
    pub stored_at: DateTime<Utc>,
    /// Monotonic expiry instant.
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            stored_at: Utc::now(),
            expires_at: Instant::now() + ttl,
        }
    }

    /// An entry is expired once `now` reaches its expiry instant.
    ///
    /// `now` is passed in so a single clock read covers a whole store
    /// operation.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
