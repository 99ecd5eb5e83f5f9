//! Expiring, size-bounded cache for handler-owned results

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Cache entry with its creation timestamp for TTL checks.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    created_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Concurrent map whose entries expire a fixed duration after write and
/// whose population is capped.
///
/// Owned privately by the handler that needs it (no process-wide
/// singleton); [`ExpiringCache::clear`] is the explicit teardown for
/// callers that want the memory released early.
#[derive(Debug)]
pub struct ExpiringCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    ttl: Duration,
    capacity: usize,
}

impl<V: Clone> ExpiringCache<V> {
    /// Create a cache expiring entries `ttl` after write, holding at most
    /// `capacity` entries.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            capacity,
        }
    }

    /// Fetch the live value under `key`, removing it if it has expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.entries.get(key)?;
        if entry.is_expired(self.ttl) {
            drop(entry);
            self.entries.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    /// Insert `value` under `key`, evicting expired entries first and then
    /// an arbitrary entry if still at capacity.
    pub fn insert(&self, key: String, value: V) {
        if self.entries.len() >= self.capacity {
            self.entries.retain(|_, entry| !entry.is_expired(self.ttl));
            if self.entries.len() >= self.capacity {
                // Bind the victim key first so the iterator's shard lock is
                // released before `remove` takes the write lock.
                let victim = self.entries.iter().next().map(|e| e.key().clone());
                if let Some(victim) = victim {
                    self.entries.remove(&victim);
                }
            }
        }
        self.entries.insert(key, CacheEntry::new(value));
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Current entry count, expired entries included until touched.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
