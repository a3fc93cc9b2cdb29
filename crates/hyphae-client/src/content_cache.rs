//! Transient in-process cache for parsed content.
//!
//! Holds derived text/JSON values under caller-chosen keys, in a namespace
//! separate from raw blobs. Entries live until their TTL passes and are
//! evicted lazily on the next lookup. The cache is process-local and lost on
//! restart; the durable blob store is a different layer.
//!
//! Operations are synchronous and never suspend, so the cache is safe to
//! consult from non-async paths.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use serde_json::Value;

/// Cached value with its expiry.
struct CachedContent {
    value: Value,
    expires_at: Instant,
}

/// Synchronous TTL cache for parsed text/JSON content.
#[derive(Default)]
pub struct MemoryContentCache {
    entries: RwLock<HashMap<String, CachedContent>>,
}

impl MemoryContentCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value under `key`, if present and not expired.
    ///
    /// An expired entry counts as a miss and is evicted on the way out.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let expired = {
            let entries = self.entries.read().ok()?;
            match entries.get(key) {
                Some(cached) if Instant::now() < cached.expires_at => {
                    tracing::trace!(%key, "content cache hit");
                    return Some(cached.value.clone());
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired
            && let Ok(mut entries) = self.entries.write()
        {
            // Re-check under the write lock; a concurrent set may have
            // refreshed the entry since the read.
            if entries
                .get(key)
                .is_some_and(|cached| Instant::now() >= cached.expires_at)
            {
                entries.remove(key);
                tracing::trace!(%key, "evicted expired content");
            }
        }

        None
    }

    /// Stores `value` under `key` for `ttl`, replacing any prior entry.
    pub fn set(&self, key: impl Into<String>, value: Value, ttl: Duration) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                key.into(),
                CachedContent {
                    value,
                    expires_at: Instant::now() + ttl,
                },
            );
        }
    }

    /// Drops all expired entries.
    pub fn cleanup(&self) {
        if let Ok(mut entries) = self.entries.write() {
            let now = Instant::now();
            let before = entries.len();
            entries.retain(|_, cached| cached.expires_at > now);
            let removed = before - entries.len();
            if removed > 0 {
                tracing::debug!("cleaned up {removed} expired content entries");
            }
        }
    }

    /// Returns the number of entries, including any not yet evicted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Returns `true` if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
