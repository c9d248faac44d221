//! Time-bounded memoization of successful fetches.
//!
//! A single moka cache keyed by resource ID. Entries expire after the
//! configured TTL and are evicted lazily on lookup; there is no background
//! sweep. Failures are never cached, so every miss triggers a fresh run of
//! the fallback chain.

use std::time::Duration;

use moka::future::Cache;

use crate::fetcher::ResourceId;

/// Default maximum number of cached transcripts.
pub const DEFAULT_CACHE_CAPACITY: u64 = 1000;

/// Default TTL for cached transcripts.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// TTL cache for successfully fetched transcripts.
pub struct TranscriptCache {
    inner: Cache<ResourceId, String>,
}

impl TranscriptCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Returns the cached transcript if present and unexpired.
    pub async fn get(&self, id: &ResourceId) -> Option<String> {
        self.inner.get(id).await
    }

    /// Stores a transcript, overwriting any previous value unconditionally.
    pub async fn put(&self, id: ResourceId, value: String) {
        self.inner.insert(id, value).await;
    }
}

impl Default for TranscriptCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY, DEFAULT_TTL)
    }
}
