//! The inbound retrieval contract: cache, then fallback chain.
//!
//! Concurrent duplicate requests for the same ID are allowed to race
//! independently; the duplicate work is accepted and the last writer wins
//! the cache slot. That is why this is an explicit get/put rather than a
//! request-coalescing compute: coalescing would also have to decide what to
//! do with failures, which must never be cached.

use std::sync::Arc;

use crate::cache::TranscriptCache;
use crate::error::FetchOutcome;
use crate::fallback::FallbackChain;
use crate::fetcher::ResourceId;
use crate::relay::RelayPool;

/// Entry point for transcript retrieval.
pub struct Resolver {
    pool: Arc<RelayPool>,
    chain: FallbackChain,
    cache: TranscriptCache,
}

impl Resolver {
    pub fn new(pool: Arc<RelayPool>, chain: FallbackChain, cache: TranscriptCache) -> Self {
        Self { pool, chain, cache }
    }

    /// Resolve `id`: cache hit returns immediately; a miss runs the fallback
    /// chain and caches a success. Failures are returned as values and never
    /// cached.
    pub async fn handle(&self, id: &ResourceId) -> FetchOutcome {
        if let Some(text) = self.cache.get(id).await {
            tracing::debug!(id = %id, "cache hit");
            return Ok(text);
        }

        tracing::debug!(id = %id, "cache miss, running fallback chain");
        let outcome = self.chain.resolve(&self.pool, id).await;

        if let Ok(text) = &outcome {
            self.cache.put(id.clone(), text.clone()).await;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fallback::Strategy;
    use crate::race::RaceConfig;
    use crate::test_support::{Script, ScriptedFetcher, pool_of};

    fn id() -> ResourceId {
        ResourceId::from("abc12345678")
    }

    fn resolver_with(fetcher: Arc<ScriptedFetcher>) -> Resolver {
        let pool = Arc::new(pool_of(&["only"]));
        let chain = FallbackChain::new(vec![Strategy::new(
            "direct",
            fetcher,
            RaceConfig::default(),
        )]);
        Resolver::new(pool, chain, TranscriptCache::default())
    }

    #[tokio::test]
    async fn cached_result_skips_the_chain_entirely() {
        let fetcher =
            Arc::new(ScriptedFetcher::new().with("only", Script::Succeed("the quick fox")));
        let resolver = resolver_with(fetcher.clone());

        let first = resolver.handle(&id()).await;
        assert_eq!(first, Ok("the quick fox".to_string()));
        assert_eq!(fetcher.call_count(), 1);

        // Second identical request within the TTL: same text, zero fetches.
        let second = resolver.handle(&id()).await;
        assert_eq!(second, Ok("the quick fox".to_string()));
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let fetcher =
            Arc::new(ScriptedFetcher::new().with("only", Script::Fail(FetchError::Upstream(429))));
        let resolver = resolver_with(fetcher.clone());

        assert!(resolver.handle(&id()).await.is_err());
        assert!(resolver.handle(&id()).await.is_err());

        // Every miss re-ran the chain; nothing negative was memoized.
        assert_eq!(fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn distinct_ids_resolve_independently() {
        let fetcher = Arc::new(ScriptedFetcher::new().with("only", Script::Succeed("text")));
        let resolver = resolver_with(fetcher.clone());

        resolver.handle(&ResourceId::from("aaaaaaaaaaa")).await.unwrap();
        resolver.handle(&ResourceId::from("bbbbbbbbbbb")).await.unwrap();

        assert_eq!(fetcher.call_count(), 2);
    }
}
