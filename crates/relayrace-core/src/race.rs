//! Racing one fetch across a sample of healthy relays.
//!
//! The coordinator draws a uniformly-random sample from the pool's healthy
//! snapshot, launches one fetch attempt per sampled relay, and resolves on
//! the first non-empty success, aborting the rest. Outcome arrival order is
//! whatever network latency makes it; no relay is preferred beyond the draw.
//!
//! Failure aggregation is deliberately lossy: when every attempt fails, only
//! the most recently seen failure is returned (last-seen-wins). Individual
//! relay failures never reach the caller.

use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;
use tokio::task::JoinSet;

use crate::error::{FetchError, FetchOutcome};
use crate::fetcher::{Fetcher, ResourceId};
use crate::relay::RelayPool;

/// Tuning for one race invocation.
#[derive(Debug, Clone)]
pub struct RaceConfig {
    /// Maximum number of relays raced concurrently.
    pub sample_size: usize,
    /// Hard bound on each individual attempt.
    pub per_attempt_timeout: Duration,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            sample_size: 8,
            per_attempt_timeout: Duration::from_secs(8),
        }
    }
}

/// Race `fetcher` across up to `config.sample_size` healthy relays for `id`.
///
/// Returns the first non-empty success, or the last-seen failure once every
/// attempt has completed. Zero healthy relays fails immediately with
/// [`FetchError::NoHealthyRelays`]. An attempt that reports success with
/// empty text counts as [`FetchError::EmptyResult`] and does not end the
/// race for the attempts still in flight.
pub async fn race(
    pool: &RelayPool,
    fetcher: &Arc<dyn Fetcher>,
    id: &ResourceId,
    config: &RaceConfig,
) -> FetchOutcome {
    let healthy = pool.snapshot_healthy();
    if healthy.is_empty() {
        return Err(FetchError::NoHealthyRelays);
    }

    let sample: Vec<_> = {
        let mut rng = rand::thread_rng();
        healthy
            .choose_multiple(&mut rng, config.sample_size)
            .cloned()
            .collect()
    };

    tracing::debug!(
        id = %id,
        fetcher = fetcher.name(),
        sampled = sample.len(),
        healthy = healthy.len(),
        "racing relays"
    );

    let mut attempts = JoinSet::new();
    for relay in sample {
        let fetcher = Arc::clone(fetcher);
        let id = id.clone();
        let per_attempt = config.per_attempt_timeout;
        attempts.spawn(async move {
            // The outer timeout guarantees the bound even if the fetcher
            // implementation ignores the one it was handed.
            let outcome =
                match tokio::time::timeout(per_attempt, fetcher.fetch_once(&id, &relay, per_attempt))
                    .await
                {
                    Ok(outcome) => outcome,
                    Err(_) => Err(FetchError::Timeout),
                };
            (relay, outcome)
        });
    }

    let mut last_failure: Option<FetchError> = None;

    while let Some(joined) = attempts.join_next().await {
        let (relay, outcome) = match joined {
            Ok(pair) => pair,
            Err(err) if err.is_cancelled() => continue,
            Err(err) => {
                tracing::warn!(error = %err, "relay attempt task failed");
                continue;
            }
        };

        match outcome {
            Ok(text) if !text.trim().is_empty() => {
                tracing::debug!(id = %id, relay = %relay, "relay won the race");
                attempts.abort_all();
                return Ok(text);
            }
            Ok(_) => {
                tracing::debug!(id = %id, relay = %relay, "relay returned empty text");
                last_failure = Some(FetchError::EmptyResult);
            }
            Err(err) => {
                tracing::debug!(id = %id, relay = %relay, error = %err, "relay attempt failed");
                last_failure = Some(err);
            }
        }
    }

    Err(last_failure.unwrap_or(FetchError::NoHealthyRelays))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Script, ScriptedFetcher, pool_of};

    fn id() -> ResourceId {
        ResourceId::from("abc12345678")
    }

    fn config(sample_size: usize, timeout_ms: u64) -> RaceConfig {
        RaceConfig {
            sample_size,
            per_attempt_timeout: Duration::from_millis(timeout_ms),
        }
    }

    #[tokio::test]
    async fn empty_pool_fails_immediately() {
        let pool = RelayPool::new();
        let fetcher = Arc::new(ScriptedFetcher::new());
        let dyn_fetcher: Arc<dyn Fetcher> = fetcher.clone();

        let outcome = race(&pool, &dyn_fetcher, &id(), &RaceConfig::default()).await;
        assert_eq!(outcome, Err(FetchError::NoHealthyRelays));
        // No fetch is attempted when there is nothing to sample.
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn first_success_wins_and_errors_are_absorbed() {
        let pool = pool_of(&["one", "two", "three", "four", "five"]);
        let fetcher = Arc::new(
            ScriptedFetcher::new()
                .with("one", Script::Fail(FetchError::Upstream(403)))
                .with("two", Script::Hang)
                .with("three", Script::Succeed("hello"))
                .with("four", Script::Fail(FetchError::Connection("refused".into())))
                .with("five", Script::Hang),
        );
        let dyn_fetcher: Arc<dyn Fetcher> = fetcher.clone();

        let outcome = race(&pool, &dyn_fetcher, &id(), &config(5, 200)).await;
        assert_eq!(outcome, Ok("hello".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn all_empty_results_never_become_success() {
        let pool = pool_of(&["one", "two", "three"]);
        let fetcher = Arc::new(
            ScriptedFetcher::new()
                .with("one", Script::Succeed(""))
                .with("two", Script::Succeed("   "))
                .with("three", Script::Succeed("")),
        );
        let dyn_fetcher: Arc<dyn Fetcher> = fetcher;

        let outcome = race(&pool, &dyn_fetcher, &id(), &config(3, 200)).await;
        assert_eq!(outcome, Err(FetchError::EmptyResult));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_success_does_not_short_circuit_slower_winner() {
        let pool = pool_of(&["fast-empty", "slow-good"]);
        let fetcher = Arc::new(
            ScriptedFetcher::new()
                .with("fast-empty", Script::Succeed(""))
                .with(
                    "slow-good",
                    Script::SucceedAfter(Duration::from_millis(50), "the quick fox"),
                ),
        );
        let dyn_fetcher: Arc<dyn Fetcher> = fetcher;

        let outcome = race(&pool, &dyn_fetcher, &id(), &config(2, 200)).await;
        assert_eq!(outcome, Ok("the quick fox".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_attempts_are_bounded_by_the_timeout() {
        let pool = pool_of(&["one", "two"]);
        let fetcher = Arc::new(
            ScriptedFetcher::new()
                .with("one", Script::Hang)
                .with("two", Script::Hang),
        );
        let dyn_fetcher: Arc<dyn Fetcher> = fetcher;

        let outcome = race(&pool, &dyn_fetcher, &id(), &config(2, 100)).await;
        assert_eq!(outcome, Err(FetchError::Timeout));
    }

    #[tokio::test]
    async fn sample_is_capped_at_sample_size() {
        let hosts: Vec<String> = (0..20).map(|i| format!("relay-{i}")).collect();
        let host_refs: Vec<&str> = hosts.iter().map(String::as_str).collect();
        let pool = pool_of(&host_refs);

        // Every relay fails fast, so the race completes after exactly one
        // call per sampled relay.
        let mut fetcher = ScriptedFetcher::new();
        for host in &hosts {
            fetcher = fetcher.with(host, Script::Fail(FetchError::Upstream(500)));
        }
        let fetcher = Arc::new(fetcher);
        let dyn_fetcher: Arc<dyn Fetcher> = fetcher.clone();

        let outcome = race(&pool, &dyn_fetcher, &id(), &config(6, 200)).await;
        assert_eq!(outcome, Err(FetchError::Upstream(500)));
        assert_eq!(fetcher.call_count(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn fewer_healthy_than_sample_size_uses_all() {
        let pool = pool_of(&["one", "two"]);
        let fetcher = Arc::new(
            ScriptedFetcher::new()
                .with("one", Script::Fail(FetchError::Timeout))
                .with("two", Script::Fail(FetchError::Upstream(404))),
        );
        let dyn_fetcher: Arc<dyn Fetcher> = fetcher.clone();

        let outcome = race(&pool, &dyn_fetcher, &id(), &config(8, 200)).await;
        assert!(outcome.is_err());
        assert_eq!(fetcher.call_count(), 2);
    }
}
