//! Background relay health monitoring.
//!
//! The monitor is the sole writer of the pool's health flags. On a fixed
//! interval it probes every known relay concurrently against one canonical
//! resource ID; a probe that yields non-empty text marks the relay healthy,
//! anything else (timeout, connection error, bad status, malformed payload,
//! empty text) marks it unhealthy. A relay that dies between sweeps is still
//! offered to callers until the next sweep; that staleness is an accepted
//! trade of freshness against probe cost.
//!
//! The loop has no terminal state short of process shutdown, and individual
//! probe failures can never break it: the fetcher reports failures as values.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

use crate::error::FetchError;
use crate::fetcher::{Fetcher, ResourceId};
use crate::relay::RelayPool;

/// Tuning for the monitor.
#[derive(Debug, Clone)]
pub struct HealthMonitorConfig {
    /// Time between sweeps.
    pub interval: Duration,
    /// Hard bound on each individual probe.
    pub probe_timeout: Duration,
    /// Known-good, stable resource ID probed against every relay.
    /// Chosen once at startup.
    pub canonical_id: ResourceId,
}

/// Periodic prober that keeps the pool's liveness view approximately fresh
/// without ever blocking a request-serving path.
pub struct HealthMonitor {
    pool: Arc<RelayPool>,
    fetcher: Arc<dyn Fetcher>,
    config: HealthMonitorConfig,
}

impl HealthMonitor {
    pub fn new(
        pool: Arc<RelayPool>,
        fetcher: Arc<dyn Fetcher>,
        config: HealthMonitorConfig,
    ) -> Self {
        Self {
            pool,
            fetcher,
            config,
        }
    }

    /// Spawn the monitor as a long-running background task.
    ///
    /// The first sweep runs immediately so a freshly started process does
    /// not serve a full interval from the optimistic defaults.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                self.sweep().await;
            }
        })
    }

    /// Run one probe cycle over every relay in the pool.
    ///
    /// Public so tests (and an explicit refresh trigger) can run a single
    /// deterministic cycle without the timer.
    pub async fn sweep(&self) {
        let relays = self.pool.snapshot_all();
        if relays.is_empty() {
            tracing::debug!("health sweep skipped, pool is empty");
            return;
        }

        let mut probes = JoinSet::new();
        for relay in relays {
            let fetcher = Arc::clone(&self.fetcher);
            let id = self.config.canonical_id.clone();
            let probe_timeout = self.config.probe_timeout;
            probes.spawn(async move {
                let outcome = match tokio::time::timeout(
                    probe_timeout,
                    fetcher.fetch_once(&id, &relay, probe_timeout),
                )
                .await
                {
                    Ok(outcome) => outcome,
                    Err(_) => Err(FetchError::Timeout),
                };
                (relay, outcome)
            });
        }

        let mut total = 0usize;
        let mut healthy = 0usize;

        while let Some(joined) = probes.join_next().await {
            let (relay, outcome) = match joined {
                Ok(pair) => pair,
                Err(err) => {
                    tracing::warn!(error = %err, "health probe task failed");
                    continue;
                }
            };

            total += 1;
            let is_healthy = match &outcome {
                Ok(text) if !text.trim().is_empty() => true,
                Ok(_) => {
                    tracing::debug!(relay = %relay, "probe returned empty text");
                    false
                }
                Err(err) => {
                    tracing::debug!(relay = %relay, error = %err, "probe failed");
                    false
                }
            };

            if is_healthy {
                healthy += 1;
            }
            self.pool.mark_health(&relay, is_healthy);
        }

        tracing::info!(healthy, total, "health sweep complete");
    }
}
