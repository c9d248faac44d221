//! Application state shared by all request handlers.

use std::sync::Arc;

use relayrace_core::{
    FallbackChain, HealthMonitor, HealthMonitorConfig, RaceConfig, RelayPool, Resolver, Strategy,
    TranscriptCache,
};

use crate::config::Config;
use crate::fetch::{DirectFetcher, PlayerFetcher};

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Relay pool, shared with the resolver and the health monitor.
    pub pool: Arc<RelayPool>,

    /// Retrieval entry point (cache + fallback chain).
    pub resolver: Arc<Resolver>,

    /// Application configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state from configuration and load the relay pool.
    pub fn new(config: Config) -> Self {
        let pool = Arc::new(RelayPool::new());
        pool.load(config.relays.clone());

        let chain = FallbackChain::new(build_strategies(&config));
        tracing::info!(strategies = ?chain.strategy_names(), "fallback chain assembled");

        let cache = TranscriptCache::new(config.cache_capacity, config.cache_ttl);
        let resolver = Arc::new(Resolver::new(pool.clone(), chain, cache));

        Self {
            pool,
            resolver,
            config: Arc::new(config),
        }
    }

    /// Spawn the background health monitor for this state's pool.
    ///
    /// Probes use the direct fetcher: it is the cheapest path and the one
    /// most requests take first.
    pub fn spawn_health_monitor(&self) -> tokio::task::JoinHandle<()> {
        let monitor = HealthMonitor::new(
            self.pool.clone(),
            Arc::new(DirectFetcher::new()),
            HealthMonitorConfig {
                interval: self.config.health_interval,
                probe_timeout: self.config.probe_timeout,
                canonical_id: self.config.canonical_id.clone(),
            },
        );
        monitor.spawn()
    }
}

/// Instantiate strategies from the configured order.
///
/// Unknown names are logged and skipped; an order that yields nothing falls
/// back to the direct strategy so the service can still answer.
fn build_strategies(config: &Config) -> Vec<Strategy> {
    let race = RaceConfig {
        sample_size: config.sample_size,
        per_attempt_timeout: config.attempt_timeout,
    };

    let mut strategies = Vec::new();
    for name in &config.strategy_order {
        match name.as_str() {
            "direct" => {
                strategies.push(Strategy::new(
                    "direct",
                    Arc::new(DirectFetcher::new()),
                    race.clone(),
                ));
            }
            "player" => {
                strategies.push(Strategy::new(
                    "player",
                    Arc::new(PlayerFetcher::new()),
                    race.clone(),
                ));
            }
            other => {
                tracing::warn!(strategy = other, "unknown strategy in configuration, skipping");
            }
        }
    }

    if strategies.is_empty() {
        tracing::warn!("no recognized strategies configured, defaulting to direct");
        strategies.push(Strategy::new(
            "direct",
            Arc::new(DirectFetcher::new()),
            race,
        ));
    }
    strategies
}
