//! Ordered fallback across retrieval strategies.
//!
//! A strategy is one complete retrieval method (direct provider endpoint,
//! player-API fallback, ...) packaged with its own fetcher and race tuning.
//! The chain tries strategies in declared order and stops at the first
//! success. Strategies are independent: each race re-draws the healthy
//! snapshot from the pool, so a failing strategy cannot corrupt state the
//! next one depends on.

use std::sync::Arc;

use crate::error::{FetchError, FetchOutcome};
use crate::fetcher::{Fetcher, ResourceId};
use crate::race::{RaceConfig, race};
use crate::relay::RelayPool;

/// One named retrieval strategy.
pub struct Strategy {
    pub name: String,
    pub fetcher: Arc<dyn Fetcher>,
    pub race: RaceConfig,
}

impl Strategy {
    pub fn new(name: impl Into<String>, fetcher: Arc<dyn Fetcher>, race: RaceConfig) -> Self {
        Self {
            name: name.into(),
            fetcher,
            race,
        }
    }
}

/// Strategies in the order they should be attempted.
pub struct FallbackChain {
    strategies: Vec<Strategy>,
}

impl FallbackChain {
    pub fn new(strategies: Vec<Strategy>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name.as_str()).collect()
    }

    /// Run strategies in order until one succeeds.
    ///
    /// Per-strategy failures are absorbed here; on total exhaustion the
    /// returned [`FetchError::AllStrategiesExhausted`] detail concatenates
    /// each strategy's failure for diagnosis.
    pub async fn resolve(&self, pool: &RelayPool, id: &ResourceId) -> FetchOutcome {
        let mut failures = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            match race(pool, &strategy.fetcher, id, &strategy.race).await {
                Ok(text) => {
                    tracing::info!(id = %id, strategy = %strategy.name, "strategy succeeded");
                    return Ok(text);
                }
                Err(err) => {
                    tracing::debug!(
                        id = %id,
                        strategy = %strategy.name,
                        error = %err,
                        "strategy failed, trying next"
                    );
                    failures.push(format!("{}: {}", strategy.name, err));
                }
            }
        }

        if failures.is_empty() {
            failures.push("no strategies configured".to_string());
        }
        Err(FetchError::AllStrategiesExhausted(failures.join("; ")))
    }
}
