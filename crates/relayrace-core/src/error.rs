//! Failure taxonomy for relay-mediated fetches.
//!
//! Every failure in the orchestration core is a value, never a panic.
//! Per-relay failures are absorbed by the race coordinator and per-strategy
//! failures by the fallback chain; only the aggregated [`FetchError`] crosses
//! a component boundary.

use thiserror::Error;

/// Result of one fetch path: the extracted transcript text, or a classified
/// failure. Never mutated after creation.
pub type FetchOutcome = Result<String, FetchError>;

/// Classified fetch failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The relay pool had no healthy relays to sample from.
    #[error("no healthy relays available")]
    NoHealthyRelays,

    /// The attempt exceeded its per-attempt bound.
    #[error("attempt timed out")]
    Timeout,

    /// The relay (or the route through it) could not be used.
    #[error("connection error: {0}")]
    Connection(String),

    /// The upstream provider answered with a non-success status.
    #[error("upstream returned status {0}")]
    Upstream(u16),

    /// The response arrived but could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response decoded cleanly but contained no transcript text.
    /// Empty text is never a success.
    #[error("empty transcript")]
    EmptyResult,

    /// Every configured strategy ran out of candidates without a success.
    #[error("all strategies exhausted: {0}")]
    AllStrategiesExhausted(String),
}

impl FetchError {
    /// Stable snake_case tag for this failure, used in JSON error bodies
    /// and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoHealthyRelays => "no_healthy_relays",
            Self::Timeout => "timeout",
            Self::Connection(_) => "connection_error",
            Self::Upstream(_) => "upstream_error",
            Self::Parse(_) => "parse_error",
            Self::EmptyResult => "empty_result",
            Self::AllStrategiesExhausted(_) => "all_strategies_exhausted",
        }
    }
}
