//! The single-relay fetch contract.
//!
//! A [`Fetcher`] performs exactly one retrieval attempt through exactly one
//! relay. It has no retry logic of its own: retries and fallbacks belong to
//! the race coordinator and the fallback chain, so backoff behavior lives in
//! one layer only. Concrete implementations (reqwest against the provider's
//! endpoints) live in the serving crate; the core only sees this trait.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchOutcome;
use crate::relay::RelayAddress;

/// Opaque identifier for the resource being fetched.
///
/// Treated purely as a lookup key inside the core. Length/charset validation
/// is a boundary concern and happens before a `ResourceId` is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One retrieval attempt through one relay.
///
/// Implementations must classify failures into the [`crate::FetchError`]
/// taxonomy and must not block past `timeout`. The race coordinator wraps
/// every invocation in its own `tokio::time::timeout` as well, so a
/// misbehaving implementation cannot stall a race.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Human-readable name, used in logs.
    fn name(&self) -> &'static str;

    /// Attempt to fetch `id` through `relay` once.
    async fn fetch_once(
        &self,
        id: &ResourceId,
        relay: &RelayAddress,
        timeout: Duration,
    ) -> FetchOutcome;
}
