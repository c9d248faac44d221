//! Fetch orchestration for text resources reachable only through a rotating
//! pool of untrusted proxy relays.
//!
//! Many of the relays are slow, dead, or blocked at any given moment, so a
//! single request fans out across a random sample of the ones currently
//! believed healthy and the first usable answer wins.
//!
//! # Architecture
//!
//! ```text
//! request ──▶ TranscriptCache ──hit──▶ response
//!                  │ miss
//!                  ▼
//!            FallbackChain          (strategies in declared order)
//!                  │
//!                  ▼
//!            race()  ◀── snapshot ── RelayPool ◀── mark_health ── HealthMonitor
//!                  │                                                  ▲
//!                  ▼                                                  │
//!            Fetcher (one attempt, one relay)  ◀──────── canonical probe
//! ```
//!
//! The crate knows nothing about the provider protocol or HTTP serving;
//! concrete [`Fetcher`] implementations and the boundary live elsewhere.

pub mod cache;
pub mod error;
pub mod fallback;
pub mod fetcher;
pub mod monitor;
pub mod race;
pub mod relay;
pub mod resolver;
pub mod sources;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::{DEFAULT_CACHE_CAPACITY, DEFAULT_TTL, TranscriptCache};
pub use error::{FetchError, FetchOutcome};
pub use fallback::{FallbackChain, Strategy};
pub use fetcher::{Fetcher, ResourceId};
pub use monitor::{HealthMonitor, HealthMonitorConfig};
pub use race::{RaceConfig, race};
pub use relay::{
    AddressParseError, RelayAddress, RelayCredential, RelayPool, RelayRecord, RelayScheme,
};
pub use resolver::Resolver;
pub use sources::{load_address_file, parse_address_list};
