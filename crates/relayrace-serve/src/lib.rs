//! relayrace-serve - HTTP boundary for the transcript fetch service.
//!
//! This crate wires the orchestration core to the outside world:
//!
//! - **AppState**: relay pool, resolver, and configuration shared by handlers
//! - **Config**: environment-driven settings with local-development defaults
//! - **fetch**: the reqwest-backed fetchers that actually talk to the
//!   provider through a relay
//! - **Routes**: `/transcript` and `/health`

mod config;
mod error;
pub mod fetch;
mod routes;
mod state;

pub use self::config::Config;
pub use self::error::ApiError;
pub use self::routes::router;
pub use self::state::AppState;
