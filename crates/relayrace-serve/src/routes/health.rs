//! Health check endpoint.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    relays_total: usize,
    relays_healthy: usize,
}

/// Public health check endpoint.
///
/// Reports the relay pool's current liveness view alongside basic service
/// health. The service is "ok" even with zero healthy relays; that state is
/// degraded, not down.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        relays_total: state.pool.len(),
        relays_healthy: state.pool.healthy_count(),
    })
}
