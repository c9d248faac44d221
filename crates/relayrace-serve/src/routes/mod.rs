//! API route definitions.

mod health;
mod transcript;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

/// Build the complete API router.
///
/// - `GET /health` - Service health and relay pool counts
/// - `GET /transcript?video_id=ID` - Fetch a transcript
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/transcript", get(transcript::get_transcript))
        .with_state(state)
}
