//! Transcript retrieval endpoint.

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use relayrace_core::ResourceId;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the transcript endpoint.
#[derive(Debug, Deserialize)]
pub struct TranscriptQuery {
    video_id: Option<String>,
}

/// Successful transcript response.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptResponse {
    video_id: String,
    transcript: String,
}

/// `GET /transcript?video_id=ID`
///
/// The ID is validated here, at the boundary; the orchestration core treats
/// it as opaque.
pub async fn get_transcript(
    State(state): State<AppState>,
    Query(params): Query<TranscriptQuery>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let Some(video_id) = params.video_id else {
        return Err(ApiError::BadRequest(
            "video_id parameter is required".to_string(),
        ));
    };
    validate_video_id(&video_id)?;

    let id = ResourceId::from(video_id.as_str());
    let transcript = state.resolver.handle(&id).await?;

    Ok(Json(TranscriptResponse {
        video_id,
        transcript,
    }))
}

/// Video IDs are exactly 11 characters of `[A-Za-z0-9_-]`.
fn validate_video_id(id: &str) -> Result<(), ApiError> {
    let valid = id.len() == 11
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');

    if valid {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "'{id}' is not a valid video ID"
        )))
    }
}
