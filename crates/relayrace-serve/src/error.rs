//! API error types and response formatting.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use relayrace_core::FetchError;

/// API error type that converts to appropriate HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Invalid request parameters.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The orchestration core could not produce a transcript.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            // A timed-out fetch is the gateway's timeout from the client's
            // point of view; everything else upstream-shaped is 502.
            Self::Fetch(FetchError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            Self::Fetch(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (error, message) = match &self {
            Self::BadRequest(msg) => ("bad_request".to_string(), Some(msg.clone())),
            Self::Fetch(err) => {
                tracing::warn!(kind = err.kind(), error = %err, "fetch failed");
                (err.kind().to_string(), Some(err.to_string()))
            }
        };

        let body = ErrorResponse { error, message };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_maps_to_400() {
        let response = ApiError::BadRequest("video_id is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn timeout_maps_to_504() {
        let response = ApiError::from(FetchError::Timeout).into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn other_fetch_failures_map_to_502() {
        for err in [
            FetchError::NoHealthyRelays,
            FetchError::Connection("refused".into()),
            FetchError::Upstream(403),
            FetchError::Parse("bad json".into()),
            FetchError::EmptyResult,
            FetchError::AllStrategiesExhausted("direct: timeout".into()),
        ] {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        }
    }

    #[test]
    fn display_preserves_detail() {
        let err = ApiError::from(FetchError::Upstream(429));
        assert_eq!(err.to_string(), "upstream returned status 429");
    }
}
