//! Player-API fallback fetch.
//!
//! When the timedtext endpoint is blocked for a relay, the player API often
//! still answers: POST the innertube `player` endpoint with an Android client
//! context, take the first caption track's `baseUrl`, and re-fetch it as
//! `fmt=json3` through the same relay. This is what the common transcript
//! client libraries do under the hood.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use relayrace_core::{FetchError, FetchOutcome, Fetcher, RelayAddress, ResourceId};

use super::{classify, extract_json3, proxied_client};

const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

/// Client identity presented to the player endpoint. The Android client gets
/// caption tracks without the signature dance the web client requires.
const ANDROID_CLIENT_NAME: &str = "ANDROID";
const ANDROID_CLIENT_VERSION: &str = "20.10.38";

/// Fetches captions via the innertube player endpoint.
pub struct PlayerFetcher {
    base_url: String,
}

impl PlayerFetcher {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for PlayerFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the first caption track URL out of a player response, normalized to
/// request `fmt=json3`.
pub(crate) fn caption_track_url(payload: &Value) -> Result<String, FetchError> {
    let base_url = payload
        .pointer("/captions/playerCaptionsTracklistRenderer/captionTracks/0/baseUrl")
        .and_then(Value::as_str)
        .ok_or_else(|| FetchError::Parse("no caption tracks in player response".to_string()))?;

    if base_url.contains("fmt=") {
        Ok(base_url.to_string())
    } else {
        Ok(format!("{base_url}&fmt=json3"))
    }
}

#[async_trait]
impl Fetcher for PlayerFetcher {
    fn name(&self) -> &'static str {
        "player"
    }

    async fn fetch_once(
        &self,
        id: &ResourceId,
        relay: &RelayAddress,
        timeout: Duration,
    ) -> FetchOutcome {
        let client = proxied_client(relay, timeout)?;

        let body = json!({
            "context": {
                "client": {
                    "clientName": ANDROID_CLIENT_NAME,
                    "clientVersion": ANDROID_CLIENT_VERSION,
                    "androidSdkVersion": 30,
                }
            },
            "videoId": id.as_str(),
        });

        let response = client
            .post(format!("{}/youtubei/v1/player", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(classify)?
            .error_for_status()
            .map_err(classify)?;

        let payload: Value = response.json().await.map_err(classify)?;
        let track_url = caption_track_url(&payload)?;

        // Second hop through the same relay for the actual captions.
        let response = client
            .get(&track_url)
            .send()
            .await
            .map_err(classify)?
            .error_for_status()
            .map_err(classify)?;

        let payload: Value = response.json().await.map_err(classify)?;

        let text = extract_json3(&payload);
        if text.is_empty() {
            return Err(FetchError::EmptyResult);
        }
        Ok(text)
    }
}
