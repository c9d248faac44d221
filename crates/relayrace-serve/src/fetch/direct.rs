//! Direct timedtext fetch.
//!
//! The primary strategy: hit the provider's `timedtext` endpoint straight
//! through the relay and extract the `fmt=json3` payload. Usually the
//! fastest path when a relay is alive.

use std::time::Duration;

use async_trait::async_trait;

use relayrace_core::{FetchError, FetchOutcome, Fetcher, RelayAddress, ResourceId};

use super::{classify, extract_json3, proxied_client};

const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

/// Fetches captions from the timedtext endpoint.
pub struct DirectFetcher {
    base_url: String,
}

impl DirectFetcher {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for DirectFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for DirectFetcher {
    fn name(&self) -> &'static str {
        "direct"
    }

    async fn fetch_once(
        &self,
        id: &ResourceId,
        relay: &RelayAddress,
        timeout: Duration,
    ) -> FetchOutcome {
        let client = proxied_client(relay, timeout)?;

        let url = format!(
            "{}/api/timedtext?video_id={}&fmt=json3&lang=en",
            self.base_url, id
        );

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(classify)?
            .error_for_status()
            .map_err(classify)?;

        let payload: serde_json::Value = response.json().await.map_err(classify)?;

        let text = extract_json3(&payload);
        if text.is_empty() {
            return Err(FetchError::EmptyResult);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetcher_is_named_direct() {
        assert_eq!(DirectFetcher::new().name(), "direct");
    }
}
