//! Concrete provider fetchers.
//!
//! Each fetcher performs exactly one retrieval attempt through one relay,
//! building a fresh reqwest client with that relay as its proxy and the
//! per-attempt timeout as the client timeout. Retries belong to the race
//! coordinator, never here.

mod direct;
mod player;

pub use direct::DirectFetcher;
pub use player::PlayerFetcher;

use std::time::Duration;

use relayrace_core::{FetchError, RelayAddress};

/// Browser User-Agent sent with every provider request. Some relays pass
/// requests through verbatim, and the provider serves captions more reliably
/// to browser-looking clients.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Build a client routed through `relay` and bounded by `timeout`.
pub(crate) fn proxied_client(
    relay: &RelayAddress,
    timeout: Duration,
) -> Result<reqwest::Client, FetchError> {
    let proxy = reqwest::Proxy::all(relay.proxy_url())
        .map_err(|err| FetchError::Connection(format!("invalid proxy for {relay}: {err}")))?;

    reqwest::Client::builder()
        .proxy(proxy)
        .timeout(timeout)
        .user_agent(BROWSER_USER_AGENT)
        .build()
        .map_err(|err| FetchError::Connection(format!("failed to build client: {err}")))
}

/// Map a reqwest error onto the fetch failure taxonomy.
pub(crate) fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if let Some(status) = err.status() {
        FetchError::Upstream(status.as_u16())
    } else if err.is_decode() {
        FetchError::Parse(err.to_string())
    } else {
        FetchError::Connection(err.to_string())
    }
}

/// Extract transcript text from a `fmt=json3` caption payload.
///
/// The payload is `{"events": [{"segs": [{"utf8": "..."}]}]}`; events without
/// segments (timing markers) are skipped. Returns the concatenated, trimmed
/// text — possibly empty, which callers must treat as a failure.
pub(crate) fn extract_json3(payload: &serde_json::Value) -> String {
    let mut parts: Vec<&str> = Vec::new();

    if let Some(events) = payload.get("events").and_then(|v| v.as_array()) {
        for event in events {
            if let Some(segs) = event.get("segs").and_then(|v| v.as_array()) {
                for seg in segs {
                    if let Some(utf8) = seg.get("utf8").and_then(|v| v.as_str()) {
                        parts.push(utf8);
                    }
                }
            }
        }
    }

    parts.concat().trim().to_string()
}
