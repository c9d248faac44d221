//! Scripted fakes shared by the orchestration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{FetchError, FetchOutcome};
use crate::fetcher::{Fetcher, ResourceId};
use crate::relay::{RelayAddress, RelayPool};

/// Build a relay address for a test host.
pub(crate) fn relay(host: &str) -> RelayAddress {
    RelayAddress::parse(&format!("http://{host}:8080")).expect("valid test relay")
}

/// Build a pool preloaded with one relay per host, all healthy.
pub(crate) fn pool_of(hosts: &[&str]) -> RelayPool {
    let pool = RelayPool::new();
    pool.load(hosts.iter().map(|h| relay(h)).collect());
    pool
}

/// What a scripted relay does when asked to fetch.
#[derive(Debug, Clone)]
pub(crate) enum Script {
    /// Return this text immediately.
    Succeed(&'static str),
    /// Return this text after a delay.
    SucceedAfter(Duration, &'static str),
    /// Fail immediately with this error.
    Fail(FetchError),
    /// Never complete; the caller's timeout or abort has to end it.
    Hang,
}

/// A fetcher whose behavior is keyed by relay host, with a call counter so
/// tests can assert how often the network would have been touched.
#[derive(Debug, Default)]
pub(crate) struct ScriptedFetcher {
    scripts: HashMap<String, Script>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, host: &str, script: Script) -> Self {
        self.scripts.insert(host.to_string(), script);
        self
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch_once(
        &self,
        _id: &ResourceId,
        relay: &RelayAddress,
        _timeout: Duration,
    ) -> FetchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.scripts.get(relay.host()) {
            Some(Script::Succeed(text)) => Ok(text.to_string()),
            Some(Script::SucceedAfter(delay, text)) => {
                tokio::time::sleep(*delay).await;
                Ok(text.to_string())
            }
            Some(Script::Fail(err)) => Err(err.clone()),
            Some(Script::Hang) => {
                tokio::time::sleep(Duration::from_secs(86400)).await;
                Err(FetchError::Timeout)
            }
            None => Err(FetchError::Connection(format!(
                "no script for relay {relay}"
            ))),
        }
    }
}
