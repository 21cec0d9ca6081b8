//! Store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for a [`ProductStore`](crate::ProductStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Upper bound on a single gateway fetch, in milliseconds. Zero disables it.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: Option<u64>,

    /// Artificial delay before and after a refresh, in milliseconds.
    #[serde(default)]
    pub refresh_delay_ms: u64,
}

fn default_fetch_timeout_ms() -> Option<u64> {
    Some(10_000)
}

impl StoreConfig {
    /// Config without timeout or refresh delay.
    pub fn unbounded() -> Self {
        Self {
            fetch_timeout_ms: None,
            refresh_delay_ms: 0,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: default_fetch_timeout_ms(),
            refresh_delay_ms: 0,
        }
    }
}
