//! Gateway configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fixture::FixtureGateway;
use crate::gateway::ProductGateway;
use crate::retry::{BackoffStrategy, RetryPolicy, RetryingGateway};

/// Configuration for the product gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Feed file to serve. The bundled sample feed is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture: Option<PathBuf>,

    /// Artificial latency added to every fetch, in milliseconds.
    #[serde(default)]
    pub latency_ms: u64,

    /// Fail every n-th request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_every: Option<u32>,

    /// Retry behavior.
    #[serde(default)]
    pub retry: RetryConfig,
}

impl GatewayConfig {
    /// Assemble the configured gateway.
    pub fn build(&self) -> Arc<dyn ProductGateway> {
        let mut fixture = match &self.fixture {
            Some(path) => FixtureGateway::from_file(path),
            None => FixtureGateway::bundled(),
        }
        .with_latency(Duration::from_millis(self.latency_ms));

        if let Some(n) = self.fail_every {
            fixture = fixture.with_fail_every(n);
        }

        if self.retry.max_attempts == 0 {
            return Arc::new(fixture);
        }
        Arc::new(RetryingGateway::new(fixture, self.retry.policy()))
    }
}

/// Retry section of the gateway configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt. Zero disables retrying.
    #[serde(default)]
    pub max_attempts: u32,

    /// Delay between attempts.
    #[serde(default)]
    pub backoff: BackoffConfig,
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts).with_backoff(self.backoff.strategy())
    }
}

/// Backoff strategy as written in config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackoffConfig {
    None,
    Fixed { delay_ms: u64 },
    Exponential { base_ms: u64, max_ms: u64 },
}

impl BackoffConfig {
    pub fn strategy(&self) -> BackoffStrategy {
        match *self {
            BackoffConfig::None => BackoffStrategy::None,
            BackoffConfig::Fixed { delay_ms } => {
                BackoffStrategy::Fixed(Duration::from_millis(delay_ms))
            }
            BackoffConfig::Exponential { base_ms, max_ms } => BackoffStrategy::Exponential {
                base: Duration::from_millis(base_ms),
                max: Duration::from_millis(max_ms),
            },
        }
    }
}

impl Default for BackoffConfig {
    fn default() -> Self {
        BackoffConfig::Exponential {
            base_ms: 200,
            max_ms: 2000,
        }
    }
}
