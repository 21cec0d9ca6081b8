//! Fixture-backed gateway with simulated latency and outages.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use shelf_model::ProductResponse;

use crate::error::FetchError;
use crate::gateway::ProductGateway;

/// Sample feed compiled into the crate.
pub const BUNDLED_FEED: &str = include_str!("../fixtures/products.json");

/// Where a fixture gateway reads its feed from.
#[derive(Debug, Clone)]
pub enum FixtureSource {
    /// The sample feed compiled into the crate.
    Bundled,
    /// A feed held in memory.
    Inline(ProductResponse),
    /// A JSON document on disk, re-read on every fetch.
    File(PathBuf),
}

/// Fails every n-th request.
///
/// Requests are numbered from 1; request `k` fails when `k % n == 0`, so with
/// `n = 4` the 4th, 8th, 12th, ... requests fail.
#[derive(Debug)]
pub struct FaultInjector {
    fail_every: Option<u64>,
    next_request: AtomicU64,
}

impl FaultInjector {
    /// Never fail.
    pub fn none() -> Self {
        Self {
            fail_every: None,
            next_request: AtomicU64::new(1),
        }
    }

    /// Fail every `n`-th request. Zero disables injection.
    pub fn every(n: u32) -> Self {
        Self {
            fail_every: (n > 0).then_some(n as u64),
            next_request: AtomicU64::new(1),
        }
    }

    /// Count a request. Returns its number when it must fail.
    pub fn check(&self) -> Option<u64> {
        let request = self.next_request.fetch_add(1, Ordering::SeqCst);
        match self.fail_every {
            Some(n) if request % n == 0 => Some(request),
            _ => None,
        }
    }

    /// Number of requests seen so far.
    pub fn requests(&self) -> u64 {
        self.next_request.load(Ordering::SeqCst) - 1
    }
}

impl Default for FaultInjector {
    fn default() -> Self {
        Self::none()
    }
}

/// Gateway serving a fixed feed.
#[derive(Debug)]
pub struct FixtureGateway {
    source: FixtureSource,
    latency: Duration,
    faults: FaultInjector,
    name: String,
}

impl FixtureGateway {
    /// Create a gateway for the given source.
    pub fn new(source: FixtureSource) -> Self {
        Self {
            source,
            latency: Duration::ZERO,
            faults: FaultInjector::none(),
            name: "fixture".to_string(),
        }
    }

    /// Serve the bundled sample feed.
    pub fn bundled() -> Self {
        Self::new(FixtureSource::Bundled)
    }

    /// Serve an in-memory feed.
    pub fn inline(response: ProductResponse) -> Self {
        Self::new(FixtureSource::Inline(response))
    }

    /// Serve a feed file.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(FixtureSource::File(path.into()))
    }

    /// Delay every answer by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fail every `n`-th request with [`FetchError::Unavailable`].
    pub fn with_fail_every(mut self, n: u32) -> Self {
        self.faults = FaultInjector::every(n);
        self
    }

    /// Set the name used in logs.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of fetches served or refused so far.
    pub fn requests(&self) -> u64 {
        self.faults.requests()
    }

    async fn read_source(&self) -> Result<ProductResponse, FetchError> {
        match &self.source {
            FixtureSource::Bundled => Ok(ProductResponse::from_json(BUNDLED_FEED)?),
            FixtureSource::Inline(response) => Ok(response.clone()),
            FixtureSource::File(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|e| FetchError::Io(format!("{}: {}", path.display(), e)))?;
                Ok(ProductResponse::from_slice(&bytes)?)
            }
        }
    }
}

#[async_trait]
impl ProductGateway for FixtureGateway {
    async fn fetch(&self) -> Result<ProductResponse, FetchError> {
        if let Some(request) = self.faults.check() {
            tracing::debug!(gateway = %self.name, request, "injecting simulated outage");
            return Err(FetchError::Unavailable(format!(
                "simulated outage on request {}",
                request
            )));
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let response = self.read_source().await?;
        tracing::debug!(
            gateway = %self.name,
            products = response.products.len(),
            "served fixture feed"
        );
        Ok(response)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_model::{FilterKind, Header};

    #[tokio::test]
    async fn test_bundled_feed_parses() {
        let gateway = FixtureGateway::bundled();
        let feed = gateway.fetch().await.unwrap();

        assert_eq!(feed.header.title, "Neue Produkte");
        assert_eq!(feed.products.len(), 5);
        let kinds: Vec<_> = feed.filters.iter().map(|f| f.kind()).collect();
        assert_eq!(kinds, FilterKind::KINDS.to_vec());
    }

    #[tokio::test]
    async fn test_fail_every_fourth_request() {
        let gateway = FixtureGateway::bundled().with_fail_every(4);

        let mut outcomes = Vec::new();
        for _ in 0..8 {
            outcomes.push(gateway.fetch().await.is_ok());
        }

        assert_eq!(
            outcomes,
            vec![true, true, true, false, true, true, true, false]
        );
        assert_eq!(gateway.requests(), 8);
    }

    #[tokio::test]
    async fn test_fail_every_zero_never_fails() {
        let gateway = FixtureGateway::bundled().with_fail_every(0);
        for _ in 0..5 {
            assert!(gateway.fetch().await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_injected_error_is_unavailable() {
        let gateway = FixtureGateway::bundled().with_fail_every(1);
        let err = gateway.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Unavailable(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_inline_feed() {
        let response = ProductResponse {
            header: Header::new("Title", "Sub"),
            filters: vec!["Alle".into()],
            products: Vec::new(),
        };
        let gateway = FixtureGateway::inline(response.clone());
        assert_eq!(gateway.fetch().await.unwrap(), response);
    }

    #[tokio::test]
    async fn test_file_feed() {
        let path = std::env::temp_dir().join(format!("shelf-feed-{}.json", std::process::id()));
        std::fs::write(&path, BUNDLED_FEED).unwrap();

        let gateway = FixtureGateway::from_file(&path);
        let feed = gateway.fetch().await.unwrap();
        assert_eq!(feed.products.len(), 5);

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let gateway = FixtureGateway::from_file("/nonexistent/shelf/products.json");
        let err = gateway.fetch().await.unwrap_err();
        match err {
            FetchError::Io(msg) => assert!(msg.contains("/nonexistent/shelf/products.json")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_file_is_not_retryable() {
        let path = std::env::temp_dir().join(format!("shelf-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();

        let err = FixtureGateway::from_file(&path).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Deserialization(_)));
        assert!(!err.is_retryable());

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let gateway = FixtureGateway::bundled().with_latency(Duration::from_millis(750));
        let start = tokio::time::Instant::now();
        gateway.fetch().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(750));
    }
}
