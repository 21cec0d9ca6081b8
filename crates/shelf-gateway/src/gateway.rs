//! The product gateway trait.

use std::sync::Arc;

use async_trait::async_trait;
use shelf_model::ProductResponse;

use crate::error::FetchError;

/// Source of product feeds.
///
/// A fetch takes no arguments and returns the whole feed: header, filter
/// labels and products. Latency, retries and failures are the gateway's
/// business; callers only see the final result.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// Fetch the current product feed.
    async fn fetch(&self) -> Result<ProductResponse, FetchError>;

    /// Name used in logs.
    fn name(&self) -> &str {
        "gateway"
    }
}

#[async_trait]
impl<G: ProductGateway + ?Sized> ProductGateway for Arc<G> {
    async fn fetch(&self) -> Result<ProductResponse, FetchError> {
        (**self).fetch().await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<G: ProductGateway + ?Sized> ProductGateway for Box<G> {
    async fn fetch(&self) -> Result<ProductResponse, FetchError> {
        (**self).fetch().await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
