//! Product gateway: the boundary the product store fetches through.
//!
//! This crate provides:
//! - `ProductGateway` - The fetch seam the store depends on
//! - `FixtureGateway` - Feed served from a JSON document, with latency and fault injection
//! - `RetryingGateway` - Retry decorator driven by a `RetryPolicy`
//! - `GatewayConfig` - Serde configuration that assembles the above

mod config;
mod error;
mod fixture;
mod gateway;
mod retry;

pub use config::*;
pub use error::*;
pub use fixture::*;
pub use gateway::*;
pub use retry::*;
