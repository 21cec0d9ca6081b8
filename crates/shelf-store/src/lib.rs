//! Observable product state for a product overview session.
//!
//! This crate provides:
//! - `ProductStore` - Owns the session state and runs the fetch lifecycle
//! - `ProductStoreState` - Snapshot of everything the screens render from
//! - `StoreConfig` - Fetch timeout and artificial refresh latency
//! - `StoreError` - The single failure kind a load can end in
//!
//! Observers subscribe to a watch channel and receive whole snapshots; the
//! filtered product list is derived inside each mutation and cached in the
//! snapshot.

mod config;
mod error;
mod state;
mod store;

pub use config::*;
pub use error::*;
pub use state::*;
pub use store::*;
