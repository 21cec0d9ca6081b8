//! Product catalog domain types for Product Shelf.
//!
//! This crate holds the data a product overview works with:
//!
//! - **Catalog**: products, prices, star ratings, release dates
//! - **Filters**: filter labels from the feed and the kinds they resolve to
//! - **Feed**: the response shape returned by a product gateway
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashSet;
//! use shelf_model::prelude::*;
//!
//! let feed = ProductResponse::from_json(r#"{
//!     "header": { "headerTitle": "Shop", "headerDescription": "Today" },
//!     "filters": ["Alle", "Verfügbar", "Vorgemerkt"],
//!     "products": [{
//!         "id": 1, "name": "Lamp", "description": "Desk lamp",
//!         "longDescription": "A desk lamp.", "price": { "value": 19.99, "currency": "EUR" },
//!         "rating": 4.5, "releaseDate": 1500000000, "available": true
//!     }]
//! }"#).unwrap();
//!
//! let visible = filter_products(&feed.products, FilterKind::Available, &HashSet::new());
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].price.to_string(), "19.99 EUR");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod feed;

pub use error::ModelError;
pub use ids::ProductId;
pub use money::{Currency, Money};

pub use catalog::{filter_products, FilterKind, FilterLabel, Product, Star, MAX_RATING};
pub use feed::{Header, ProductResponse};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::ModelError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{filter_products, FilterKind, FilterLabel, Product, Star};

    // Feed
    pub use crate::feed::{Header, ProductResponse};
}
