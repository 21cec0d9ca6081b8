//! Product catalog module.
//!
//! Contains the product type and the filter applied to product lists.

mod filter;
mod product;

pub use filter::{filter_products, FilterKind, FilterLabel};
pub use product::{Product, Star, MAX_RATING};
