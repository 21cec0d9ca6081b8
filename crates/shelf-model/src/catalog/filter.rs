//! Filter labels and the product filter.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::ids::ProductId;

/// The kinds of product filtering a label can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Every product.
    #[default]
    All,
    /// Only products that can be ordered.
    Available,
    /// Only products the user marked as favorite.
    Favorited,
}

impl FilterKind {
    /// All kinds in tab order.
    pub const KINDS: [FilterKind; 3] = [
        FilterKind::All,
        FilterKind::Available,
        FilterKind::Favorited,
    ];

    /// Label the feed uses for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            FilterKind::All => "Alle",
            FilterKind::Available => "Verfügbar",
            FilterKind::Favorited => "Vorgemerkt",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::All => "all",
            FilterKind::Available => "available",
            FilterKind::Favorited => "favorited",
        }
    }

    /// Resolve a label, ignoring case. Unrecognized labels select `All`.
    pub fn from_label(label: &str) -> Self {
        let wanted = label.trim().to_lowercase();
        Self::KINDS
            .into_iter()
            .find(|kind| kind.label().to_lowercase() == wanted || kind.as_str() == wanted)
            .unwrap_or_default()
    }

    /// Whether a product passes this filter.
    pub fn matches(&self, product: &Product, favorites: &HashSet<ProductId>) -> bool {
        match self {
            FilterKind::All => true,
            FilterKind::Available => product.available,
            FilterKind::Favorited => favorites.contains(&product.id),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A selectable filter label as supplied by the feed.
///
/// The text is kept verbatim; it only resolves to a [`FilterKind`] when read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterLabel(String);

impl FilterLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The filter kind this label selects.
    pub fn kind(&self) -> FilterKind {
        FilterKind::from_label(&self.0)
    }

    /// Case-insensitive label comparison, as tabs are highlighted.
    pub fn matches(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.to_lowercase()
    }
}

impl Default for FilterLabel {
    fn default() -> Self {
        FilterKind::All.into()
    }
}

impl From<FilterKind> for FilterLabel {
    fn from(kind: FilterKind) -> Self {
        Self(kind.label().to_string())
    }
}

impl From<&str> for FilterLabel {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FilterLabel {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for FilterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Filter `products` by `kind`, keeping their order.
pub fn filter_products(
    products: &[Product],
    kind: FilterKind,
    favorites: &HashSet<ProductId>,
) -> Vec<Product> {
    match kind {
        FilterKind::All => products.to_vec(),
        _ => products
            .iter()
            .filter(|p| kind.matches(p, favorites))
            .cloned()
            .collect(),
    }
}
