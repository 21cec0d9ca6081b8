//! Product type and display helpers.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::ids::ProductId;
use crate::money::Money;

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// A product in the feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Short description for listings.
    pub description: String,
    /// Full description for the details view.
    #[serde(default)]
    pub long_description: String,
    /// Price of the product.
    pub price: Money,
    /// Average rating, 0.0 to 5.0.
    #[serde(default)]
    pub rating: f64,
    /// Unix timestamp (seconds) of the release.
    pub release_date: i64,
    /// Whether the product can currently be ordered.
    pub available: bool,
    /// Image shown next to the listing.
    #[serde(default, rename = "imageURL", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Accent color from the feed (e.g., "blue").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
}

impl Product {
    /// Create a new product with empty descriptions.
    pub fn new(id: u64, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            description: String::new(),
            long_description: String::new(),
            price,
            rating: 0.0,
            release_date: 0,
            available: true,
            image_url: None,
            color_code: None,
        }
    }

    /// Set the short and long descriptions.
    pub fn with_descriptions(
        mut self,
        description: impl Into<String>,
        long_description: impl Into<String>,
    ) -> Self {
        self.description = description.into();
        self.long_description = long_description.into();
        self
    }

    /// Set the rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Set the release timestamp.
    pub fn with_release_date(mut self, release_date: i64) -> Self {
        self.release_date = release_date;
        self
    }

    /// Set availability.
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Rating clamped into the valid range. NaN reads as zero.
    pub fn clamped_rating(&self) -> f64 {
        if self.rating.is_nan() {
            return 0.0;
        }
        self.rating.clamp(0.0, MAX_RATING)
    }

    /// Five stars describing the rating: full stars first, then at most one
    /// half star when the remainder is at least 0.5, then empty stars.
    pub fn stars(&self) -> [Star; 5] {
        let rating = self.clamped_rating();
        let full = rating.trunc() as usize;
        let half = rating - rating.trunc() >= 0.5;

        let mut stars = [Star::Empty; 5];
        for (i, star) in stars.iter_mut().enumerate() {
            if i < full {
                *star = Star::Full;
            } else if i == full && half {
                *star = Star::Half;
            }
        }
        stars
    }

    /// Release date as `dd.MM.yyyy` in UTC.
    pub fn release_date_display(&self) -> Option<String> {
        DateTime::from_timestamp(self.release_date, 0)
            .map(|date| date.format("%d.%m.%Y").to_string())
    }
}

/// One position of a five-star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Star {
    Full,
    Half,
    Empty,
}

impl Star {
    pub fn symbol(&self) -> char {
        match self {
            Star::Full => '★',
            Star::Half => '⯪',
            Star::Empty => '☆',
        }
    }
}
