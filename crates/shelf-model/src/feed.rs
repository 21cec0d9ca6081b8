//! Product feed response.

use serde::{Deserialize, Serialize};

use crate::catalog::{FilterLabel, Product};
use crate::error::ModelError;

/// Title and subtitle shown above the product list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    #[serde(rename = "headerTitle")]
    pub title: String,
    #[serde(rename = "headerDescription")]
    pub subtitle: String,
}

impl Header {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}

/// Everything a single gateway fetch returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub header: Header,
    #[serde(default)]
    pub filters: Vec<FilterLabel>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl ProductResponse {
    /// Parse a feed document.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a feed document from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FilterKind;

    #[test]
    fn test_parse_feed() {
        let feed = ProductResponse::from_json(
            r#"{
                "header": { "headerTitle": "Neue Produkte", "headerDescription": "Unsere Auswahl" },
                "filters": ["Alle", "Verfügbar", "Vorgemerkt"],
                "products": []
            }"#,
        )
        .unwrap();

        assert_eq!(feed.header, Header::new("Neue Produkte", "Unsere Auswahl"));
        let kinds: Vec<_> = feed.filters.iter().map(FilterLabel::kind).collect();
        assert_eq!(kinds, FilterKind::KINDS.to_vec());
        assert!(feed.products.is_empty());
    }

    #[test]
    fn test_parse_feed_malformed() {
        let err = ProductResponse::from_json(r#"{"header": 3}"#).unwrap_err();
        assert!(matches!(err, ModelError::SerializationError(_)));
    }
}
