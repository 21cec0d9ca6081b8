//! Product listing and details rendering.

use serde::Serialize;
use shelf_model::Product;
use shelf_store::ProductStoreState;

use crate::output::{availability_badge, favorite_marker, Output};

const WIDTHS: [usize; 6] = [2, 4, 28, 12, 5, 16];

/// A product as emitted in JSON mode.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    pub favorite: bool,
    pub stars: String,
    pub release_date_display: Option<String>,
}

impl<'a> ProductView<'a> {
    pub fn new(product: &'a Product, favorite: bool) -> Self {
        Self {
            product,
            favorite,
            stars: stars(product),
            release_date_display: product.release_date_display(),
        }
    }
}

/// The listing as emitted in JSON mode.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingView<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub filter: &'a str,
    pub has_error: bool,
    pub products: Vec<ProductView<'a>>,
}

impl<'a> ListingView<'a> {
    pub fn new(state: &'a ProductStoreState) -> Self {
        Self {
            title: &state.header().title,
            subtitle: &state.header().subtitle,
            filter: state.selected_filter().as_str(),
            has_error: state.has_error(),
            products: state
                .filtered_products()
                .iter()
                .map(|p| ProductView::new(p, state.is_favorite(p.id)))
                .collect(),
        }
    }
}

/// Five rating symbols.
pub fn stars(product: &Product) -> String {
    product.stars().iter().map(|s| s.symbol()).collect()
}

/// Print header, filter tabs and the filtered product list.
pub fn listing(output: &Output, state: &ProductStoreState) {
    if output.is_json() {
        output.json(&ListingView::new(state));
        return;
    }

    output.header(&state.header().title);
    output.subtitle(&state.header().subtitle);
    filter_tabs(output, state);

    if state.has_error() {
        output.warn("Produkte konnten nicht geladen werden.");
        return;
    }

    let products = state.filtered_products();
    if products.is_empty() {
        output.info("Keine Produkte für diesen Filter.");
        return;
    }

    output.table_row(&["", "ID", "Name", "Preis", "", "Status"], &WIDTHS);
    for product in products {
        row(output, product, state.is_favorite(product.id));
    }
}

/// Print one listing row.
pub fn row(output: &Output, product: &Product, favorite: bool) {
    let id = product.id.to_string();
    let price = product.price.to_string();
    let rating = format!("{:.1}", product.clamped_rating());
    let status = availability_badge(product.available);
    let marker = favorite_marker(favorite);
    output.table_row(
        &[&marker, &id, &product.name, &price, &rating, &status],
        &WIDTHS,
    );
}

/// Print the filter tabs, highlighting the selected one. Tabs are shown
/// greyed out while the store is in the error state.
pub fn filter_tabs(output: &Output, state: &ProductStoreState) {
    if output.is_json() || state.filter_labels().is_empty() {
        return;
    }
    let selected = state.selected_filter();
    let tabs: Vec<String> = state
        .filter_labels()
        .iter()
        .map(|label| {
            let text = label.as_str();
            if !state.filters_enabled() {
                console::style(text).dim().to_string()
            } else if label == selected {
                console::style(format!("[{}]", text)).bold().cyan().to_string()
            } else {
                text.to_string()
            }
        })
        .collect();
    println!("  {}", tabs.join("  "));
}

/// Print the details view of a product.
pub fn details(output: &Output, product: &Product, favorite: bool) {
    if output.is_json() {
        output.json(&ProductView::new(product, favorite));
        return;
    }

    output.header(&product.name);
    if let Some(date) = product.release_date_display() {
        output.kv("Erschienen", &date);
    }
    output.kv("Preis", &product.price.to_string());
    output.kv(
        "Bewertung",
        &format!("{} ({:.1})", stars(product), product.clamped_rating()),
    );
    output.kv("Status", &availability_badge(product.available));
    output.kv("Vorgemerkt", if favorite { "ja" } else { "nein" });
    if let Some(color) = &product.color_code {
        output.kv("Farbe", color);
    }
    if let Some(url) = &product.image_url {
        output.kv("Bild", url);
    }

    let text = if product.long_description.is_empty() {
        &product.description
    } else {
        &product.long_description
    };
    if !text.is_empty() {
        println!();
        println!("  {}", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_model::{Currency, Money};

    #[test]
    fn test_stars_string() {
        let product = Product::new(1, "Lamp", Money::new(100, Currency::EUR)).with_rating(2.5);
        assert_eq!(stars(&product), "★★⯪☆☆");
    }

    #[test]
    fn test_product_view_json() {
        let product = Product::new(7, "Lamp", Money::new(1999, Currency::EUR))
            .with_rating(4.0)
            .with_release_date(1_500_000_000);
        let value = serde_json::to_value(ProductView::new(&product, true)).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["favorite"], true);
        assert_eq!(value["stars"], "★★★★☆");
        assert_eq!(value["releaseDateDisplay"], "14.07.2017");
        assert_eq!(value["price"]["currency"], "EUR");
    }
}
