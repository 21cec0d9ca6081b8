//! Session state snapshot.

use std::collections::HashSet;

use shelf_model::{
    filter_products, FilterKind, FilterLabel, Header, Product, ProductId, ProductResponse,
};

/// Fetch lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FetchPhase {
    /// No fetch in flight.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
}

/// Everything the product screens render from.
///
/// Fields are private: the store mutates them through the methods below so
/// that `filtered` is recomputed whenever products, the selected filter or
/// favorites change, and never otherwise.
#[derive(Debug, Clone, Default)]
pub struct ProductStoreState {
    products: Vec<Product>,
    filter_labels: Vec<FilterLabel>,
    selected_filter: FilterLabel,
    favorites: HashSet<ProductId>,
    header: Header,
    phase: FetchPhase,
    has_error: bool,
    selected_product: Option<Product>,
    filtered: Vec<Product>,
    completed_loads: u64,
}

impl ProductStoreState {
    /// Products from the last successful load, in feed order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products passing the selected filter, in feed order.
    pub fn filtered_products(&self) -> &[Product] {
        &self.filtered
    }

    pub fn filter_labels(&self) -> &[FilterLabel] {
        &self.filter_labels
    }

    pub fn selected_filter(&self) -> &FilterLabel {
        &self.selected_filter
    }

    /// Kind the selected label resolves to.
    pub fn filter_kind(&self) -> FilterKind {
        self.selected_filter.kind()
    }

    pub fn favorites(&self) -> &HashSet<ProductId> {
        &self.favorites
    }

    pub fn is_favorite(&self, id: ProductId) -> bool {
        self.favorites.contains(&id)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::Loading
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    /// Whether filter tabs accept input. They are inert in the error state.
    pub fn filters_enabled(&self) -> bool {
        !self.has_error
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected_product.as_ref()
    }

    /// Number of loads that reached a result, successful or not. Observers
    /// compare it to notice loads whose `Loading` snapshot they never saw.
    pub fn completed_loads(&self) -> u64 {
        self.completed_loads
    }

    /// Find a loaded product by id.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Enter `Loading`. Returns false, leaving state untouched, when a fetch
    /// is already in flight.
    pub(crate) fn begin_load(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.phase = FetchPhase::Loading;
        true
    }

    pub(crate) fn finish_success(&mut self, response: ProductResponse) {
        self.products = response.products;
        self.filter_labels = response.filters;
        self.header = response.header;
        self.has_error = false;
        self.phase = FetchPhase::Idle;
        self.completed_loads += 1;
        self.recompute();
    }

    /// Labels and header are kept; only the product list is discarded.
    pub(crate) fn finish_failure(&mut self) {
        self.products.clear();
        self.has_error = true;
        self.phase = FetchPhase::Idle;
        self.completed_loads += 1;
        self.recompute();
    }

    /// Leave `Loading` without a result, for a load that was dropped mid-fetch.
    pub(crate) fn abort_load(&mut self) -> bool {
        let was_loading = self.is_loading();
        self.phase = FetchPhase::Idle;
        was_loading
    }

    pub(crate) fn set_filter(&mut self, label: FilterLabel) -> bool {
        if self.selected_filter == label {
            return false;
        }
        self.selected_filter = label;
        self.recompute();
        true
    }

    /// Returns the new membership.
    pub(crate) fn toggle_favorite(&mut self, id: ProductId) -> bool {
        let now_favorite = if self.favorites.remove(&id) {
            false
        } else {
            self.favorites.insert(id);
            true
        };
        self.recompute();
        now_favorite
    }

    pub(crate) fn select(&mut self, product: Product) {
        self.selected_product = Some(product);
    }

    pub(crate) fn clear_selection(&mut self) -> bool {
        self.selected_product.take().is_some()
    }

    fn recompute(&mut self) {
        self.filtered = filter_products(&self.products, self.filter_kind(), &self.favorites);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_model::{Currency, Money};

    fn response(available: &[bool]) -> ProductResponse {
        ProductResponse {
            header: Header::new("Title", "Subtitle"),
            filters: FilterKind::KINDS.iter().map(|k| FilterLabel::from(*k)).collect(),
            products: available
                .iter()
                .enumerate()
                .map(|(i, a)| {
                    let id = i as u64 + 1;
                    Product::new(id, format!("P{}", id), Money::new(100, Currency::EUR))
                        .with_available(*a)
                })
                .collect(),
        }
    }

    #[test]
    fn test_initial_state() {
        let state = ProductStoreState::default();
        assert!(state.products().is_empty());
        assert_eq!(state.selected_filter().as_str(), "Alle");
        assert_eq!(state.phase(), FetchPhase::Idle);
        assert!(!state.has_error());
        assert!(state.filters_enabled());
        assert!(state.selected_product().is_none());
    }

    #[test]
    fn test_begin_load_only_once() {
        let mut state = ProductStoreState::default();
        assert!(state.begin_load());
        assert!(!state.begin_load());
        assert!(state.abort_load());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_success_recomputes_filtered() {
        let mut state = ProductStoreState::default();
        state.set_filter(FilterKind::Available.into());
        state.begin_load();
        state.finish_success(response(&[true, false, true]));

        let ids: Vec<_> = state.filtered_products().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(state.header().title, "Title");
        assert!(!state.is_loading());
    }

    #[test]
    fn test_failure_keeps_labels_and_header() {
        let mut state = ProductStoreState::default();
        state.finish_success(response(&[true]));
        state.begin_load();
        state.finish_failure();

        assert!(state.products().is_empty());
        assert!(state.filtered_products().is_empty());
        assert!(state.has_error());
        assert!(!state.filters_enabled());
        assert_eq!(state.filter_labels().len(), 3);
        assert_eq!(state.header().title, "Title");
    }

    #[test]
    fn test_completed_loads_counts_results_only() {
        let mut state = ProductStoreState::default();
        assert_eq!(state.completed_loads(), 0);

        state.begin_load();
        state.abort_load();
        assert_eq!(state.completed_loads(), 0);

        state.begin_load();
        state.finish_success(response(&[true]));
        state.begin_load();
        state.finish_failure();
        assert_eq!(state.completed_loads(), 2);
    }

    #[test]
    fn test_set_same_filter_is_not_a_change() {
        let mut state = ProductStoreState::default();
        assert!(!state.set_filter("Alle".into()));
        assert!(state.set_filter("alle".into()));
    }

    #[test]
    fn test_toggle_favorite_recomputes() {
        let mut state = ProductStoreState::default();
        state.finish_success(response(&[true, true]));
        state.set_filter(FilterKind::Favorited.into());
        assert!(state.filtered_products().is_empty());

        assert!(state.toggle_favorite(ProductId::new(2)));
        assert_eq!(state.filtered_products().len(), 1);
        assert!(!state.toggle_favorite(ProductId::new(2)));
        assert!(state.filtered_products().is_empty());
    }

    #[test]
    fn test_selection() {
        let mut state = ProductStoreState::default();
        let product = Product::new(9, "Gone", Money::new(1, Currency::EUR));
        state.select(product.clone());
        assert_eq!(state.selected_product(), Some(&product));
        assert!(state.clear_selection());
        assert!(!state.clear_selection());
    }
}
