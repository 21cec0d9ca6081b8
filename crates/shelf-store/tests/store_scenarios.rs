//! End-to-end behavior of the product store against scripted gateways.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shelf_gateway::{FetchError, ProductGateway};
use shelf_model::{
    Currency, FilterKind, FilterLabel, Header, Money, Product, ProductId, ProductResponse,
};
use shelf_store::{FetchPhase, LoadOutcome, ProductStore, StoreConfig};
use tokio::sync::Notify;

/// Answers fetches from a queue of prepared results.
struct ScriptedGateway {
    script: Mutex<VecDeque<Result<ProductResponse, FetchError>>>,
}

impl ScriptedGateway {
    fn new(script: Vec<Result<ProductResponse, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }
}

#[async_trait]
impl ProductGateway for ScriptedGateway {
    async fn fetch(&self) -> Result<ProductResponse, FetchError> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Unavailable("script exhausted".into())))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Holds every fetch until released.
struct GatedGateway {
    release: Notify,
    response: ProductResponse,
}

#[async_trait]
impl ProductGateway for GatedGateway {
    async fn fetch(&self) -> Result<ProductResponse, FetchError> {
        self.release.notified().await;
        Ok(self.response.clone())
    }
}

fn product(id: u64, available: bool) -> Product {
    Product::new(id, format!("Product {}", id), Money::new(1000 + id as i64, Currency::EUR))
        .with_available(available)
}

fn feed(title: &str, products: Vec<Product>) -> ProductResponse {
    ProductResponse {
        header: Header::new(title, "subtitle"),
        filters: FilterKind::KINDS.iter().map(|k| FilterLabel::from(*k)).collect(),
        products,
    }
}

fn ids(products: &[Product]) -> Vec<u64> {
    products.iter().map(|p| p.id.get()).collect()
}

fn mixed_store() -> ProductStore<ScriptedGateway> {
    ProductStore::with_config(
        ScriptedGateway::new(vec![Ok(feed(
            "Mixed",
            vec![product(1, true), product(2, false), product(3, true), product(4, false)],
        ))]),
        StoreConfig::unbounded(),
    )
}

#[tokio::test]
async fn test_available_filter_after_load() {
    let store = ProductStore::new(ScriptedGateway::new(vec![Ok(feed(
        "Three",
        vec![product(1, true), product(2, false), product(3, true)],
    ))]));

    assert_eq!(store.load().await, LoadOutcome::Loaded { products: 3 });
    store.set_filter(FilterKind::Available);

    assert_eq!(ids(&store.filtered_products()), vec![1, 3]);
}

#[tokio::test]
async fn test_favorite_then_vorgemerkt_filter() {
    let store = mixed_store();
    store.load().await;

    let product_a = store.state().products()[1].clone();
    assert!(store.toggle_favorite(&product_a));
    store.set_filter("vorgemerkt");

    assert_eq!(store.filtered_products(), vec![product_a]);
}

#[tokio::test]
async fn test_double_toggle_empties_favorites() {
    let store = mixed_store();
    store.load().await;

    let product_a = store.state().products()[0].clone();
    store.toggle_favorite(&product_a);
    store.toggle_favorite(&product_a);

    assert!(store.state().favorites().is_empty());
}

#[tokio::test]
async fn test_toggle_parity() {
    let store = mixed_store();
    store.load().await;
    let id = ProductId::new(3);

    for calls in 0..7u32 {
        let initially = store.state().is_favorite(id);
        for _ in 0..calls {
            store.toggle_favorite_id(id);
        }
        assert_eq!(store.state().is_favorite(id), initially ^ (calls % 2 == 1));
    }
}

#[tokio::test]
async fn test_all_filter_is_identity_for_any_mix() {
    let store = mixed_store();
    store.load().await;
    store.toggle_favorite_id(ProductId::new(2));
    store.toggle_favorite_id(ProductId::new(4));

    store.set_filter("Alle");
    let state = store.state();
    assert_eq!(state.filtered_products(), state.products());
}

#[tokio::test]
async fn test_unknown_label_reads_as_all() {
    let store = mixed_store();
    store.load().await;

    store.set_filter("Sonderangebote");
    let state = store.state();
    assert_eq!(state.selected_filter().as_str(), "Sonderangebote");
    assert_eq!(state.filter_kind(), FilterKind::All);
    assert_eq!(state.filtered_products().len(), 4);
}

#[tokio::test]
async fn test_available_filter_is_exact_subset() {
    let store = mixed_store();
    store.load().await;
    store.set_filter("VERFÜGBAR");

    let state = store.state();
    let expected: Vec<_> = state.products().iter().filter(|p| p.available).cloned().collect();
    assert_eq!(state.filtered_products(), expected.as_slice());
}

#[tokio::test]
async fn test_favorited_filter_is_intersection_in_feed_order() {
    let store = mixed_store();
    store.load().await;
    store.toggle_favorite_id(ProductId::new(4));
    store.toggle_favorite_id(ProductId::new(1));
    store.toggle_favorite_id(ProductId::new(77));
    store.set_filter(FilterKind::Favorited);

    assert_eq!(ids(&store.filtered_products()), vec![1, 4]);
}

#[tokio::test]
async fn test_failure_discards_previous_products() {
    let store = ProductStore::new(ScriptedGateway::new(vec![
        Ok(feed("First", vec![product(1, true), product(2, true)])),
        Err(FetchError::Unavailable("down".into())),
    ]));

    store.load().await;
    let outcome = store.load().await;

    assert!(matches!(outcome, LoadOutcome::Failed(_)));
    let state = store.state();
    assert!(state.products().is_empty());
    assert!(state.filtered_products().is_empty());
    assert!(state.has_error());
    assert!(!state.is_loading());
    // Labels and header from the last success stay in place.
    assert_eq!(state.header().title, "First");
    assert_eq!(state.filter_labels().len(), 3);
}

#[tokio::test]
async fn test_success_after_failure_replaces_products() {
    let second = vec![product(9, false), product(8, true)];
    let store = ProductStore::new(ScriptedGateway::new(vec![
        Err(FetchError::Io("connection reset".into())),
        Ok(feed("Second", second.clone())),
    ]));

    store.load().await;
    assert!(store.state().has_error());

    assert!(store.load().await.is_loaded());
    let state = store.state();
    assert!(!state.has_error());
    assert_eq!(state.products(), second.as_slice());
    assert_eq!(state.header().title, "Second");
}

#[tokio::test]
async fn test_favorites_survive_refresh_even_when_stale() {
    let store = ProductStore::new(ScriptedGateway::new(vec![
        Ok(feed("First", vec![product(1, true), product(2, true)])),
        Ok(feed("Second", vec![product(2, true), product(3, true)])),
    ]));

    store.load().await;
    store.toggle_favorite_id(ProductId::new(1));
    store.toggle_favorite_id(ProductId::new(2));
    store.set_filter(FilterKind::Favorited);
    store.load().await;

    let state = store.state();
    assert_eq!(
        state.favorites(),
        &HashSet::from([ProductId::new(1), ProductId::new(2)])
    );
    assert_eq!(ids(state.filtered_products()), vec![2]);
}

#[tokio::test]
async fn test_selected_product_not_validated_against_feed() {
    let store = ProductStore::new(ScriptedGateway::new(vec![
        Ok(feed("First", vec![product(1, true)])),
        Ok(feed("Second", vec![product(2, true)])),
    ]));

    store.load().await;
    let first = store.state().products()[0].clone();
    store.select_product(first.clone());
    store.load().await;

    assert_eq!(store.selected_product(), Some(first));
}

#[tokio::test]
async fn test_concurrent_load_is_skipped() {
    let gateway = Arc::new(GatedGateway {
        release: Notify::new(),
        response: feed("Gated", vec![product(1, true)]),
    });
    let store = Arc::new(ProductStore::with_config(
        gateway.clone(),
        StoreConfig::unbounded(),
    ));
    let mut rx = store.subscribe();

    let first = tokio::spawn({
        let store = store.clone();
        async move { store.load().await }
    });
    rx.wait_for(|state| state.is_loading()).await.unwrap();

    assert_eq!(store.load().await, LoadOutcome::Skipped);
    assert!(store.state().is_loading());

    gateway.release.notify_one();
    assert_eq!(first.await.unwrap(), LoadOutcome::Loaded { products: 1 });
    assert_eq!(store.state().phase(), FetchPhase::Idle);
}

#[tokio::test]
async fn test_observer_sees_loading_then_result() {
    let gateway = Arc::new(GatedGateway {
        release: Notify::new(),
        response: feed("Observed", vec![product(1, true), product(2, false)]),
    });
    let store = Arc::new(ProductStore::new(gateway.clone()));
    let mut rx = store.subscribe();

    let load = tokio::spawn({
        let store = store.clone();
        async move { store.load().await }
    });

    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_loading());

    gateway.release.notify_one();
    rx.changed().await.unwrap();
    {
        let state = rx.borrow_and_update();
        assert!(!state.is_loading());
        assert_eq!(state.products().len(), 2);
    }

    load.await.unwrap();
}
