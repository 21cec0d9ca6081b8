//! The product store.

use shelf_gateway::{FetchError, ProductGateway};
use shelf_model::{FilterLabel, Product, ProductId};
use tokio::sync::watch;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::state::ProductStoreState;

/// How a call to [`ProductStore::load`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// New data was published.
    Loaded { products: usize },
    /// The fetch failed; the product list was cleared and `has_error` set.
    Failed(StoreError),
    /// Another load was already in flight; nothing changed.
    Skipped,
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// Owner of the product session state.
///
/// All mutations go through the watch channel in a single modify call, so
/// subscribers only ever observe complete snapshots. Share it behind an `Arc`
/// to load from a background task while the session keeps mutating filters
/// and favorites.
pub struct ProductStore<G> {
    gateway: G,
    config: StoreConfig,
    state: watch::Sender<ProductStoreState>,
}

impl<G: ProductGateway> ProductStore<G> {
    /// Create an empty store with default configuration.
    pub fn new(gateway: G) -> Self {
        Self::with_config(gateway, StoreConfig::default())
    }

    /// Create an empty store.
    pub fn with_config(gateway: G, config: StoreConfig) -> Self {
        let (state, _) = watch::channel(ProductStoreState::default());
        Self {
            gateway,
            config,
            state,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ProductStoreState> {
        self.state.subscribe()
    }

    /// Borrow the current snapshot. Do not hold it across an await.
    pub fn state(&self) -> watch::Ref<'_, ProductStoreState> {
        self.state.borrow()
    }

    /// Fetch products through the gateway and publish the result.
    ///
    /// A call made while another load is in flight returns
    /// [`LoadOutcome::Skipped`] immediately. Failures never propagate as
    /// errors; they clear the product list and raise `has_error`.
    pub async fn load(&self) -> LoadOutcome {
        if !self.state.send_if_modified(ProductStoreState::begin_load) {
            tracing::debug!(gateway = %self.gateway.name(), "load already in flight, skipping");
            return LoadOutcome::Skipped;
        }

        let mut guard = LoadGuard {
            state: &self.state,
            finished: false,
        };

        tracing::debug!(gateway = %self.gateway.name(), "loading products");
        let result = self.fetch().await;
        guard.finished = true;

        match result {
            Ok(response) => {
                let products = response.products.len();
                self.state.send_modify(|state| state.finish_success(response));
                tracing::info!(gateway = %self.gateway.name(), products, "products loaded");
                LoadOutcome::Loaded { products }
            }
            Err(e) => {
                let err = StoreError::from(e);
                self.state.send_modify(ProductStoreState::finish_failure);
                tracing::warn!(gateway = %self.gateway.name(), error = %err, "product load failed");
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Load again, bracketed by the configured artificial delay.
    pub async fn refresh(&self) -> LoadOutcome {
        let delay = self.config.refresh_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let outcome = self.load().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        outcome
    }

    /// Select a filter label. The label is stored as given and resolved
    /// when the filtered list is computed.
    pub fn set_filter(&self, label: impl Into<FilterLabel>) {
        let label = label.into();
        tracing::debug!(filter = %label, "filter selected");
        self.state.send_if_modified(|state| state.set_filter(label));
    }

    /// Flip favorite membership of `product`. Returns the new membership.
    pub fn toggle_favorite(&self, product: &Product) -> bool {
        self.toggle_favorite_id(product.id)
    }

    /// Flip favorite membership of the product with `id`.
    pub fn toggle_favorite_id(&self, id: ProductId) -> bool {
        let mut now_favorite = false;
        self.state
            .send_modify(|state| now_favorite = state.toggle_favorite(id));
        tracing::debug!(product = %id, favorite = now_favorite, "favorite toggled");
        now_favorite
    }

    /// Set the product shown in the details view.
    pub fn select_product(&self, product: Product) {
        self.state.send_modify(|state| state.select(product));
    }

    pub fn clear_selection(&self) {
        self.state.send_if_modified(ProductStoreState::clear_selection);
    }

    pub fn selected_product(&self) -> Option<Product> {
        self.state.borrow().selected_product().cloned()
    }

    /// Current filtered list.
    pub fn filtered_products(&self) -> Vec<Product> {
        self.state.borrow().filtered_products().to_vec()
    }

    async fn fetch(&self) -> Result<shelf_model::ProductResponse, FetchError> {
        match self.config.fetch_timeout() {
            Some(limit) => tokio::time::timeout(limit, self.gateway.fetch())
                .await
                .unwrap_or(Err(FetchError::Timeout(limit))),
            None => self.gateway.fetch().await,
        }
    }
}

/// Returns the store to `Idle` if a load future is dropped before the
/// gateway answers.
struct LoadGuard<'a> {
    state: &'a watch::Sender<ProductStoreState>,
    finished: bool,
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.state.send_if_modified(ProductStoreState::abort_load);
            tracing::debug!("load dropped before completion");
        }
    }
}
