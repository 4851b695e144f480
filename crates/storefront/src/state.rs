//! Application state shared across handlers.

use std::sync::Arc;

use crate::cache::CacheStore;
use crate::config::StorefrontConfig;
use crate::services::{
    CartService, CatalogService, CheckoutOrchestrator, OrderFinalizer, OrdersService,
    SatelliteService,
};
use crate::store::{RemoteClient, StoreApi};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds the backend client (absent in
/// degraded mode), the shared cache, and the service layer built on top.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    cache: CacheStore,
    catalog: CatalogService,
    cart: CartService,
    checkout: CheckoutOrchestrator,
    finalizer: OrderFinalizer,
    orders: OrdersService,
    satellite: SatelliteService,
}

impl AppState {
    /// Create a new application state from configuration.
    ///
    /// With no backend configured the state is built in degraded mode:
    /// reads serve empty projections and mutations fail.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment callback URLs cannot be derived
    /// from the configured base URL.
    pub fn new(config: StorefrontConfig) -> Result<Self, url::ParseError> {
        let store: Option<Arc<dyn StoreApi>> = config
            .backend
            .as_ref()
            .map(|backend| Arc::new(RemoteClient::new(backend)) as Arc<dyn StoreApi>);

        let cache = CacheStore::new();
        let catalog = CatalogService::new(store.clone(), cache.clone());
        let cart = CartService::new(store.clone(), cache.clone(), catalog.clone());
        let checkout = CheckoutOrchestrator::new(
            store.clone(),
            cart.clone(),
            &config.base_url,
            &config.currency,
        )?;
        let finalizer = OrderFinalizer::new(store.clone(), cache.clone());
        let orders = OrdersService::new(store.clone(), cache.clone());
        let satellite = SatelliteService::new(store, cache.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                cache,
                catalog,
                cart,
                checkout,
                finalizer,
                orders,
                satellite,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn cache(&self) -> &CacheStore {
        &self.inner.cache
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    #[must_use]
    pub fn cart(&self) -> &CartService {
        &self.inner.cart
    }

    #[must_use]
    pub fn checkout(&self) -> &CheckoutOrchestrator {
        &self.inner.checkout
    }

    #[must_use]
    pub fn finalizer(&self) -> &OrderFinalizer {
        &self.inner.finalizer
    }

    #[must_use]
    pub fn orders(&self) -> &OrdersService {
        &self.inner.orders
    }

    #[must_use]
    pub fn satellite(&self) -> &SatelliteService {
        &self.inner.satellite
    }
}
