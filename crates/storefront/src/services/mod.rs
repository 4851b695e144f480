//! Application services over the remote store client and the cache layer.
//!
//! Services are the only writers of the cache: every mutation goes through
//! a service, which invalidates exactly the keys it can have affected
//! before returning to its caller. Route handlers are thin adapters over
//! these services.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod finalize;
pub mod orders;
pub mod satellite;

pub use cart::CartService;
pub use catalog::CatalogService;
pub use checkout::{CheckoutOrchestrator, CheckoutState};
pub use finalize::OrderFinalizer;
pub use orders::OrdersService;
pub use satellite::SatelliteService;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod testkit {
    //! Shared construction for service tests against the in-memory backend.

    use std::sync::Arc;

    use velvet_penguin_core::{CartItem, CustomerId, Product};

    use crate::cache::CacheStore;
    use crate::store::mock::MockStore;
    use crate::store::StoreApi;

    use super::{
        CartService, CatalogService, CheckoutOrchestrator, OrderFinalizer, OrdersService,
        SatelliteService,
    };

    pub(crate) struct Harness {
        pub mock: Arc<MockStore>,
        pub catalog: CatalogService,
        pub cart: CartService,
        pub checkout: CheckoutOrchestrator,
        pub finalizer: OrderFinalizer,
        pub orders: OrdersService,
        pub satellite: SatelliteService,
    }

    impl Harness {
        pub(crate) fn new(mock: MockStore) -> Self {
            let mock = Arc::new(mock);
            let store: Option<Arc<dyn StoreApi>> = Some(mock.clone() as Arc<dyn StoreApi>);
            Self::build(mock, store)
        }

        /// A harness with no backend client at all (degraded mode).
        pub(crate) fn detached() -> Self {
            Self::build(Arc::new(MockStore::new()), None)
        }

        fn build(mock: Arc<MockStore>, store: Option<Arc<dyn StoreApi>>) -> Self {
            let cache = CacheStore::new();
            let catalog = CatalogService::new(store.clone(), cache.clone());
            let cart = CartService::new(store.clone(), cache.clone(), catalog.clone());
            let base_url = "http://localhost:3000".parse().unwrap();
            let checkout =
                CheckoutOrchestrator::new(store.clone(), cart.clone(), &base_url, "USD").unwrap();
            let finalizer = OrderFinalizer::new(store.clone(), cache.clone());
            let orders = OrdersService::new(store.clone(), cache.clone());
            let satellite = SatelliteService::new(store, cache.clone());
            Self {
                mock,
                catalog,
                cart,
                checkout,
                finalizer,
                orders,
                satellite,
            }
        }
    }

    pub(crate) fn caller(name: &str) -> CustomerId {
        CustomerId::from(name)
    }

    pub(crate) fn product(id: &str, price: u64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: "A fine garment".to_string(),
            designer: "Atelier P".to_string(),
            color: "noir".to_string(),
            seasonal: false,
            stock: 10,
            price,
            images: vec![],
        }
    }

    pub(crate) fn item(product_id: &str, quantity: u32) -> CartItem {
        CartItem {
            product_id: product_id.to_string(),
            quantity,
        }
    }
}
