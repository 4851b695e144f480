//! Cart aggregate.
//!
//! The cart is a projection of backend state: reads go through the cache,
//! mutations go to the backend and invalidate only the `cart` key, and the
//! total is re-derived from the Cart x Product join on every read - it is
//! never cached on its own, so it cannot drift from the items.

use std::sync::Arc;

use velvet_penguin_core::{CustomerId, PricedCart, ShoppingCart};

use crate::cache::{CacheKey, CacheStore, CacheValue};
use crate::error::{AppError, Result};
use crate::services::catalog::CatalogService;
use crate::store::StoreApi;

/// Cart operations for the authenticated caller.
#[derive(Clone)]
pub struct CartService {
    store: Option<Arc<dyn StoreApi>>,
    cache: CacheStore,
    catalog: CatalogService,
}

impl CartService {
    #[must_use]
    pub fn new(
        store: Option<Arc<dyn StoreApi>>,
        cache: CacheStore,
        catalog: CatalogService,
    ) -> Self {
        Self {
            store,
            cache,
            catalog,
        }
    }

    fn store(&self) -> Result<&Arc<dyn StoreApi>> {
        self.store.as_ref().ok_or(AppError::RemoteUnavailable)
    }

    /// The caller's cart as last known to the backend.
    pub async fn current(&self, caller: &CustomerId) -> Result<ShoppingCart> {
        let key = CacheKey::Cart(caller.clone());
        if let Some(CacheValue::Cart(cart)) = self.cache.get(&key).await {
            return Ok(cart);
        }
        let Some(store) = &self.store else {
            return Ok(ShoppingCart::default());
        };
        let cart = store.get_cart(caller).await?;
        self.cache.insert(key, CacheValue::Cart(cart.clone())).await;
        Ok(cart)
    }

    /// The cart joined against the current catalog snapshot.
    ///
    /// Lines whose product no longer resolves stay visible with no price;
    /// the total covers resolved lines only.
    pub async fn priced(&self, caller: &CustomerId) -> Result<PricedCart> {
        let cart = self.current(caller).await?;
        let catalog = self.catalog.products().await?;
        Ok(cart.priced(&catalog))
    }

    /// Add `quantity` of a product. A product already in the cart
    /// accumulates quantity backend-side; the client must not assume
    /// idempotent re-creation.
    pub async fn add_item(
        &self,
        caller: &CustomerId,
        product_id: &str,
        quantity: u32,
    ) -> Result<()> {
        if quantity == 0 {
            return Err(AppError::Validation(
                "quantity must be a positive integer".to_string(),
            ));
        }
        self.store()?.add_to_cart(caller, product_id, quantity).await?;
        // Invalidation lands before the caller sees completion, so a
        // follow-up read observes at least the post-mutation state.
        self.cache.invalidate(&CacheKey::Cart(caller.clone())).await;
        Ok(())
    }

    /// Remove a product from the cart entirely.
    pub async fn remove_item(&self, caller: &CustomerId, product_id: &str) -> Result<()> {
        self.store()?.remove_from_cart(caller, product_id).await?;
        self.cache.invalidate(&CacheKey::Cart(caller.clone())).await;
        Ok(())
    }

    /// Empty the cart. The cart itself is never deleted, only emptied.
    pub async fn clear(&self, caller: &CustomerId) -> Result<()> {
        self.store()?.clear_cart(caller).await?;
        self.cache.invalidate(&CacheKey::Cart(caller.clone())).await;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::error::AppError;
    use crate::services::testkit::{caller, item, product, Harness};
    use crate::store::mock::MockStore;

    #[tokio::test]
    async fn adding_the_same_product_twice_accumulates_quantity() {
        let h = Harness::new(MockStore::new().with_products(vec![product("p1", 500)]));
        let alice = caller("alice");

        h.cart.add_item(&alice, "p1", 1).await.unwrap();
        h.cart.add_item(&alice, "p1", 1).await.unwrap();

        let cart = h.cart.current(&alice).await.unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.quantity_of("p1"), 2);
    }

    #[tokio::test]
    async fn zero_quantity_is_a_validation_error_not_a_clamp() {
        let h = Harness::new(MockStore::new());
        let err = h.cart.add_item(&caller("alice"), "p1", 0).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        // Nothing reached the backend.
        assert!(h.mock.cart_of(&caller("alice")).is_empty());
    }

    #[tokio::test]
    async fn total_is_derived_from_the_current_join() {
        let h = Harness::new(
            MockStore::new().with_products(vec![product("p1", 500), product("p2", 250)]),
        );
        let alice = caller("alice");
        h.mock.seed_cart(&alice, vec![item("p1", 2), item("p2", 1)]);

        let priced = h.cart.priced(&alice).await.unwrap();
        assert_eq!(priced.total_cents(), 1250);

        h.cart.remove_item(&alice, "p2").await.unwrap();
        let priced = h.cart.priced(&alice).await.unwrap();
        assert_eq!(priced.total_cents(), 1000);
    }

    #[tokio::test]
    async fn carted_item_whose_product_vanished_stays_visible_unpriced() {
        let h = Harness::new(MockStore::new().with_products(vec![product("p1", 500)]));
        let alice = caller("alice");
        h.mock.seed_cart(&alice, vec![item("p1", 1), item("deleted", 3)]);

        let priced = h.cart.priced(&alice).await.unwrap();
        assert_eq!(priced.lines.len(), 2);
        assert_eq!(priced.total_cents(), 500);
    }

    #[tokio::test]
    async fn mutations_invalidate_the_cached_cart() {
        let h = Harness::new(MockStore::new().with_products(vec![product("p1", 500)]));
        let alice = caller("alice");

        // Prime the cache with the empty cart.
        assert!(h.cart.current(&alice).await.unwrap().is_empty());

        h.cart.add_item(&alice, "p1", 1).await.unwrap();
        // The next read re-fetches and sees the mutation.
        assert_eq!(h.cart.current(&alice).await.unwrap().quantity_of("p1"), 1);
    }

    #[tokio::test]
    async fn degraded_mode_reads_empty_and_rejects_mutations() {
        let h = Harness::detached();
        let alice = caller("alice");

        assert!(h.cart.current(&alice).await.unwrap().is_empty());
        let err = h.cart.add_item(&alice, "p1", 1).await.unwrap_err();
        assert!(matches!(err, AppError::RemoteUnavailable));
    }
}
