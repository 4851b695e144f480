//! Cache layer for backend responses.
//!
//! A single keyed store with an invalidation discipline: only service
//! operations and their completion paths touch it, mutations invalidate
//! exactly the keys whose backing data they can affect, and entries are
//! written only after a fetch succeeds (a failed fetch leaves the previous
//! entry untouched, never a partial one).
//!
//! Caller-scoped keys embed the [`CustomerId`], so a read structurally
//! cannot observe another caller's data; switching identity drops the
//! outgoing caller's scoped entries via [`CacheStore::invalidate_caller`].

use std::time::Duration;

use moka::future::Cache;

use velvet_penguin_core::{
    CustomerId, Order, Product, Review, RewardPoints, ShoppingCart, StoreSettings, Wishlist,
};

/// Time-to-live for cached entries (5 minutes).
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Cache key. Caller-scoped variants carry the identity they belong to.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Cart(CustomerId),
    Orders(CustomerId),
    Wishlist(CustomerId),
    RewardPoints(CustomerId),
    AdminFlag(CustomerId),
    Catalog,
    Reviews(String),
    StoreSettings,
    StripeConfigured,
}

impl CacheKey {
    /// All caller-scoped keys for one identity.
    fn caller_scoped(caller: &CustomerId) -> [Self; 5] {
        [
            Self::Cart(caller.clone()),
            Self::Orders(caller.clone()),
            Self::Wishlist(caller.clone()),
            Self::RewardPoints(caller.clone()),
            Self::AdminFlag(caller.clone()),
        ]
    }
}

/// Cached value types, one per key family.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Cart(ShoppingCart),
    Orders(Vec<Order>),
    Wishlist(Wishlist),
    RewardPoints(Box<RewardPoints>),
    AdminFlag(bool),
    Catalog(Vec<Product>),
    Reviews(Vec<Review>),
    StoreSettings(Option<Box<StoreSettings>>),
    StripeConfigured(bool),
}

/// The shared cache store. Cheaply cloneable.
#[derive(Clone)]
pub struct CacheStore {
    cache: Cache<CacheKey, CacheValue>,
}

impl CacheStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(1000)
                .time_to_live(CACHE_TTL)
                .build(),
        }
    }

    pub async fn get(&self, key: &CacheKey) -> Option<CacheValue> {
        self.cache.get(key).await
    }

    pub async fn insert(&self, key: CacheKey, value: CacheValue) {
        self.cache.insert(key, value).await;
    }

    /// Mark a key stale; the next read re-fetches.
    pub async fn invalidate(&self, key: &CacheKey) {
        self.cache.invalidate(key).await;
    }

    /// Drop every caller-scoped entry for `caller`. Used on identity switch.
    pub async fn invalidate_caller(&self, caller: &CustomerId) {
        for key in CacheKey::caller_scoped(caller) {
            self.cache.invalidate(&key).await;
        }
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cart_value(items: usize) -> CacheValue {
        CacheValue::Cart(ShoppingCart {
            items: (0..items)
                .map(|i| velvet_penguin_core::CartItem {
                    product_id: format!("p{i}"),
                    quantity: 1,
                })
                .collect(),
        })
    }

    #[tokio::test]
    async fn invalidate_marks_single_key_stale() {
        let cache = CacheStore::new();
        let alice = CustomerId::from("alice");
        let key = CacheKey::Cart(alice.clone());

        cache.insert(key.clone(), cart_value(1)).await;
        assert!(cache.get(&key).await.is_some());

        cache.invalidate(&key).await;
        assert!(cache.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn caller_keys_are_isolated_per_identity() {
        let cache = CacheStore::new();
        let alice = CustomerId::from("alice");
        let bob = CustomerId::from("bob");

        cache.insert(CacheKey::Cart(alice.clone()), cart_value(2)).await;

        // Bob's key is a different key entirely.
        assert!(cache.get(&CacheKey::Cart(bob)).await.is_none());
        assert!(cache.get(&CacheKey::Cart(alice)).await.is_some());
    }

    #[tokio::test]
    async fn identity_switch_drops_scoped_keys_but_not_global_ones() {
        let cache = CacheStore::new();
        let alice = CustomerId::from("alice");

        cache.insert(CacheKey::Cart(alice.clone()), cart_value(1)).await;
        cache
            .insert(CacheKey::Wishlist(alice.clone()), CacheValue::Wishlist(Wishlist::default()))
            .await;
        cache.insert(CacheKey::Catalog, CacheValue::Catalog(vec![])).await;

        cache.invalidate_caller(&alice).await;

        assert!(cache.get(&CacheKey::Cart(alice.clone())).await.is_none());
        assert!(cache.get(&CacheKey::Wishlist(alice)).await.is_none());
        assert!(cache.get(&CacheKey::Catalog).await.is_some());
    }
}
