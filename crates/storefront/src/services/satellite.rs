//! Wishlist, reward points, settings and capability flags.
//!
//! Everything here orbits the checkout pipeline without participating in
//! it: none of these operations touch cart or order state, and reward
//! accrual is entirely backend-side (an order placed here shows up in the
//! balance on the next read, not through any client-side arithmetic).

use std::sync::Arc;

use velvet_penguin_core::{CustomerId, RewardPoints, StoreSettings, Wishlist};

use crate::cache::{CacheKey, CacheStore, CacheValue};
use crate::error::{AppError, Result};
use crate::store::StoreApi;

#[derive(Clone)]
pub struct SatelliteService {
    store: Option<Arc<dyn StoreApi>>,
    cache: CacheStore,
}

impl SatelliteService {
    #[must_use]
    pub fn new(store: Option<Arc<dyn StoreApi>>, cache: CacheStore) -> Self {
        Self { store, cache }
    }

    fn store(&self) -> Result<&Arc<dyn StoreApi>> {
        self.store.as_ref().ok_or(AppError::RemoteUnavailable)
    }

    /// The caller's saved product ids.
    pub async fn wishlist(&self, caller: &CustomerId) -> Result<Wishlist> {
        let key = CacheKey::Wishlist(caller.clone());
        if let Some(CacheValue::Wishlist(wishlist)) = self.cache.get(&key).await {
            return Ok(wishlist);
        }
        let Some(store) = &self.store else {
            return Ok(Wishlist::default());
        };
        let wishlist = store.get_wishlist(caller).await?;
        self.cache
            .insert(key, CacheValue::Wishlist(wishlist.clone()))
            .await;
        Ok(wishlist)
    }

    /// Save a product. Re-adding a saved product is a no-op success.
    pub async fn add_to_wishlist(&self, caller: &CustomerId, product_id: &str) -> Result<()> {
        self.store()?.add_to_wishlist(caller, product_id).await?;
        self.cache
            .invalidate(&CacheKey::Wishlist(caller.clone()))
            .await;
        Ok(())
    }

    /// Unsave a product. Removing an absent id is a no-op success.
    pub async fn remove_from_wishlist(&self, caller: &CustomerId, product_id: &str) -> Result<()> {
        self.store()?.remove_from_wishlist(caller, product_id).await?;
        self.cache
            .invalidate(&CacheKey::Wishlist(caller.clone()))
            .await;
        Ok(())
    }

    /// The caller's reward balance. Unlike other reads this has no sensible
    /// empty default, so a missing backend is an error rather than a zero
    /// balance the UI would present as real.
    pub async fn reward_points(&self, caller: &CustomerId) -> Result<RewardPoints> {
        let key = CacheKey::RewardPoints(caller.clone());
        if let Some(CacheValue::RewardPoints(points)) = self.cache.get(&key).await {
            return Ok(*points);
        }
        let points = self.store()?.get_reward_points(caller).await?;
        self.cache
            .insert(key, CacheValue::RewardPoints(Box::new(points.clone())))
            .await;
        Ok(points)
    }

    /// Administrative balance correction.
    pub async fn update_reward_points(
        &self,
        caller: &CustomerId,
        points: RewardPoints,
    ) -> Result<()> {
        self.store()?.update_reward_points(caller, points).await?;
        self.cache
            .invalidate(&CacheKey::RewardPoints(caller.clone()))
            .await;
        Ok(())
    }

    /// Store-wide settings, shared across callers.
    pub async fn store_settings(&self) -> Result<Option<StoreSettings>> {
        if let Some(CacheValue::StoreSettings(settings)) =
            self.cache.get(&CacheKey::StoreSettings).await
        {
            return Ok(settings.map(|boxed| *boxed));
        }
        let Some(store) = &self.store else {
            return Ok(None);
        };
        let settings = store.get_store_settings().await?;
        self.cache
            .insert(
                CacheKey::StoreSettings,
                CacheValue::StoreSettings(settings.clone().map(Box::new)),
            )
            .await;
        Ok(settings)
    }

    /// Whether the caller holds the admin role.
    pub async fn is_caller_admin(&self, caller: &CustomerId) -> Result<bool> {
        let key = CacheKey::AdminFlag(caller.clone());
        if let Some(CacheValue::AdminFlag(admin)) = self.cache.get(&key).await {
            return Ok(admin);
        }
        let Some(store) = &self.store else {
            return Ok(false);
        };
        let admin = store.is_caller_admin(caller).await?;
        self.cache.insert(key, CacheValue::AdminFlag(admin)).await;
        Ok(admin)
    }

    /// Whether the backend has a payment provider configured. Gates the
    /// checkout button; a false here is why `begin` would fail later.
    pub async fn stripe_configured(&self) -> Result<bool> {
        if let Some(CacheValue::StripeConfigured(configured)) =
            self.cache.get(&CacheKey::StripeConfigured).await
        {
            return Ok(configured);
        }
        let Some(store) = &self.store else {
            return Ok(false);
        };
        let configured = store.is_stripe_configured().await?;
        self.cache
            .insert(
                CacheKey::StripeConfigured,
                CacheValue::StripeConfigured(configured),
            )
            .await;
        Ok(configured)
    }
}
