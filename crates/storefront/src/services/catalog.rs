//! Catalog and review reads.

use std::sync::Arc;

use chrono::Utc;

use velvet_penguin_core::{CustomerId, Product, Review};

use crate::cache::{CacheKey, CacheStore, CacheValue};
use crate::error::{AppError, Result};
use crate::store::StoreApi;

/// Read-through access to the product catalog and per-product reviews.
#[derive(Clone)]
pub struct CatalogService {
    store: Option<Arc<dyn StoreApi>>,
    cache: CacheStore,
}

impl CatalogService {
    #[must_use]
    pub fn new(store: Option<Arc<dyn StoreApi>>, cache: CacheStore) -> Self {
        Self { store, cache }
    }

    /// The current catalog snapshot.
    pub async fn products(&self) -> Result<Vec<Product>> {
        if let Some(CacheValue::Catalog(products)) = self.cache.get(&CacheKey::Catalog).await {
            return Ok(products);
        }
        let Some(store) = &self.store else {
            return Ok(Vec::new());
        };
        let products = store.get_products().await?;
        self.cache
            .insert(CacheKey::Catalog, CacheValue::Catalog(products.clone()))
            .await;
        Ok(products)
    }

    /// Reviews for one product.
    pub async fn reviews(&self, product_id: &str) -> Result<Vec<Review>> {
        let key = CacheKey::Reviews(product_id.to_string());
        if let Some(CacheValue::Reviews(reviews)) = self.cache.get(&key).await {
            return Ok(reviews);
        }
        let Some(store) = &self.store else {
            return Ok(Vec::new());
        };
        let reviews = store.get_product_reviews(product_id).await?;
        self.cache
            .insert(key, CacheValue::Reviews(reviews.clone()))
            .await;
        Ok(reviews)
    }

    /// Submit a review; invalidates only that product's review list.
    pub async fn add_review(
        &self,
        caller: &CustomerId,
        product_id: &str,
        rating: u8,
        comment: String,
    ) -> Result<()> {
        if !(1..=5).contains(&rating) {
            return Err(AppError::Validation(format!(
                "rating must be between 1 and 5, got {rating}"
            )));
        }
        let store = self.store.as_ref().ok_or(AppError::RemoteUnavailable)?;
        let review = Review {
            user_id: caller.clone(),
            product_id: product_id.to_string(),
            rating,
            comment,
            created_at: Utc::now(),
        };
        store.add_review(caller, review).await?;
        self.cache
            .invalidate(&CacheKey::Reviews(product_id.to_string()))
            .await;
        Ok(())
    }
}
