//! Order history and status progression.

use std::sync::Arc;

use velvet_penguin_core::{CustomerId, Order, OrderStatus};

use crate::cache::{CacheKey, CacheStore, CacheValue};
use crate::error::{AppError, Result};
use crate::store::StoreApi;

/// Caller-scoped order reads plus the gated status update.
#[derive(Clone)]
pub struct OrdersService {
    store: Option<Arc<dyn StoreApi>>,
    cache: CacheStore,
}

impl OrdersService {
    #[must_use]
    pub fn new(store: Option<Arc<dyn StoreApi>>, cache: CacheStore) -> Self {
        Self { store, cache }
    }

    /// The caller's order history.
    pub async fn list(&self, caller: &CustomerId) -> Result<Vec<Order>> {
        let key = CacheKey::Orders(caller.clone());
        if let Some(CacheValue::Orders(orders)) = self.cache.get(&key).await {
            return Ok(orders);
        }
        let Some(store) = &self.store else {
            return Ok(Vec::new());
        };
        let orders = store.get_orders(caller).await?;
        self.cache
            .insert(key, CacheValue::Orders(orders.clone()))
            .await;
        Ok(orders)
    }

    /// Advance an order along the lifecycle.
    ///
    /// The transition is checked against the order's last known status
    /// before anything is sent to the backend; an illegal hop (skipping a
    /// stage, or leaving a terminal state) never leaves the process.
    pub async fn update_status(
        &self,
        caller: &CustomerId,
        order_id: &str,
        next: OrderStatus,
    ) -> Result<()> {
        let orders = self.list(caller).await?;
        let order = orders
            .iter()
            .find(|o| o.id == order_id)
            .ok_or_else(|| AppError::NotFound(order_id.to_string()))?;
        if !order.status.can_transition_to(next) {
            return Err(AppError::Validation(format!(
                "order cannot move from {} to {next}",
                order.status
            )));
        }
        let store = self.store.as_ref().ok_or(AppError::RemoteUnavailable)?;
        store.update_order_status(caller, order_id, next).await?;
        self.cache
            .invalidate(&CacheKey::Orders(caller.clone()))
            .await;
        Ok(())
    }
}
