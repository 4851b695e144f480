//! Payment outcome handling, on the far side of the redirect boundary.
//!
//! The provider redirects the browser back to the success or failure
//! callback; these entry points share nothing with the orchestrator that
//! started the attempt except the session id. The success callback clears
//! the cart unconditionally - it trusts the redirect rather than
//! re-verifying the session with the backend. Callers that need a verified
//! outcome poll [`OrderFinalizer::session_status`] instead.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use velvet_penguin_core::{CartItem, CustomerId, Order, OrderStatus, StripeSessionStatus};

use crate::cache::{CacheKey, CacheStore};
use crate::error::{AppError, Result};
use crate::store::StoreApi;

/// Finalizes a checkout attempt after the payment redirect returns.
#[derive(Clone)]
pub struct OrderFinalizer {
    store: Option<Arc<dyn StoreApi>>,
    cache: CacheStore,
}

impl OrderFinalizer {
    #[must_use]
    pub fn new(store: Option<Arc<dyn StoreApi>>, cache: CacheStore) -> Self {
        Self { store, cache }
    }

    fn store(&self) -> Result<&Arc<dyn StoreApi>> {
        self.store.as_ref().ok_or(AppError::RemoteUnavailable)
    }

    /// Success callback: empty the cart and drop its cached copy.
    ///
    /// Runs even when no order record exists yet; the cart clear and the
    /// order creation are independent steps, not a transaction.
    pub async fn payment_succeeded(&self, caller: &CustomerId) -> Result<()> {
        self.store()?.clear_cart(caller).await?;
        self.cache.invalidate(&CacheKey::Cart(caller.clone())).await;
        tracing::info!(caller = %caller, "payment succeeded, cart cleared");
        Ok(())
    }

    /// Failure callback: the cart and all order state stay exactly as they
    /// were, so the user can retry checkout from the same cart.
    pub fn payment_failed(&self, caller: &CustomerId) {
        tracing::info!(caller = %caller, "payment failed, cart retained for retry");
    }

    /// Poll the verified outcome of a payment session. Read-only and
    /// idempotent; never cached, a terminal answer must come from the
    /// backend every time.
    pub async fn session_status(&self, session_id: &str) -> Result<StripeSessionStatus> {
        let status = self
            .store()?
            .get_stripe_session_status(session_id)
            .await
            .map_err(|e| match e {
                crate::store::StoreError::NotFound(id) => AppError::NotFound(id),
                other => AppError::Store(other),
            })?;
        Ok(status)
    }

    /// Record an order for a completed purchase and refresh the caller's
    /// order history.
    pub async fn place_order(
        &self,
        caller: &CustomerId,
        items: Vec<CartItem>,
        total_amount: u64,
    ) -> Result<Order> {
        let order = Order {
            id: Uuid::new_v4().to_string(),
            status: OrderStatus::Pending,
            customer: caller.clone(),
            created_at: Utc::now(),
            total_amount,
            items,
        };
        self.store()?.create_order(caller, order.clone()).await?;
        self.cache
            .invalidate(&CacheKey::Orders(caller.clone()))
            .await;
        tracing::info!(caller = %caller, order_id = %order.id, total_amount, "order placed");
        Ok(order)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use velvet_penguin_core::{OrderStatus, StripeSessionStatus};

    use crate::error::AppError;
    use crate::services::testkit::{caller, item, Harness};
    use crate::store::mock::MockStore;

    #[tokio::test]
    async fn success_callback_clears_cart_even_without_an_order() {
        let h = Harness::new(MockStore::new());
        let alice = caller("alice");
        h.mock.seed_cart(&alice, vec![item("p1", 2)]);

        h.finalizer.payment_succeeded(&alice).await.unwrap();

        assert!(h.mock.cart_of(&alice).is_empty());
        assert!(h.mock.orders_of(&alice).is_empty());
        // A read after the callback must not see the stale cached cart.
        assert!(h.cart.current(&alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failure_callback_leaves_the_cart_untouched() {
        let h = Harness::new(MockStore::new());
        let alice = caller("alice");
        h.mock.seed_cart(&alice, vec![item("p1", 2)]);

        h.finalizer.payment_failed(&alice);

        assert_eq!(h.mock.cart_of(&alice).quantity_of("p1"), 2);
    }

    #[tokio::test]
    async fn status_polls_are_idempotent_and_uncached() {
        let h = Harness::new(MockStore::new().with_session_status(
            "sess_1",
            StripeSessionStatus::Completed {
                user_principal: Some("alice".to_string()),
                response: "ok".to_string(),
            },
        ));

        let first = h.finalizer.session_status("sess_1").await.unwrap();
        let second = h.finalizer.session_status("sess_1").await.unwrap();
        assert_eq!(first, second);
        // Both polls reached the backend; nothing was served from cache.
        assert_eq!(h.mock.status_polls(), 2);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let h = Harness::new(MockStore::new());
        let err = h.finalizer.session_status("sess_missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn placed_order_starts_pending_and_refreshes_history() {
        let h = Harness::new(MockStore::new());
        let alice = caller("alice");

        // Prime the cached (empty) order history.
        assert!(h.orders.list(&alice).await.unwrap().is_empty());

        let order = h
            .finalizer
            .place_order(&alice, vec![item("p1", 2)], 1000)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, 1000);

        let listed = h.orders.list(&alice).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed.first().unwrap().id, order.id);
    }

    #[tokio::test]
    async fn checkout_then_success_callback_empties_the_cart() {
        use velvet_penguin_core::CheckoutSession;

        use crate::services::checkout::CheckoutState;
        use crate::services::testkit::product;

        let h = Harness::new(
            MockStore::new()
                .with_products(vec![product("p1", 500)])
                .with_session(CheckoutSession {
                    id: "sess_1".to_string(),
                    url: "https://pay/sess_1".to_string(),
                }),
        );
        let alice = caller("alice");
        h.mock.seed_cart(&alice, vec![item("p1", 2)]);

        assert_eq!(h.cart.priced(&alice).await.unwrap().total_cents(), 1000);

        let session = h.checkout.begin(Some(&alice)).await.unwrap();
        assert_eq!(session.id, "sess_1");
        assert_eq!(
            h.checkout.state(&alice),
            CheckoutState::AwaitingPaymentRedirect
        );

        // The provider redirects back to the success callback.
        h.finalizer.payment_succeeded(&alice).await.unwrap();
        assert!(h.cart.current(&alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn degraded_mode_rejects_finalization() {
        let h = Harness::detached();
        let err = h
            .finalizer
            .payment_succeeded(&caller("alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RemoteUnavailable));
    }
}
