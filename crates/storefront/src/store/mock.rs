//! In-memory backend used by service tests.
//!
//! Mirrors the backend contract the client relies on: duplicate cart adds
//! accumulate quantity, wishlist operations are idempotent set operations,
//! and session status is stable once terminal. Also counts session-creation
//! calls and status polls so tests can assert which remote calls happened.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use velvet_penguin_core::{
    CartItem, CheckoutSession, CustomerId, Order, OrderStatus, Product, Review, RewardPoints,
    ShoppingCart, ShoppingItem, StoreSettings, StripeSessionStatus, Wishlist,
};

use super::{StoreApi, StoreError};

#[derive(Default)]
struct MockState {
    products: Vec<Product>,
    carts: HashMap<CustomerId, ShoppingCart>,
    wishlists: HashMap<CustomerId, Wishlist>,
    orders: HashMap<CustomerId, Vec<Order>>,
    reviews: HashMap<String, Vec<Review>>,
    reward_points: HashMap<CustomerId, RewardPoints>,
    settings: Option<StoreSettings>,
    stripe_configured: bool,
    session: Option<CheckoutSession>,
    session_status: HashMap<String, StripeSessionStatus>,
    session_calls: u32,
    status_polls: u32,
}

#[derive(Default)]
pub(crate) struct MockStore {
    state: Mutex<MockState>,
}

impl MockStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_products(self, products: Vec<Product>) -> Self {
        self.state.lock().unwrap().products = products;
        self
    }

    /// Canned response for `create_checkout_session`. Without one, session
    /// creation fails like a backend without Stripe configured.
    pub(crate) fn with_session(self, session: CheckoutSession) -> Self {
        self.state.lock().unwrap().session = Some(session);
        self
    }

    pub(crate) fn with_session_status(self, id: &str, status: StripeSessionStatus) -> Self {
        self.state
            .lock()
            .unwrap()
            .session_status
            .insert(id.to_string(), status);
        self
    }

    pub(crate) fn with_stripe_configured(self, configured: bool) -> Self {
        self.state.lock().unwrap().stripe_configured = configured;
        self
    }

    pub(crate) fn with_reward_points(self, points: RewardPoints) -> Self {
        self.state
            .lock()
            .unwrap()
            .reward_points
            .insert(points.user_id.clone(), points);
        self
    }

    pub(crate) fn with_orders(self, caller: &CustomerId, orders: Vec<Order>) -> Self {
        self.state.lock().unwrap().orders.insert(caller.clone(), orders);
        self
    }

    pub(crate) fn seed_cart(&self, caller: &CustomerId, items: Vec<CartItem>) {
        self.state
            .lock()
            .unwrap()
            .carts
            .insert(caller.clone(), ShoppingCart { items });
    }

    pub(crate) fn session_calls(&self) -> u32 {
        self.state.lock().unwrap().session_calls
    }

    pub(crate) fn status_polls(&self) -> u32 {
        self.state.lock().unwrap().status_polls
    }

    pub(crate) fn cart_of(&self, caller: &CustomerId) -> ShoppingCart {
        self.state
            .lock()
            .unwrap()
            .carts
            .get(caller)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn orders_of(&self, caller: &CustomerId) -> Vec<Order> {
        self.state
            .lock()
            .unwrap()
            .orders
            .get(caller)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl StoreApi for MockStore {
    async fn get_cart(&self, caller: &CustomerId) -> Result<ShoppingCart, StoreError> {
        Ok(self.cart_of(caller))
    }

    async fn add_to_cart(
        &self,
        caller: &CustomerId,
        product_id: &str,
        quantity: u32,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let cart = state.carts.entry(caller.clone()).or_default();
        if let Some(item) = cart.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity += quantity;
        } else {
            cart.items.push(CartItem {
                product_id: product_id.to_string(),
                quantity,
            });
        }
        Ok(())
    }

    async fn remove_from_cart(
        &self,
        caller: &CustomerId,
        product_id: &str,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        if let Some(cart) = state.carts.get_mut(caller) {
            cart.items.retain(|i| i.product_id != product_id);
        }
        Ok(())
    }

    async fn clear_cart(&self, caller: &CustomerId) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.carts.insert(caller.clone(), ShoppingCart::default());
        Ok(())
    }

    async fn get_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.state.lock().unwrap().products.clone())
    }

    async fn get_product_reviews(&self, product_id: &str) -> Result<Vec<Review>, StoreError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .reviews
            .get(product_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_review(&self, _caller: &CustomerId, review: Review) -> Result<(), StoreError> {
        self.state
            .lock()
            .unwrap()
            .reviews
            .entry(review.product_id.clone())
            .or_default()
            .push(review);
        Ok(())
    }

    async fn create_checkout_session(
        &self,
        _caller: &CustomerId,
        _items: &[ShoppingItem],
        _success_url: &str,
        _cancel_url: &str,
    ) -> Result<CheckoutSession, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.session_calls += 1;
        state.session.clone().ok_or_else(|| StoreError::Rpc {
            method: "createCheckoutSession".to_string(),
            message: "stripe not configured".to_string(),
        })
    }

    async fn get_stripe_session_status(
        &self,
        session_id: &str,
    ) -> Result<StripeSessionStatus, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.status_polls += 1;
        state
            .session_status
            .get(session_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(session_id.to_string()))
    }

    async fn is_stripe_configured(&self) -> Result<bool, StoreError> {
        Ok(self.state.lock().unwrap().stripe_configured)
    }

    async fn create_order(&self, caller: &CustomerId, order: Order) -> Result<(), StoreError> {
        self.state
            .lock()
            .unwrap()
            .orders
            .entry(caller.clone())
            .or_default()
            .push(order);
        Ok(())
    }

    async fn get_orders(&self, caller: &CustomerId) -> Result<Vec<Order>, StoreError> {
        Ok(self.orders_of(caller))
    }

    async fn update_order_status(
        &self,
        caller: &CustomerId,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let order = state
            .orders
            .get_mut(caller)
            .and_then(|orders| orders.iter_mut().find(|o| o.id == order_id))
            .ok_or_else(|| StoreError::NotFound(order_id.to_string()))?;
        order.status = status;
        Ok(())
    }

    async fn get_reward_points(&self, caller: &CustomerId) -> Result<RewardPoints, StoreError> {
        self.state
            .lock()
            .unwrap()
            .reward_points
            .get(caller)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(caller.to_string()))
    }

    async fn update_reward_points(
        &self,
        caller: &CustomerId,
        points: RewardPoints,
    ) -> Result<(), StoreError> {
        self.state
            .lock()
            .unwrap()
            .reward_points
            .insert(caller.clone(), points);
        Ok(())
    }

    async fn get_wishlist(&self, caller: &CustomerId) -> Result<Wishlist, StoreError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .wishlists
            .get(caller)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_to_wishlist(
        &self,
        caller: &CustomerId,
        product_id: &str,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let wishlist = state.wishlists.entry(caller.clone()).or_default();
        // Idempotent set add
        if !wishlist.contains(product_id) {
            wishlist.product_ids.push(product_id.to_string());
        }
        Ok(())
    }

    async fn remove_from_wishlist(
        &self,
        caller: &CustomerId,
        product_id: &str,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        if let Some(wishlist) = state.wishlists.get_mut(caller) {
            // Removing an absent id is a no-op success
            wishlist.product_ids.retain(|id| id != product_id);
        }
        Ok(())
    }

    async fn get_store_settings(&self) -> Result<Option<StoreSettings>, StoreError> {
        Ok(self.state.lock().unwrap().settings.clone())
    }

    async fn is_caller_admin(&self, _caller: &CustomerId) -> Result<bool, StoreError> {
        Ok(false)
    }
}
