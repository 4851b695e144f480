//! Remote store client.
//!
//! # Architecture
//!
//! - The backend is the source of truth - NO local persistence, every call
//!   is a request/response round trip
//! - [`StoreApi`] is the seam: services depend on `Arc<dyn StoreApi>` so the
//!   checkout pipeline is testable against an in-memory mock
//! - [`RemoteClient`] implements the trait over the backend's JSON RPC
//!   surface using `reqwest`
//!
//! Caller-scoped operations take the [`CustomerId`] explicitly; the client
//! forwards it to the backend, which enforces scoping.

mod client;
#[cfg(test)]
pub(crate) mod mock;

pub use client::RemoteClient;

use async_trait::async_trait;
use thiserror::Error;

use velvet_penguin_core::{
    CheckoutSession, CustomerId, Order, OrderStatus, Product, Review, RewardPoints,
    SessionParseError, ShoppingCart, ShoppingItem, StoreSettings, StripeSessionStatus, Wishlist,
};

/// Errors that can occur when calling the store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The backend rejected or failed the call.
    #[error("RPC error in {method}: {message}")]
    Rpc { method: String, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The checkout-session payload was unusable (malformed or missing a
    /// redirect URL). A hard failure - never retried silently.
    #[error("Unusable checkout session: {0}")]
    MalformedSession(#[from] SessionParseError),
}

/// The backend surface the storefront consumes.
///
/// All operations are asynchronous request/response round trips; none of
/// them touch local state. Mutations are user-retriable: re-invoking the
/// same call is safe (cart quantity accumulation intentionally compounds).
#[async_trait]
pub trait StoreApi: Send + Sync {
    // Cart
    async fn get_cart(&self, caller: &CustomerId) -> Result<ShoppingCart, StoreError>;
    /// Adding a product already in the cart accumulates quantity backend-side
    /// rather than duplicating the entry.
    async fn add_to_cart(
        &self,
        caller: &CustomerId,
        product_id: &str,
        quantity: u32,
    ) -> Result<(), StoreError>;
    async fn remove_from_cart(&self, caller: &CustomerId, product_id: &str)
    -> Result<(), StoreError>;
    async fn clear_cart(&self, caller: &CustomerId) -> Result<(), StoreError>;

    // Catalog
    async fn get_products(&self) -> Result<Vec<Product>, StoreError>;
    async fn get_product_reviews(&self, product_id: &str) -> Result<Vec<Review>, StoreError>;
    async fn add_review(&self, caller: &CustomerId, review: Review) -> Result<(), StoreError>;

    // Payment sessions
    async fn create_checkout_session(
        &self,
        caller: &CustomerId,
        items: &[ShoppingItem],
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, StoreError>;
    /// Idempotent and side-effect-free; returns the same value on every poll
    /// once the session reaches a terminal state.
    async fn get_stripe_session_status(
        &self,
        session_id: &str,
    ) -> Result<StripeSessionStatus, StoreError>;
    async fn is_stripe_configured(&self) -> Result<bool, StoreError>;

    // Orders
    async fn create_order(&self, caller: &CustomerId, order: Order) -> Result<(), StoreError>;
    async fn get_orders(&self, caller: &CustomerId) -> Result<Vec<Order>, StoreError>;
    async fn update_order_status(
        &self,
        caller: &CustomerId,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), StoreError>;

    // Rewards & wishlist
    async fn get_reward_points(&self, caller: &CustomerId) -> Result<RewardPoints, StoreError>;
    async fn update_reward_points(
        &self,
        caller: &CustomerId,
        points: RewardPoints,
    ) -> Result<(), StoreError>;
    async fn get_wishlist(&self, caller: &CustomerId) -> Result<Wishlist, StoreError>;
    async fn add_to_wishlist(&self, caller: &CustomerId, product_id: &str)
    -> Result<(), StoreError>;
    async fn remove_from_wishlist(
        &self,
        caller: &CustomerId,
        product_id: &str,
    ) -> Result<(), StoreError>;

    // Settings & flags
    async fn get_store_settings(&self) -> Result<Option<StoreSettings>, StoreError>;
    async fn is_caller_admin(&self, caller: &CustomerId) -> Result<bool, StoreError>;
}
