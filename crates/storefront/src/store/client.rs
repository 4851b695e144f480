//! JSON RPC client for the store backend.
//!
//! Every backend operation is a `POST /api/rpc/{method}` with a JSON
//! argument object. The caller identity travels in a header; the backend
//! enforces scoping and owns all durable state.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument};

use velvet_penguin_core::{
    CheckoutSession, CustomerId, Order, OrderStatus, Product, Review, RewardPoints, ShoppingCart,
    ShoppingItem, StoreSettings, StripeSessionStatus, Wishlist,
};

use crate::config::BackendConfig;

use super::{StoreApi, StoreError};

/// Header carrying the caller principal on scoped calls.
const CALLER_HEADER: &str = "X-Caller-Principal";

/// Client for the store backend's RPC surface.
#[derive(Clone)]
pub struct RemoteClient {
    client: reqwest::Client,
    endpoint: url::Url,
    access_token: String,
}

impl RemoteClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            access_token: config.access_token.expose_secret().to_string(),
        }
    }

    /// Execute one RPC call.
    async fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        caller: Option<&CustomerId>,
        params: serde_json::Value,
    ) -> Result<R, StoreError> {
        let url = format!("{}api/rpc/{method}", self.endpoint);

        let mut request = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&params);
        if let Some(caller) = caller {
            request = request.header(CALLER_HEADER, caller.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        // Body as text first for better error diagnostics
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(format!("{method}: {body}")));
        }
        if !status.is_success() {
            tracing::error!(
                method,
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "backend returned non-success status"
            );
            return Err(StoreError::Rpc {
                method: method.to_string(),
                message: format!("HTTP {status}: {}", body.chars().take(200).collect::<String>()),
            });
        }

        match serde_json::from_str(&body) {
            Ok(value) => {
                debug!(method, "rpc ok");
                Ok(value)
            }
            Err(e) => {
                tracing::error!(
                    method,
                    error = %e,
                    body = %body.chars().take(200).collect::<String>(),
                    "failed to parse backend response"
                );
                Err(StoreError::Parse(e))
            }
        }
    }
}

#[async_trait]
impl StoreApi for RemoteClient {
    #[instrument(skip(self), fields(caller = %caller))]
    async fn get_cart(&self, caller: &CustomerId) -> Result<ShoppingCart, StoreError> {
        self.call("getCart", Some(caller), json!({})).await
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn add_to_cart(
        &self,
        caller: &CustomerId,
        product_id: &str,
        quantity: u32,
    ) -> Result<(), StoreError> {
        self.call(
            "addToCart",
            Some(caller),
            json!({ "productId": product_id, "quantity": quantity }),
        )
        .await
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn remove_from_cart(
        &self,
        caller: &CustomerId,
        product_id: &str,
    ) -> Result<(), StoreError> {
        self.call(
            "removeFromCart",
            Some(caller),
            json!({ "productId": product_id }),
        )
        .await
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn clear_cart(&self, caller: &CustomerId) -> Result<(), StoreError> {
        self.call("clearCart", Some(caller), json!({})).await
    }

    #[instrument(skip(self))]
    async fn get_products(&self) -> Result<Vec<Product>, StoreError> {
        self.call("getProducts", None, json!({})).await
    }

    #[instrument(skip(self))]
    async fn get_product_reviews(&self, product_id: &str) -> Result<Vec<Review>, StoreError> {
        self.call(
            "getProductReviews",
            None,
            json!({ "productId": product_id }),
        )
        .await
    }

    #[instrument(skip(self, review), fields(caller = %caller))]
    async fn add_review(&self, caller: &CustomerId, review: Review) -> Result<(), StoreError> {
        self.call("addReview", Some(caller), json!({ "review": review }))
            .await
    }

    #[instrument(skip(self, items), fields(caller = %caller, items = items.len()))]
    async fn create_checkout_session(
        &self,
        caller: &CustomerId,
        items: &[ShoppingItem],
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, StoreError> {
        // The backend relays the provider's session as a raw JSON string;
        // extracting id + url (and rejecting a missing url) happens here.
        let raw: String = self
            .call(
                "createCheckoutSession",
                Some(caller),
                json!({
                    "items": items,
                    "successUrl": success_url,
                    "cancelUrl": cancel_url,
                }),
            )
            .await?;
        Ok(CheckoutSession::from_json(&raw)?)
    }

    #[instrument(skip(self))]
    async fn get_stripe_session_status(
        &self,
        session_id: &str,
    ) -> Result<StripeSessionStatus, StoreError> {
        self.call(
            "getStripeSessionStatus",
            None,
            json!({ "sessionId": session_id }),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn is_stripe_configured(&self) -> Result<bool, StoreError> {
        self.call("isStripeConfigured", None, json!({})).await
    }

    #[instrument(skip(self, order), fields(caller = %caller, order_id = %order.id))]
    async fn create_order(&self, caller: &CustomerId, order: Order) -> Result<(), StoreError> {
        self.call("createOrder", Some(caller), json!({ "order": order }))
            .await
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn get_orders(&self, caller: &CustomerId) -> Result<Vec<Order>, StoreError> {
        self.call("getOrders", Some(caller), json!({})).await
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn update_order_status(
        &self,
        caller: &CustomerId,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), StoreError> {
        self.call(
            "updateOrderStatus",
            Some(caller),
            json!({ "orderId": order_id, "status": status }),
        )
        .await
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn get_reward_points(&self, caller: &CustomerId) -> Result<RewardPoints, StoreError> {
        self.call("getRewardPoints", Some(caller), json!({})).await
    }

    #[instrument(skip(self, points), fields(caller = %caller))]
    async fn update_reward_points(
        &self,
        caller: &CustomerId,
        points: RewardPoints,
    ) -> Result<(), StoreError> {
        self.call("updateRewardPoints", Some(caller), json!({ "points": points }))
            .await
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn get_wishlist(&self, caller: &CustomerId) -> Result<Wishlist, StoreError> {
        self.call("getWishlist", Some(caller), json!({})).await
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn add_to_wishlist(
        &self,
        caller: &CustomerId,
        product_id: &str,
    ) -> Result<(), StoreError> {
        self.call(
            "addToWishlist",
            Some(caller),
            json!({ "productId": product_id }),
        )
        .await
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn remove_from_wishlist(
        &self,
        caller: &CustomerId,
        product_id: &str,
    ) -> Result<(), StoreError> {
        self.call(
            "removeFromWishlist",
            Some(caller),
            json!({ "productId": product_id }),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_store_settings(&self) -> Result<Option<StoreSettings>, StoreError> {
        self.call("getStoreSettings", None, json!({})).await
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn is_caller_admin(&self, caller: &CustomerId) -> Result<bool, StoreError> {
        self.call("isCallerAdmin", Some(caller), json!({})).await
    }
}
