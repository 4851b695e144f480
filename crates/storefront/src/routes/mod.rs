//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Health check
//!
//! # Products
//! GET  /products                   - Product listing
//! GET  /products/{id}/reviews      - Reviews for a product
//! POST /products/{id}/reviews      - Submit a review (requires auth)
//!
//! # Cart (requires auth for mutations)
//! GET  /cart                       - Priced cart view
//! POST /cart/add                   - Add a product
//! POST /cart/remove                - Remove a product
//! POST /cart/clear                 - Empty the cart
//!
//! # Checkout
//! POST /checkout                   - Start a checkout attempt
//! GET  /checkout/available         - Whether payments are configured
//! GET  /checkout/session/{id}      - Poll a payment session's outcome
//! GET  /payment/success            - Payment success callback
//! GET  /payment/failure            - Payment failure callback
//!
//! # Orders (requires auth)
//! GET  /orders                     - Order history
//! POST /orders                     - Record an order
//! POST /orders/{id}/status         - Advance an order's status
//!
//! # Account (requires auth)
//! GET  /account/wishlist           - Saved products
//! POST /account/wishlist/add       - Save a product
//! POST /account/wishlist/remove    - Unsave a product
//! GET  /account/rewards            - Reward point balance
//! GET  /account/admin              - Whether the caller is an admin
//!
//! # Store
//! GET  /settings                   - Store-wide settings
//!
//! # Auth
//! POST /auth/session               - Attach a caller identity
//! POST /auth/logout                - Detach the caller identity
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route(
            "/{id}/reviews",
            get(products::reviews).post(products::add_review),
        )
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::begin))
        .route("/available", get(checkout::available))
        .route("/session/{id}", get(checkout::session_status))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::place))
        .route("/{id}/status", post(orders::update_status))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/wishlist", get(account::wishlist))
        .route("/wishlist/add", post(account::add_to_wishlist))
        .route("/wishlist/remove", post(account::remove_from_wishlist))
        .route("/rewards", get(account::rewards))
        .route("/admin", get(account::admin))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/session", post(auth::attach))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .route("/payment/success", get(checkout::payment_success))
        .route("/payment/failure", get(checkout::payment_failure))
        .nest("/orders", order_routes())
        .nest("/account", account_routes())
        .route("/settings", get(account::settings))
        .nest("/auth", auth_routes())
}
