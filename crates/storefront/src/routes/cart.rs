//! Cart route handlers.
//!
//! The view returned by `GET /cart` is the priced join: every line carries
//! its resolved product (or an unavailable marker) and the subtotal is
//! derived on the way out, never stored.

use axum::{
    Json,
    extract::State,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use velvet_penguin_core::{Price, PricedCart};

use crate::error::Result;
use crate::middleware::{Caller, MaybeCaller};
use crate::state::AppState;

/// One cart line for display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: String,
    pub quantity: u32,
    /// Absent when the product no longer exists in the catalog.
    pub product_name: Option<String>,
    pub unit_price: Option<String>,
    pub line_total: Option<String>,
    pub available: bool,
}

/// Cart display data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    fn from_priced(priced: &PricedCart, currency: &str) -> Self {
        let items = priced
            .lines
            .iter()
            .map(|line| CartLineView {
                product_id: line.item.product_id.clone(),
                quantity: line.item.quantity,
                product_name: line.product.as_ref().map(|p| p.name.clone()),
                unit_price: line
                    .product
                    .as_ref()
                    .map(|p| Price::from_cents(p.price, currency).display()),
                line_total: line
                    .total_cents()
                    .map(|cents| Price::from_cents(cents, currency).display()),
                available: line.product.is_some(),
            })
            .collect();
        Self {
            items,
            subtotal: Price::from_cents(priced.total_cents(), currency).display(),
            item_count: priced.lines.iter().map(|l| l.item.quantity).sum(),
        }
    }
}

/// Cart mutation body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartBody {
    pub product_id: String,
    pub quantity: u32,
}

/// Remove-from-cart body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartBody {
    pub product_id: String,
}

/// Show the priced cart. Guests see an empty cart rather than an error.
#[instrument(skip(state, caller))]
pub async fn show(
    State(state): State<AppState>,
    MaybeCaller(caller): MaybeCaller,
) -> Result<Json<CartView>> {
    let currency = state.config().currency.clone();
    let Some(caller) = caller else {
        return Ok(Json(CartView {
            items: Vec::new(),
            subtotal: Price::from_cents(0, &currency).display(),
            item_count: 0,
        }));
    };
    let priced = state.cart().priced(&caller).await?;
    Ok(Json(CartView::from_priced(&priced, &currency)))
}

/// Add a product to the cart.
#[instrument(skip(state, caller, body))]
pub async fn add(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(body): Json<AddToCartBody>,
) -> Result<()> {
    state
        .cart()
        .add_item(&caller, &body.product_id, body.quantity)
        .await
}

/// Remove a product from the cart.
#[instrument(skip(state, caller, body))]
pub async fn remove(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(body): Json<RemoveFromCartBody>,
) -> Result<()> {
    state.cart().remove_item(&caller, &body.product_id).await
}

/// Empty the cart.
#[instrument(skip(state, caller))]
pub async fn clear(State(state): State<AppState>, Caller(caller): Caller) -> Result<()> {
    state.cart().clear(&caller).await
}
