//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use velvet_penguin_core::{CartItem, Order, OrderStatus};

use crate::error::Result;
use crate::middleware::Caller;
use crate::state::AppState;

/// Order history for the caller.
#[instrument(skip(state, caller))]
pub async fn index(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<Vec<Order>>> {
    Ok(Json(state.orders().list(&caller).await?))
}

/// Order creation body: the cart snapshot and total at purchase time.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderBody {
    pub items: Vec<CartItem>,
    pub total_amount: u64,
}

/// Record an order for a completed purchase.
#[instrument(skip(state, caller, body))]
pub async fn place(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(body): Json<PlaceOrderBody>,
) -> Result<Json<Order>> {
    let order = state
        .finalizer()
        .place_order(&caller, body.items, body.total_amount)
        .await?;
    Ok(Json(order))
}

/// Status update body.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: OrderStatus,
}

/// Advance an order along the lifecycle.
#[instrument(skip(state, caller, body))]
pub async fn update_status(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(order_id): Path<String>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<()> {
    state
        .orders()
        .update_status(&caller, &order_id, body.status)
        .await
}
