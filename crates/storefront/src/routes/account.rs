//! Account route handlers: wishlist, rewards, flags and store settings.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use velvet_penguin_core::{RewardPoints, StoreSettings, Wishlist};

use crate::error::Result;
use crate::middleware::Caller;
use crate::state::AppState;

/// The caller's saved products.
#[instrument(skip(state, caller))]
pub async fn wishlist(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<Wishlist>> {
    Ok(Json(state.satellite().wishlist(&caller).await?))
}

/// Wishlist mutation body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistBody {
    pub product_id: String,
}

/// Save a product.
#[instrument(skip(state, caller, body))]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(body): Json<WishlistBody>,
) -> Result<()> {
    state
        .satellite()
        .add_to_wishlist(&caller, &body.product_id)
        .await
}

/// Unsave a product.
#[instrument(skip(state, caller, body))]
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(body): Json<WishlistBody>,
) -> Result<()> {
    state
        .satellite()
        .remove_from_wishlist(&caller, &body.product_id)
        .await
}

/// The caller's reward point balance.
#[instrument(skip(state, caller))]
pub async fn rewards(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<RewardPoints>> {
    Ok(Json(state.satellite().reward_points(&caller).await?))
}

/// Whether the caller holds the admin role.
#[instrument(skip(state, caller))]
pub async fn admin(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<bool>> {
    Ok(Json(state.satellite().is_caller_admin(&caller).await?))
}

/// Store-wide settings, shared across callers.
#[instrument(skip(state))]
pub async fn settings(State(state): State<AppState>) -> Result<Json<Option<StoreSettings>>> {
    Ok(Json(state.satellite().store_settings().await?))
}
