//! Product and review route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use velvet_penguin_core::{Product, Review};

use crate::error::Result;
use crate::middleware::Caller;
use crate::state::AppState;

/// List the product catalog.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.catalog().products().await?))
}

/// List reviews for one product.
#[instrument(skip(state))]
pub async fn reviews(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<Vec<Review>>> {
    Ok(Json(state.catalog().reviews(&product_id).await?))
}

/// Review submission body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddReviewBody {
    pub rating: u8,
    pub comment: String,
}

/// Submit a review for a product.
#[instrument(skip(state, caller, body))]
pub async fn add_review(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(product_id): Path<String>,
    Json(body): Json<AddReviewBody>,
) -> Result<()> {
    state
        .catalog()
        .add_review(&caller, &product_id, body.rating, body.comment)
        .await
}
