//! Checkout and payment callback route handlers.
//!
//! `begin` hands the browser a provider-held redirect URL; the process
//! re-enters through the success or failure callback with nothing carried
//! over but the session id the provider holds.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use velvet_penguin_core::{CheckoutSession, StripeSessionStatus};

use crate::error::Result;
use crate::middleware::{Caller, MaybeCaller};
use crate::state::AppState;

/// Start a checkout attempt. Returns the provider session to redirect to.
#[instrument(skip(state, caller))]
pub async fn begin(
    State(state): State<AppState>,
    MaybeCaller(caller): MaybeCaller,
) -> Result<Json<CheckoutSession>> {
    let session = state.checkout().begin(caller.as_ref()).await?;
    Ok(Json(session))
}

/// Whether the backend has a payment provider configured.
#[instrument(skip(state))]
pub async fn available(State(state): State<AppState>) -> Result<Json<bool>> {
    Ok(Json(state.satellite().stripe_configured().await?))
}

/// Poll the verified outcome of a payment session.
#[instrument(skip(state))]
pub async fn session_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<StripeSessionStatus>> {
    Ok(Json(state.finalizer().session_status(&session_id).await?))
}

/// Callback acknowledgement body.
#[derive(Debug, Serialize)]
pub struct CallbackAck {
    pub cleared: bool,
}

/// Payment success callback: clears the cart unconditionally.
#[instrument(skip(state, caller))]
pub async fn payment_success(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<CallbackAck>> {
    state.finalizer().payment_succeeded(&caller).await?;
    Ok(Json(CallbackAck { cleared: true }))
}

/// Payment failure callback: cart and orders stay untouched.
#[instrument(skip(state, caller))]
pub async fn payment_failure(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Json<CallbackAck> {
    state.finalizer().payment_failed(&caller);
    Json(CallbackAck { cleared: false })
}
