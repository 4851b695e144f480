//! Identity attach/detach route handlers.
//!
//! The storefront does not authenticate anyone itself; an upstream
//! identity provider vouches for the principal and this layer only binds
//! it to the session. Switching or dropping an identity drops every
//! caller-scoped cache entry, so nothing read under the old identity can
//! be served under the new one.

use axum::{Json, extract::State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use velvet_penguin_core::CustomerId;

use crate::error::{AppError, Result};
use crate::middleware::{MaybeCaller, clear_current_caller, set_current_caller};
use crate::state::AppState;

/// Identity attach body.
#[derive(Debug, Deserialize)]
pub struct AttachBody {
    pub principal: String,
}

/// Attach a caller identity to the session.
#[instrument(skip(state, session, previous, body))]
pub async fn attach(
    State(state): State<AppState>,
    session: Session,
    MaybeCaller(previous): MaybeCaller,
    Json(body): Json<AttachBody>,
) -> Result<()> {
    if body.principal.trim().is_empty() {
        return Err(AppError::Validation("principal must not be empty".to_string()));
    }
    let caller = CustomerId::from(body.principal);

    // Drop the outgoing identity's scoped entries on a switch
    if let Some(previous) = previous.filter(|p| *p != caller) {
        state.cache().invalidate_caller(&previous).await;
    }

    set_current_caller(&session, &caller)
        .await
        .map_err(|e| AppError::Validation(format!("session write failed: {e}")))?;
    tracing::info!(caller = %caller, "caller identity attached");
    Ok(())
}

/// Detach the caller identity from the session.
#[instrument(skip(state, session, caller))]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
    MaybeCaller(caller): MaybeCaller,
) -> Result<()> {
    if let Some(caller) = caller {
        state.cache().invalidate_caller(&caller).await;
        clear_current_caller(&session)
            .await
            .map_err(|e| AppError::Validation(format!("session write failed: {e}")))?;
        tracing::info!(caller = %caller, "caller identity detached");
    }
    Ok(())
}
