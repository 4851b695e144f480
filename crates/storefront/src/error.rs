//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures remote failures to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`.
//!
//! The checkout taxonomy is deliberate: precondition and validation errors
//! mean the caller must fix local state and are never retried; remote
//! failures are surfaced as retryable (the user re-invokes the action).
//! None of them can leave cart or order state partially mutated - they are
//! raised before, or instead of, the mutation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller state does not permit the action (empty cart, not
    /// authenticated, checkout already in flight). Fix local state; do not
    /// retry as-is.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The cart had items but none resolved to a purchasable product.
    /// Distinct from an empty cart.
    #[error("Nothing resolvable to check out")]
    EmptyCheckout,

    /// Payment session creation failed or returned an unusable session.
    /// Retryable by re-invoking checkout.
    #[error("Checkout session creation failed: {0}")]
    SessionCreation(String),

    /// Invalid input (e.g., a zero quantity).
    #[error("Validation error: {0}")]
    Validation(String),

    /// No backend client is configured; mutations cannot proceed.
    #[error("Store backend unavailable")]
    RemoteUnavailable,

    /// A backend call failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture remote failures to Sentry; caller errors are not events
        if matches!(self, Self::Store(_) | Self::SessionCreation(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Precondition(_) => StatusCode::CONFLICT,
            Self::EmptyCheckout => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::SessionCreation(_) | Self::Store(_) => StatusCode::BAD_GATEWAY,
            Self::RemoteUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Don't expose backend error details to clients
        let message = match &self {
            Self::Store(_) => "External service error".to_string(),
            Self::SessionCreation(_) => "Failed to create checkout session".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
