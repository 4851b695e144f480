//! Caller identity extractors.
//!
//! The storefront never issues or verifies credentials itself; identity is
//! acquired elsewhere and attached to the session. These extractors only
//! read it back out.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use velvet_penguin_core::CustomerId;

use crate::error::AppError;

/// Session key for the authenticated caller identity.
const CALLER_SESSION_KEY: &str = "caller_id";

/// Extractor that requires an authenticated caller.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(Caller(caller): Caller) -> impl IntoResponse {
///     format!("hello {caller}")
/// }
/// ```
pub struct Caller(pub CustomerId);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let MaybeCaller(caller) = MaybeCaller::from_request_parts(parts, state)
            .await
            .map_err(|never| match never {})?;
        caller.map(Self).ok_or_else(|| {
            AppError::Precondition("not authenticated".to_string()).into_response()
        })
    }
}

/// Extractor that optionally gets the caller identity.
///
/// Unlike [`Caller`], this does not reject anonymous requests; handlers
/// that degrade gracefully for guests (cart reads, checkout preflight)
/// use this and pass the `Option` down to the service layer.
pub struct MaybeCaller(pub Option<CustomerId>);

impl<S> FromRequestParts<S> for MaybeCaller
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Session is set by SessionManagerLayer; absent in tests without it
        let caller = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CustomerId>(CALLER_SESSION_KEY)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(caller))
    }
}

/// Helper to attach a caller identity to the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_caller(
    session: &Session,
    caller: &CustomerId,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(CALLER_SESSION_KEY, caller).await
}

/// Helper to clear the caller identity from the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_caller(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CustomerId>(CALLER_SESSION_KEY).await?;
    Ok(())
}
