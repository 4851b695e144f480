//! Payment session wire types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A payment-provider line item.
///
/// Derived fresh from the Cart x Product join for every checkout attempt and
/// handed to the backend's session-creation call; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub product_name: String,
    pub product_description: String,
    pub price_in_cents: u64,
    pub quantity: u32,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// A provider-held checkout session: opaque id plus the redirect URL the
/// browser is handed off to.
///
/// Valid for a single checkout attempt. The client keeps only the id (for
/// status polling); the session itself lives with the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// Failure to extract a usable session from the backend's response.
#[derive(Debug, Error)]
pub enum SessionParseError {
    /// The response was not the expected JSON document.
    #[error("malformed session payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// The session deserialized but carries no redirect URL. Treated as a
    /// hard failure, never retried silently.
    #[error("session response missing redirect url")]
    MissingUrl,
}

impl CheckoutSession {
    /// Parse the backend's raw session payload.
    ///
    /// The backend relays the provider's session as a JSON string; a missing
    /// or empty `url` makes the session unusable for redirect hand-off.
    ///
    /// # Errors
    ///
    /// Returns [`SessionParseError`] on malformed JSON or an absent URL.
    pub fn from_json(raw: &str) -> Result<Self, SessionParseError> {
        let session: Self = serde_json::from_str(raw)?;
        if session.url.trim().is_empty() {
            return Err(SessionParseError::MissingUrl);
        }
        Ok(session)
    }
}

/// Terminal outcome of a payment session.
///
/// A closed sum so handling both branches is a compile-time obligation.
/// Once a terminal value is observed the session id must not be reused and
/// subsequent polls return the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum StripeSessionStatus {
    /// Payment completed. Carries the caller identity the provider reported
    /// (if any) and the opaque provider response payload.
    #[serde(rename_all = "camelCase")]
    Completed {
        user_principal: Option<String>,
        response: String,
    },
    /// Payment failed with a provider-side error message.
    Failed { error: String },
}
