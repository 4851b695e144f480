//! Reward points and wishlist projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::CustomerId;

/// Per-user reward point balance with eligibility flags.
///
/// Maintained entirely server-side; the client treats it as read-only apart
/// from the administrative correction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardPoints {
    pub user_id: CustomerId,
    pub points: u64,
    pub birthday_eligible: bool,
    pub student_discount_eligible: bool,
    pub created_at: DateTime<Utc>,
}

/// Saved product ids for the authenticated caller.
///
/// Set semantics: add/remove are idempotent on the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    pub product_ids: Vec<String>,
}

impl Wishlist {
    #[must_use]
    pub fn contains(&self, product_id: &str) -> bool {
        self.product_ids.iter().any(|id| id == product_id)
    }
}
