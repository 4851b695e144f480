//! Product reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::CustomerId;

/// A customer review of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub user_id: CustomerId,
    pub product_id: String,
    /// 1-5 star rating.
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}
