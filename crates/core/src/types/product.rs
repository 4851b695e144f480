//! Catalog product.

use serde::{Deserialize, Serialize};

/// A catalog product as owned by the backend.
///
/// Read-only from the checkout pipeline's perspective: the client resolves
/// cart items against the latest catalog snapshot but never mutates stock or
/// price locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product id.
    pub id: String,
    pub name: String,
    pub description: String,
    pub designer: String,
    pub color: String,
    /// Part of a seasonal drop.
    pub seasonal: bool,
    /// Units in stock. Informational at cart-edit time; the authoritative
    /// check happens backend-side at order placement.
    pub stock: u32,
    /// Price in minor currency units (cents).
    pub price: u64,
    /// Ordered image URLs.
    pub images: Vec<String>,
}
