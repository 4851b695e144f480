//! Shopping cart and the derived pricing join.
//!
//! The cart itself is backend-owned state; the client holds a projection of
//! the last fetch. Totals are never stored - they are derived on every read
//! by joining cart items against the current catalog snapshot, so a cached
//! total can never drift from the items it was computed from.

use serde::{Deserialize, Serialize};

use crate::types::checkout::ShoppingItem;
use crate::types::product::Product;

/// One line of a shopping cart: a product reference and a quantity.
///
/// At most one `CartItem` exists per product id per cart; adding the same
/// product again accumulates quantity backend-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    /// Always >= 1 in a well-formed cart.
    pub quantity: u32,
}

/// The authenticated caller's shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingCart {
    pub items: Vec<CartItem>,
}

impl ShoppingCart {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantity of a product in the cart, 0 if absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.items
            .iter()
            .find(|item| item.product_id == product_id)
            .map_or(0, |item| item.quantity)
    }

    /// Join the cart against a catalog snapshot.
    ///
    /// Every cart item produces a line. Items whose product no longer
    /// resolves (deleted after being carted) get `product: None`: they are
    /// excluded from the total and from payment line items but stay visible
    /// so the UI can render them as an error state rather than silently
    /// dropping them.
    #[must_use]
    pub fn priced(&self, catalog: &[Product]) -> PricedCart {
        let lines = self
            .items
            .iter()
            .map(|item| PricedLine {
                item: item.clone(),
                product: catalog.iter().find(|p| p.id == item.product_id).cloned(),
            })
            .collect();
        PricedCart { lines }
    }
}

/// A cart item paired with its resolved product, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub item: CartItem,
    /// `None` when the referenced product no longer exists in the catalog.
    pub product: Option<Product>,
}

impl PricedLine {
    /// Line total in cents, `None` for unresolved lines.
    #[must_use]
    pub fn total_cents(&self) -> Option<u64> {
        self.product
            .as_ref()
            .map(|p| p.price * u64::from(self.item.quantity))
    }
}

/// Result of the Cart x Product join. Derived, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedCart {
    pub lines: Vec<PricedLine>,
}

impl PricedCart {
    /// Sum of `price * quantity` over resolved lines.
    #[must_use]
    pub fn total_cents(&self) -> u64 {
        self.lines.iter().filter_map(PricedLine::total_cents).sum()
    }

    /// True if at least one line resolves to a product.
    #[must_use]
    pub fn has_resolvable_lines(&self) -> bool {
        self.lines.iter().any(|line| line.product.is_some())
    }

    /// Build payment-provider line items from the resolved lines.
    ///
    /// Constructed fresh for every checkout attempt; unresolved lines are
    /// skipped.
    #[must_use]
    pub fn line_items(&self, currency: &str) -> Vec<ShoppingItem> {
        self.lines
            .iter()
            .filter_map(|line| {
                line.product.as_ref().map(|product| ShoppingItem {
                    product_name: product.name.clone(),
                    product_description: product.description.clone(),
                    price_in_cents: product.price,
                    quantity: line.item.quantity,
                    currency: currency.to_string(),
                })
            })
            .collect()
    }
}
