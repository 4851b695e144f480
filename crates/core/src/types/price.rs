//! Minor-currency-unit price representation.
//!
//! The backend stores every price as an integer number of the smallest
//! currency unit (cents for USD). Totals are summed in cents and only
//! converted to a decimal amount at the display edge, so no float ever
//! touches money.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in minor currency units with its ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the smallest currency unit (e.g., cents for USD).
    pub cents: u64,
    /// ISO 4217 currency code (e.g., "USD").
    pub currency: String,
}

impl Price {
    /// Create a price from a cents amount.
    #[must_use]
    pub fn from_cents(cents: u64, currency: &str) -> Self {
        Self {
            cents,
            currency: currency.to_string(),
        }
    }

    /// The amount in major units as an exact decimal (e.g., 1000 -> 10.00).
    #[must_use]
    pub fn amount(&self) -> Decimal {
        Decimal::new(i64::try_from(self.cents).unwrap_or(i64::MAX), 2)
    }

    /// Format for display (e.g., "10.00 USD").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{:.2} {}", self.amount(), self.currency)
    }
}
