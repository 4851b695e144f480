//! Store settings as exposed to the storefront.
//!
//! The admin console edits these backend-side; the storefront only reads
//! them (they back the `store-settings` cache key). Presentational settings
//! (theme colors, logo) are not modeled here.

use serde::{Deserialize, Serialize};

/// Store-wide configuration owned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub store_info: StoreInfo,
    pub payment_methods: PaymentMethodsConfig,
    pub shipping_rates: ShippingRates,
    pub tax_settings: TaxSettings,
}

/// Public store identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    pub name: String,
    pub address: String,
    pub contact_email: String,
    pub phone_number: String,
}

/// Which payment methods the store accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodsConfig {
    pub enable_stripe: bool,
    pub accepted_card_types: Vec<String>,
}

/// Shipping cost configuration, amounts in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRates {
    pub flat_rate: u64,
    pub free_shipping_threshold: u64,
    pub region_shipping_costs: Vec<(String, u64)>,
}

/// Sales tax configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSettings {
    pub sales_tax_percentage: f64,
    pub tax_exempt_regions: Vec<String>,
}
