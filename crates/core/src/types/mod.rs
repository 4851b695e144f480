//! Core types for Velvet Penguin.
//!
//! Wire types mirror the backend's JSON contract (camelCase field names).

pub mod cart;
pub mod checkout;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod review;
pub mod rewards;
pub mod settings;

pub use cart::{CartItem, PricedCart, PricedLine, ShoppingCart};
pub use checkout::{CheckoutSession, SessionParseError, ShoppingItem, StripeSessionStatus};
pub use id::CustomerId;
pub use order::{Order, OrderStatus};
pub use price::Price;
pub use product::Product;
pub use review::Review;
pub use rewards::{RewardPoints, Wishlist};
pub use settings::{PaymentMethodsConfig, ShippingRates, StoreInfo, StoreSettings, TaxSettings};
