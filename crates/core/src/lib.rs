//! Velvet Penguin Core - Shared domain types.
//!
//! This crate provides the types shared between the storefront client and
//! anything else that speaks the backend's wire format.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no caches. Everything the backend serializes lives here, plus the
//! derived computations the client is allowed to perform locally (cart
//! pricing, order-status lifecycle checks). Keeping these pure makes the
//! checkout pipeline testable without a backend.
//!
//! # Modules
//!
//! - [`types`] - Domain entities, wire types, and the cart pricing join

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
