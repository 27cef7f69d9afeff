//! Tienda Core - cart model and shared types.
//!
//! This crate provides the pieces of the storefront that have invariants worth
//! protecting and no I/O of their own:
//!
//! - [`cart`] - the ordered, id-unique cart of line items and its totals
//! - [`types`] - newtypes for product ids, quantities, prices and emails
//!
//! # Architecture
//!
//! Persistence, rendering and HTTP live in `tienda-storefront`. Everything
//! here is synchronous and deterministic so it can be unit tested in isolation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartError, CartTotals, LineItem, ProductDescriptor};
pub use types::*;
