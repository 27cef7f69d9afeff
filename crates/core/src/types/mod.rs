//! Core types for Tienda.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod quantity;

pub use email::{Email, EmailError};
pub use id::{ProductId, ProductIdError};
pub use price::{Price, PriceError, format_es_co, parse_display_price};
pub use quantity::{Quantity, QuantityError};
