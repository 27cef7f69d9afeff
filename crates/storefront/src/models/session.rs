//! Session-related types.
//!
//! The session is the shopper's durable key-value slot: it survives page
//! loads for as long as the session cookie does.

/// Session keys for storefront data.
pub mod keys {
    /// Key for the serialized cart (JSON text, an array of line items).
    pub const CART: &str = "cart";

    /// Key for the id of the shopper's notification banner.
    pub const NOTIFIER_ID: &str = "notifier_id";
}
