//! Domain models for storefront.
//!
//! The cart itself lives in `tienda-core`; this module only holds the
//! session-side keys under which storefront state is persisted.

pub mod session;

pub use session::keys as session_keys;
