//! Session cart: persistence, notifications, controller and rendering.
//!
//! # Flow
//!
//! Each cart request builds a [`CartController`] over the shopper's
//! [`SessionCartStore`], applies one mutation, and renders the result:
//!
//! ```text
//! load (store) -> mutate (tienda_core::Cart) -> save (store) -> notify -> render (view)
//! ```

pub mod controller;
pub mod notification;
pub mod store;
pub mod view;

pub use controller::CartController;
pub use notification::{Notifier, NotifierRegistry};
pub use store::{CartStore, CartStoreError, SessionCartStore};
pub use view::{CartRowView, CartView};
