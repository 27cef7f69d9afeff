//! Cart controller: the single owner of a shopper's cart during a request.
//!
//! Every mutation goes through the controller so it is always followed by a
//! save and, where the shopper should be told, a notification.

use tienda_core::{Cart, CartTotals, LineItem, Price, ProductDescriptor, ProductId, Quantity};

use super::notification::Notifier;
use super::store::CartStore;

/// Message shown after a line item is removed.
pub const REMOVED_MESSAGE: &str = "Producto eliminado del carrito.";

/// Message shown after a product is added.
#[must_use]
pub fn added_message(product_name: &str) -> String {
    format!("\"{product_name}\" fue añadido al carrito.")
}

/// Owns one cart loaded from a [`CartStore`].
#[derive(Debug)]
pub struct CartController<S> {
    store: S,
    cart: Cart,
    notifier: Option<Notifier>,
}

impl<S: CartStore> CartController<S> {
    /// Load the cart from the store.
    ///
    /// Without a notifier the controller works the same but shows nothing.
    pub async fn load(store: S, notifier: Option<Notifier>) -> Self {
        let cart = store.load().await;
        Self {
            store,
            cart,
            notifier,
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Value for the cart badge.
    #[must_use]
    pub fn badge_count(&self) -> u32 {
        self.cart.total_item_count()
    }

    #[must_use]
    pub fn totals(&self, shipping_fee: Price) -> CartTotals {
        self.cart.compute_totals(shipping_fee)
    }

    /// Add one unit of a product, save, and notify.
    ///
    /// Returns the product's quantity after the add.
    pub async fn add_item(&mut self, product: &ProductDescriptor) -> Quantity {
        let quantity = self.cart.add_item(product);
        self.store.save(&self.cart).await;
        tracing::info!(product_id = %product.id, %quantity, "Added to cart");
        self.notify(added_message(&product.name));
        quantity
    }

    /// Apply a quantity typed by the shopper, then save.
    ///
    /// Input that is not a positive integer, or an id not in the cart, leaves
    /// the cart unchanged. Returns whether the quantity was applied.
    pub async fn set_quantity(&mut self, id: &ProductId, input: &str) -> bool {
        let applied = match Quantity::parse_input(input) {
            Ok(quantity) => self.cart.set_quantity(id, quantity),
            Err(e) => {
                tracing::debug!(product_id = %id, input, error = %e, "Ignoring quantity update");
                false
            }
        };
        self.store.save(&self.cart).await;
        applied
    }

    /// Remove a product, save, and notify.
    pub async fn remove_item(&mut self, id: &ProductId) -> Option<LineItem> {
        let removed = self.cart.remove_item(id);
        self.store.save(&self.cart).await;
        if removed.is_some() {
            tracing::info!(product_id = %id, "Removed from cart");
        }
        self.notify(REMOVED_MESSAGE);
        removed
    }

    fn notify(&self, message: impl Into<String>) {
        if let Some(notifier) = &self.notifier {
            notifier.show(message);
        }
    }
}
