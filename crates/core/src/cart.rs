//! The shopping cart model.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s, unique by product id.
//! Insertion order is display order. All operations are infallible: input
//! that would break an invariant is simply not applied.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, Quantity};

/// Errors raised when a list of line items does not form a valid cart.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Two line items share the same product id.
    #[error("duplicate line item for product {0}")]
    DuplicateItem(ProductId),
}

/// The product data needed to put something in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDescriptor {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub image_url: String,
}

/// One product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub image_url: String,
    pub quantity: Quantity,
}

impl LineItem {
    /// A fresh line item with a quantity of one.
    #[must_use]
    pub fn from_product(product: &ProductDescriptor) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            image_url: product.image_url.clone(),
            quantity: Quantity::ONE,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Subtotal, shipping and total of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

/// An ordered, id-unique collection of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from stored line items.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::DuplicateItem`] if two items share an id.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CartError> {
        for (i, item) in items.iter().enumerate() {
            if items.iter().skip(i + 1).any(|other| other.id == item.id) {
                return Err(CartError::DuplicateItem(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    /// Line items in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Look up the line item for a product.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Add one unit of a product.
    ///
    /// An existing line item has its quantity incremented; otherwise a new
    /// item with quantity one is appended. Returns the resulting quantity.
    pub fn add_item(&mut self, product: &ProductDescriptor) -> Quantity {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == product.id) {
            item.quantity = item.quantity.increment();
            return item.quantity;
        }
        self.items.push(LineItem::from_product(product));
        Quantity::ONE
    }

    /// Replace the quantity of an existing line item.
    ///
    /// Returns `false` and leaves the cart unchanged if no item has this id.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: Quantity) -> bool {
        match self.items.iter_mut().find(|item| &item.id == id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove the line item for a product, returning it if it was present.
    pub fn remove_item(&mut self, id: &ProductId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Sum of all quantities, as shown on the cart badge.
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |sum, item| sum.saturating_add(item.quantity.get()))
    }

    /// Compute subtotal, shipping and total.
    ///
    /// Shipping is only charged on a non-empty cart; an empty cart totals zero.
    #[must_use]
    pub fn compute_totals(&self, shipping_fee: Price) -> CartTotals {
        if self.items.is_empty() {
            return CartTotals::default();
        }
        let subtotal: Price = self.items.iter().map(LineItem::line_total).sum();
        CartTotals {
            subtotal,
            shipping: shipping_fee,
            total: subtotal.saturating_add(shipping_fee),
        }
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, price: u64) -> ProductDescriptor {
        ProductDescriptor {
            id: ProductId::parse(id).unwrap(),
            name: name.to_string(),
            unit_price: Price::from_units(price),
            image_url: format!("/static/img/{id}.jpg"),
        }
    }

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    const SHIPPING: u64 = 8_000;

    #[test]
    fn test_add_same_product_accumulates() {
        let mut cart = Cart::new();
        let widget = product("A", "Widget", 10_000);
        for expected in 1..=5 {
            assert_eq!(cart.add_item(&widget).get(), expected);
        }
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_item_count(), 5);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(&product("B", "Bolso", 5_000));
        cart.add_item(&product("A", "Widget", 10_000));
        cart.add_item(&product("B", "Bolso", 5_000));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["B", "A"]);
        assert_eq!(cart.get(&id("B")).unwrap().quantity.get(), 2);
    }

    #[test]
    fn test_remove_then_add_starts_fresh() {
        let mut cart = Cart::new();
        let widget = product("A", "Widget", 10_000);
        cart.add_item(&widget);
        cart.add_item(&widget);
        cart.add_item(&widget);

        let removed = cart.remove_item(&id("A")).unwrap();
        assert_eq!(removed.quantity.get(), 3);
        assert!(cart.is_empty());

        assert_eq!(cart.add_item(&widget), Quantity::ONE);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product("A", "Widget", 10_000));
        assert!(cart.remove_item(&id("Z")).is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&product("A", "Widget", 10_000));

        assert!(cart.set_quantity(&id("A"), Quantity::new(4).unwrap()));
        assert_eq!(cart.get(&id("A")).unwrap().quantity.get(), 4);

        assert!(!cart.set_quantity(&id("Z"), Quantity::new(9).unwrap()));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_compute_totals() {
        let mut cart = Cart::new();
        cart.add_item(&product("A", "Widget", 10_000));
        cart.add_item(&product("A", "Widget", 10_000));
        cart.add_item(&product("B", "Bolso", 5_000));

        let totals = cart.compute_totals(Price::from_units(SHIPPING));
        assert_eq!(totals.subtotal, Price::from_units(25_000));
        assert_eq!(totals.shipping, Price::from_units(8_000));
        assert_eq!(totals.total, Price::from_units(33_000));
    }

    #[test]
    fn test_empty_cart_has_no_shipping() {
        let totals = Cart::new().compute_totals(Price::from_units(SHIPPING));
        assert_eq!(totals, CartTotals::default());
        assert_eq!(totals.total, Price::ZERO);
    }

    #[test]
    fn test_widget_scenario() {
        let mut cart = Cart::new();
        let widget = product("A", "Widget", 10_000);
        cart.add_item(&widget);
        cart.add_item(&widget);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity.get(), 2);
        assert_eq!(cart.total_item_count(), 2);
        assert_eq!(
            cart.compute_totals(Price::from_units(SHIPPING)).total,
            Price::from_units(28_000)
        );
    }

    #[test]
    fn test_serde_roundtrip_keeps_order() {
        let mut cart = Cart::new();
        cart.add_item(&product("B", "Bolso", 5_000));
        cart.add_item(&product("A", "Widget", 10_000));
        cart.set_quantity(&id("A"), Quantity::new(3).unwrap());

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let json = r#"[
            {"id":"A","name":"Widget","unit_price":"10000","image_url":"a.jpg","quantity":1},
            {"id":"A","name":"Widget","unit_price":"10000","image_url":"a.jpg","quantity":2}
        ]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_zero_quantity() {
        let json = r#"[{"id":"A","name":"Widget","unit_price":10000,"image_url":"a.jpg","quantity":0}]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }
}
