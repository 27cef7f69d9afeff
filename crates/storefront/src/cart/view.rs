//! Cart rendering.
//!
//! [`CartView`] is the display projection of a cart: every amount is already
//! formatted, so templates only place strings. The fragment templates here
//! are what the cart endpoints return to HTMX.

use askama::Template;
use askama_web::WebTemplate;
use tienda_core::{Cart, LineItem, Price};

/// One table row of the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRowView {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartRowView>,
    pub is_empty: bool,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Project a cart, charging `shipping_fee` when it is non-empty.
    #[must_use]
    pub fn new(cart: &Cart, shipping_fee: Price) -> Self {
        let totals = cart.compute_totals(shipping_fee);
        Self {
            items: cart.items().iter().map(CartRowView::from).collect(),
            is_empty: cart.is_empty(),
            subtotal: totals.subtotal.display(),
            shipping: totals.shipping.display(),
            total: totals.total.display(),
            item_count: cart.total_item_count(),
        }
    }
}

impl From<&LineItem> for CartRowView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            image_url: item.image_url.clone(),
            unit_price: item.unit_price.display(),
            quantity: item.quantity.get(),
            line_total: item.line_total().display(),
        }
    }
}

/// Cart table and summary, plus an out-of-band banner refresh (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_fragment.html")]
pub struct CartFragmentTemplate {
    pub cart: CartView,
    pub notice: String,
}

/// Cart count badge fragment (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Badge plus an out-of-band banner, returned after an add (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_added.html")]
pub struct CartAddedTemplate {
    pub count: u32,
    pub notice: String,
}

/// Notification banner fragment, re-fetched while a notice is showing (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/notification_poll.html")]
pub struct NotificationTemplate {
    pub notice: String,
}
