//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Product grid
//!
//! # Cart (HTMX fragments)
//! GET  /cart             - Cart page
//! POST /cart/add         - Add one unit (returns badge + banner)
//! POST /cart/update      - Set quantity (returns cart fragment)
//! POST /cart/remove      - Remove item (returns cart fragment + banner)
//! GET  /cart/count       - Cart count badge (fragment)
//! GET  /notification     - Notification banner (fragment)
//!
//! # Contact
//! GET  /contact          - Contact form
//! POST /contact          - Validate and accept a message
//! ```

pub mod cart;
pub mod contact;
pub mod home;
pub mod notification;

use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::Session;

use crate::cart::{CartStore, SessionCartStore};
use crate::state::AppState;

/// Values every full page needs for its header and banner.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub cart_count: u32,
    pub notice: String,
}

impl PageContext {
    /// Read the badge count and visible notification for this shopper.
    pub async fn load(state: &AppState, session: &Session) -> Self {
        let cart = SessionCartStore::new(session.clone()).load().await;
        let notice = state
            .notifiers()
            .existing(session)
            .await
            .and_then(|notifier| notifier.current())
            .unwrap_or_default();
        Self {
            cart_count: cart.total_item_count(),
            notice,
        }
    }
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .route("/notification", get(notification::show))
        .route("/contact", get(contact::show).post(contact::submit))
}
