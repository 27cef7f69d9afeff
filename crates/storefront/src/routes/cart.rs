//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutation answers with `HX-Trigger: cart-updated` so the badge in the
//! header refreshes itself.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tienda_core::ProductId;
use tower_sessions::Session;
use tracing::instrument;

use super::PageContext;
use crate::cart::controller::{REMOVED_MESSAGE, added_message};
use crate::cart::view::{CartAddedTemplate, CartCountTemplate, CartFragmentTemplate};
use crate::cart::{CartController, CartStore, CartView, Notifier, SessionCartStore};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::state::AppState;

/// Header telling HTMX listeners that the cart changed.
const CART_UPDATED: [(&str, &str); 1] = [("HX-Trigger", "cart-updated")];

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Update cart form data.
///
/// `quantity` is kept as typed; the controller decides whether it is usable.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    #[serde(default)]
    pub quantity: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub cart_count: u32,
    pub notice: String,
}

fn parse_product_id(raw: &str) -> Result<ProductId> {
    ProductId::parse(raw).map_err(|e| AppError::BadRequest(format!("invalid product id: {e}")))
}

async fn controller(
    session: &Session,
    notifier: Option<Notifier>,
) -> CartController<SessionCartStore> {
    CartController::load(SessionCartStore::new(session.clone()), notifier).await
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let page = PageContext::load(&state, &session).await;
    let cart = SessionCartStore::new(session).load().await;

    CartShowTemplate {
        cart: CartView::new(&cart, state.config().shipping_fee),
        cart_count: page.cart_count,
        notice: page.notice,
    }
}

/// Add one unit of a catalog product (HTMX).
///
/// Returns the updated badge plus the notification banner. Unknown products
/// answer 404 and leave the cart untouched.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let id = parse_product_id(&form.product_id)?;
    let product = state
        .catalog()
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let notifier = state.notifiers().ensure(&session).await;
    let mut cart = controller(&session, notifier).await;
    cart.add_item(&product).await;
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));

    Ok((
        AppendHeaders(CART_UPDATED),
        CartAddedTemplate {
            count: cart.badge_count(),
            notice: added_message(&product.name),
        },
    )
        .into_response())
}

/// Update a line item's quantity (HTMX).
///
/// Quantities that are not positive integers are ignored; the fragment then
/// shows the unchanged cart.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let id = parse_product_id(&form.product_id)?;

    let notifier = state.notifiers().existing(&session).await;
    let notice = notifier
        .as_ref()
        .and_then(Notifier::current)
        .unwrap_or_default();
    let mut cart = controller(&session, notifier).await;
    cart.set_quantity(&id, &form.quantity).await;

    Ok((
        AppendHeaders(CART_UPDATED),
        CartFragmentTemplate {
            cart: CartView::new(cart.cart(), state.config().shipping_fee),
            notice,
        },
    )
        .into_response())
}

/// Remove a line item (HTMX).
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let id = parse_product_id(&form.product_id)?;

    let notifier = state.notifiers().ensure(&session).await;
    let mut cart = controller(&session, notifier).await;
    cart.remove_item(&id).await;
    add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", id.as_str())]));

    Ok((
        AppendHeaders(CART_UPDATED),
        CartFragmentTemplate {
            cart: CartView::new(cart.cart(), state.config().shipping_fee),
            notice: REMOVED_MESSAGE.to_string(),
        },
    )
        .into_response())
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = SessionCartStore::new(session).load().await;
    CartCountTemplate {
        count: cart.total_item_count(),
    }
}
