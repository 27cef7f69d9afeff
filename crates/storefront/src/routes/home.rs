//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tienda_core::ProductDescriptor;
use tower_sessions::Session;
use tracing::instrument;

use super::PageContext;
use crate::filters;
use crate::state::AppState;

/// Home page template: the product grid.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductDescriptor>,
    pub cart_count: u32,
    pub notice: String,
}

/// Display the product grid.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let page = PageContext::load(&state, &session).await;

    HomeTemplate {
        products: state.catalog().products().to_vec(),
        cart_count: page.cart_count,
        notice: page.notice,
    }
}
