//! Notification banner route handler.

use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::view::NotificationTemplate;
use crate::state::AppState;

/// Current notification banner (HTMX).
///
/// A visible banner re-fetches itself until the notice is hidden.
///
/// Shoppers without a notifier get an empty, hidden banner.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let notice = state
        .notifiers()
        .existing(&session)
        .await
        .and_then(|notifier| notifier.current())
        .unwrap_or_default();

    NotificationTemplate { notice }
}
