//! Session middleware configuration.
//!
//! Sessions hold the shopper's cart and notifier id. Production sessions
//! live in `PostgreSQL`; any other [`SessionStore`] can be plugged in with
//! the same cookie settings.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "tienda_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Apply the storefront's cookie settings to a session store.
///
/// * `secure` - only send the cookie over HTTPS
#[must_use]
pub fn configure_session_layer<S: SessionStore>(store: S, secure: bool) -> SessionManagerLayer<S> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Create the session layer with the `PostgreSQL` store.
///
/// The sessions table must already exist (see [`migrate_session_store`]).
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &StorefrontConfig,
) -> SessionManagerLayer<PostgresStore> {
    configure_session_layer(PostgresStore::new(pool.clone()), config.is_secure())
}

/// Create the sessions schema and table if they do not exist.
///
/// # Errors
///
/// Returns an error if the migration queries fail.
pub async fn migrate_session_store(pool: &PgPool) -> Result<(), sqlx::Error> {
    PostgresStore::new(pool.clone()).migrate().await
}
