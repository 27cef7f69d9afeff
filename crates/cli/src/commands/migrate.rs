//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! tienda-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

use tienda_storefront::config::get_database_url;
use tienda_storefront::db;
use tienda_storefront::middleware::migrate_session_store;

use super::CommandError;

/// Create the tower-sessions schema and table used by the storefront.
///
/// Safe to run repeatedly.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or the migration queries fail.
pub async fn sessions() -> Result<(), CommandError> {
    dotenvy::dotenv().ok();

    let database_url = get_database_url("STOREFRONT_DATABASE_URL")?;

    tracing::info!("Connecting to storefront database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running session store migration...");
    migrate_session_store(&pool).await?;

    tracing::info!("Session store migration complete");
    Ok(())
}
