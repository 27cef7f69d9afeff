//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::cart::NotifierRegistry;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;

/// How long an unused notifier is kept before it is evicted.
const NOTIFIER_IDLE_EXPIRY: Duration = Duration::from_secs(30 * 60);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    catalog: Catalog,
    notifiers: NotifierRegistry,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `pool` - `PostgreSQL` connection pool
    /// * `catalog` - Products offered by the store
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool, catalog: Catalog) -> Self {
        let notifiers = NotifierRegistry::new(config.notification_duration, NOTIFIER_IDLE_EXPIRY);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                catalog,
                notifiers,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the shoppers' notification banners.
    #[must_use]
    pub fn notifiers(&self) -> &NotifierRegistry {
        &self.inner.notifiers
    }
}
