//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_CATALOG_PATH` - Product catalog JSON (default: the crate's `content/catalog.json`)
//! - `STOREFRONT_STATIC_DIR` - Directory served under `/static` (default: the crate's `static/`)
//! - `STOREFRONT_SHIPPING_FEE` - Flat shipping fee in pesos (default: 8000)
//! - `STOREFRONT_NOTIFICATION_MS` - How long cart notifications stay visible (default: 2000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;
use tienda_core::Price;

/// Default flat shipping fee in pesos.
pub const DEFAULT_SHIPPING_FEE: u64 = 8_000;

/// Default time a notification stays on screen.
pub const DEFAULT_NOTIFICATION_MS: u64 = 2_000;

/// Bundled catalog, resolved at build time so it loads from any working directory.
pub const DEFAULT_CATALOG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/content/catalog.json");

/// Bundled stylesheets and product images.
pub const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Path of the product catalog file
    pub catalog_path: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Flat shipping fee charged on a non-empty cart
    pub shipping_fee: Price,
    /// How long a cart notification stays visible
    pub notification_duration: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("STOREFRONT_DATABASE_URL")?;
        let host = parse_env_or_default::<IpAddr>("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env_or_default::<u16>("STOREFRONT_PORT", "3000")?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        let catalog_path = PathBuf::from(get_env_or_default(
            "STOREFRONT_CATALOG_PATH",
            DEFAULT_CATALOG_PATH,
        ));
        let static_dir = PathBuf::from(get_env_or_default(
            "STOREFRONT_STATIC_DIR",
            DEFAULT_STATIC_DIR,
        ));

        let shipping_fee = parse_env_or_default::<Decimal>(
            "STOREFRONT_SHIPPING_FEE",
            &DEFAULT_SHIPPING_FEE.to_string(),
        )?;
        let shipping_fee = Price::new(shipping_fee).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_SHIPPING_FEE".to_string(), e.to_string())
        })?;

        let notification_ms = parse_env_or_default::<u64>(
            "STOREFRONT_NOTIFICATION_MS",
            &DEFAULT_NOTIFICATION_MS.to_string(),
        )?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            catalog_path,
            static_dir,
            shipping_fee,
            notification_duration: Duration::from_millis(notification_ms),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env_or_default::<f32>("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env_or_default::<f32>(
                "SENTRY_TRACES_SAMPLE_RATE",
                "0.0",
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
pub fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to a default string.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_trims() {
        let port: u16 = parse_value("STOREFRONT_PORT", " 8080 ").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_value_invalid() {
        let result = parse_value::<u16>("STOREFRONT_PORT", "not-a-port");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_parse_value_decimal_fee() {
        let fee: Decimal = parse_value("STOREFRONT_SHIPPING_FEE", "8000").unwrap();
        assert_eq!(Price::new(fee).unwrap(), Price::from_units(DEFAULT_SHIPPING_FEE));
    }

    #[test]
    fn test_default_paths_exist() {
        assert!(PathBuf::from(DEFAULT_CATALOG_PATH).is_file());
        assert!(PathBuf::from(DEFAULT_STATIC_DIR).join("css/main.css").is_file());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnvVar("STOREFRONT_BASE_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: STOREFRONT_BASE_URL"
        );
    }
}
