//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod migrate;

use std::path::PathBuf;

use thiserror::Error;

/// Errors from any CLI command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("configuration error: {0}")]
    Config(#[from] tienda_storefront::config::ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Catalog(#[from] tienda_storefront::catalog::CatalogError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Cart(#[from] tienda_storefront::cart::CartStoreError),
}
