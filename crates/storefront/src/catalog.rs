//! Product catalog loaded from a JSON file at startup.
//!
//! Each entry is `{id, name, price, image_url}`. `price` is either a JSON
//! number or `es-CO` display text such as `"$120.000"`; text that does not
//! parse fails the whole load.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tienda_core::{Price, PriceError, ProductDescriptor, ProductId, parse_display_price};

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not valid JSON or an entry has the wrong shape.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A product's price could not be interpreted.
    #[error("product {id}: {source}")]
    Price {
        id: ProductId,
        #[source]
        source: PriceError,
    },

    /// Two entries share an id.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
}

#[derive(Debug, Deserialize)]
struct RawProduct {
    id: ProductId,
    name: String,
    price: RawPrice,
    #[serde(default)]
    image_url: String,
}

/// Strings are tried first so `"120.000"` is read as display text, not as a
/// decimal with a fraction.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Text(String),
    Number(Decimal),
}

impl RawPrice {
    fn into_price(self) -> Result<Price, PriceError> {
        match self {
            Self::Text(text) => parse_display_price(&text),
            Self::Number(amount) => Price::new(amount),
        }
    }
}

/// The products offered by the store, in file order.
///
/// Cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Arc<Vec<ProductDescriptor>>,
    index: Arc<HashMap<ProductId, usize>>,
}

impl Catalog {
    /// Load a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are
    /// invalid (see [`Catalog::from_json_str`]).
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Parse catalog JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a price cannot be parsed,
    /// or two products share an id.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let entries: Vec<RawProduct> = serde_json::from_str(raw)?;

        let mut products = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());
        for entry in entries {
            let unit_price = entry
                .price
                .into_price()
                .map_err(|source| CatalogError::Price {
                    id: entry.id.clone(),
                    source,
                })?;
            if index.insert(entry.id.clone(), products.len()).is_some() {
                return Err(CatalogError::DuplicateId(entry.id));
            }
            products.push(ProductDescriptor {
                id: entry.id,
                name: entry.name,
                unit_price,
                image_url: entry.image_url,
            });
        }

        Ok(Self {
            products: Arc::new(products),
            index: Arc::new(index),
        })
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&ProductDescriptor> {
        self.index.get(id).and_then(|&i| self.products.get(i))
    }

    /// All products, in file order.
    #[must_use]
    pub fn products(&self) -> &[ProductDescriptor] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
