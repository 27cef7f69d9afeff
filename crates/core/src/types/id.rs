//! Product identifiers.
//!
//! Product ids come from the catalog and from form posts, so they are opaque
//! strings rather than database integers. The only rule is that they are not
//! blank.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ProductId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductIdError {
    /// The input is empty or only whitespace.
    #[error("product id cannot be empty")]
    Empty,
    /// The input is longer than [`ProductId::MAX_LENGTH`].
    #[error("product id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// Identifier of a product, unique within a cart.
///
/// ```
/// use tienda_core::ProductId;
///
/// let id = ProductId::parse(" camiseta-01 ").unwrap();
/// assert_eq!(id.as_str(), "camiseta-01");
/// assert!(ProductId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Maximum length of a product id.
    pub const MAX_LENGTH: usize = 128;

    /// Parse a `ProductId`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or too long.
    pub fn parse(s: &str) -> Result<Self, ProductIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ProductIdError::Empty);
        }
        if trimmed.len() > Self::MAX_LENGTH {
            return Err(ProductIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl TryFrom<String> for ProductId {
    type Error = ProductIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl std::str::FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        assert_eq!(ProductId::parse("  a-1 ").unwrap().as_str(), "a-1");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ProductId::parse(""), Err(ProductIdError::Empty));
        assert_eq!(ProductId::parse(" \t"), Err(ProductIdError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "x".repeat(ProductId::MAX_LENGTH + 1);
        assert!(matches!(
            ProductId::parse(&long),
            Err(ProductIdError::TooLong { .. })
        ));
    }

    #[test]
    fn test_deserialize_rejects_blank() {
        assert!(serde_json::from_str::<ProductId>("\"\"").is_err());
        let id: ProductId = serde_json::from_str("\"A\"").unwrap();
        assert_eq!(id.to_string(), "A");
    }
}
