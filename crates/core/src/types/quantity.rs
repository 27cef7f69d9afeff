//! Line item quantities.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is zero or negative.
    #[error("quantity must be a positive integer")]
    NotPositive,
    /// The input does not start with an integer.
    #[error("quantity is not a number")]
    NotANumber,
    /// The value does not fit in a `u32`.
    #[error("quantity is too large")]
    TooLarge,
}

/// A positive item count.
///
/// Zero and negative values are unrepresentable, so a line item can never
/// hold an invalid quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A quantity of one.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity from a `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::NotPositive`] for zero.
    pub const fn new(value: u32) -> Result<Self, QuantityError> {
        match NonZeroU32::new(value) {
            Some(n) => Ok(Self(n)),
            None => Err(QuantityError::NotPositive),
        }
    }

    /// Returns the quantity as a `u32`.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the quantity plus one, saturating at `u32::MAX`.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Parse a quantity typed into a form field.
    ///
    /// Leading whitespace and an optional sign are accepted, then the leading
    /// run of digits is read and anything after it is ignored, so `"4 u"`
    /// reads as 4 and `"2.7"` as 2.
    ///
    /// # Errors
    ///
    /// Returns an error when no digits lead the input, when the number is
    /// zero or negative, or when it overflows `u32`.
    pub fn parse_input(input: &str) -> Result<Self, QuantityError> {
        let s = input.trim_start();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, s.get(1..).unwrap_or_default()),
            Some(b'+') => (false, s.get(1..).unwrap_or_default()),
            _ => (false, s),
        };

        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let digits = rest.get(..digits_end).unwrap_or_default();
        if digits.is_empty() {
            return Err(QuantityError::NotANumber);
        }

        let all_zero = digits.bytes().all(|b| b == b'0');
        if negative || all_zero {
            return Err(QuantityError::NotPositive);
        }

        let value = digits
            .parse::<u32>()
            .map_err(|_| QuantityError::TooLarge)?;
        Self::new(value)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_and_negative() {
        assert_eq!(Quantity::new(0), Err(QuantityError::NotPositive));
        assert_eq!(Quantity::try_from(0_u32), Err(QuantityError::NotPositive));
        assert_eq!(Quantity::try_from(4_u32).unwrap().get(), 4);
    }

    #[test]
    fn test_parse_input_leading_integer() {
        assert_eq!(Quantity::parse_input("4").unwrap().get(), 4);
        assert_eq!(Quantity::parse_input("  12").unwrap().get(), 12);
        assert_eq!(Quantity::parse_input("4 u").unwrap().get(), 4);
        assert_eq!(Quantity::parse_input("2.7").unwrap().get(), 2);
        assert_eq!(Quantity::parse_input("+3").unwrap().get(), 3);
    }

    #[test]
    fn test_parse_input_rejections() {
        assert_eq!(Quantity::parse_input(""), Err(QuantityError::NotANumber));
        assert_eq!(Quantity::parse_input("abc"), Err(QuantityError::NotANumber));
        assert_eq!(Quantity::parse_input("-"), Err(QuantityError::NotANumber));
        assert_eq!(Quantity::parse_input("0"), Err(QuantityError::NotPositive));
        assert_eq!(Quantity::parse_input("-3"), Err(QuantityError::NotPositive));
        assert_eq!(
            Quantity::parse_input("99999999999"),
            Err(QuantityError::TooLarge)
        );
    }

    #[test]
    fn test_increment_saturates() {
        let max = Quantity::new(u32::MAX).unwrap();
        assert_eq!(max.increment(), max);
        assert_eq!(Quantity::ONE.increment().get(), 2);
    }

    #[test]
    fn test_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert!(serde_json::from_str::<Quantity>("-1").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("3").unwrap().get(), 3);
    }
}
