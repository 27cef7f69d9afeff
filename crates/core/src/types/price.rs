//! Prices in Colombian pesos, using decimal arithmetic.
//!
//! Display follows the `es-CO` convention: `$` prefix, `.` between thousands
//! and `,` before the fraction, e.g. `$1.234.567,5`.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};

use super::Quantity;

/// Fraction digits kept when formatting an amount for display.
const DISPLAY_FRACTION_DIGITS: u32 = 3;

/// Errors that can occur when building or parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The display text is empty.
    #[error("price text is empty")]
    Empty,
    /// The display text is not an `es-CO` formatted amount.
    #[error("unrecognized price text: {0:?}")]
    Malformed(String),
}

/// A non-negative amount in currency units (pesos, not cents).
///
/// Serializes as a JSON number; deserializes from a number or a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: u64) -> Self {
        Self(Decimal::from(units))
    }

    /// Returns the underlying amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Multiply by a quantity, saturating at the largest representable amount.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity.get())))
    }

    /// Add two prices, saturating at the largest representable amount.
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Format for display, e.g. `$25.000`.
    #[must_use]
    pub fn display(self) -> String {
        format_es_co(self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.display())
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl core::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

/// Format an amount as `es-CO` currency text.
///
/// At most three fraction digits are shown (rounded half away from zero) and
/// trailing zeros are dropped.
///
/// ```
/// use rust_decimal::Decimal;
/// use tienda_core::format_es_co;
///
/// assert_eq!(format_es_co(Decimal::from(25_000)), "$25.000");
/// assert_eq!(format_es_co(Decimal::new(12_345, 1)), "$1.234,5");
/// ```
#[must_use]
pub fn format_es_co(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(DISPLAY_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut out = String::with_capacity(text.len() + text.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    out.push('$');
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push(',');
        out.push_str(frac_part);
    }
    out
}

/// Insert `.` between every group of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Parse `es-CO` display text such as `$120.000` or `$1.234,50`.
///
/// Thousands groups must be well formed: the first group has one to three
/// digits and every later group exactly three. Text that does not follow the
/// convention is rejected rather than guessed at.
///
/// # Errors
///
/// Returns [`PriceError::Empty`] for blank text, [`PriceError::Negative`] for
/// a leading minus, and [`PriceError::Malformed`] for anything else that does
/// not match the convention.
pub fn parse_display_price(text: &str) -> Result<Price, PriceError> {
    let trimmed = text.trim();
    let body = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();
    if body.is_empty() {
        return Err(PriceError::Empty);
    }
    if body.starts_with('-') {
        return Err(PriceError::Negative);
    }

    let malformed = || PriceError::Malformed(trimmed.to_owned());
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    let (int_part, frac_part) = match body.split_once(',') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body, None),
    };

    let mut digits = String::with_capacity(int_part.len());
    for (i, group) in int_part.split('.').enumerate() {
        let valid = if i == 0 {
            is_digits(group) && (group.len() <= 3 || !int_part.contains('.'))
        } else {
            is_digits(group) && group.len() == 3
        };
        if !valid {
            return Err(malformed());
        }
        digits.push_str(group);
    }

    if let Some(frac) = frac_part {
        if !is_digits(frac) {
            return Err(malformed());
        }
        digits.push('.');
        digits.push_str(frac);
    }

    let amount = Decimal::from_str(&digits).map_err(|_| malformed())?;
    Price::new(amount)
}
