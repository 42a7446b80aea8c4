//! Whole-taka prices as served by the plant catalog.
//!
//! The catalog reports prices loosely: numbers, numeric strings, or nothing
//! at all. Everything is coerced to an integer amount, and a zero amount means
//! the plant is sold on request only.

use std::fmt;
use std::iter::Sum;

use serde::{Deserialize, Serialize};

/// Currency glyph used for every rendered amount.
pub const CURRENCY_SYMBOL: &str = "৳";

/// An integer amount in taka.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// The "price on request" amount.
    pub const ZERO: Self = Self(0);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Get the underlying amount.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Whether the plant has no usable price.
    #[must_use]
    pub const fn is_on_request(&self) -> bool {
        self.0 == 0
    }

    /// Line total for `quantity` units, saturating on overflow.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }

    /// Parse the integer prefix of a string.
    ///
    /// Leading whitespace and a single sign are accepted; parsing stops at the
    /// first non-digit. Input without any leading digits yields [`Price::ZERO`].
    ///
    /// ```rust
    /// # use plantshop_core::Price;
    /// assert_eq!(Price::parse_lenient(" 450 BDT").amount(), 450);
    /// assert_eq!(Price::parse_lenient("12.9").amount(), 12);
    /// assert!(Price::parse_lenient("free").is_on_request());
    /// ```
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        let trimmed = input.trim_start();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, trimmed.get(1..).unwrap_or_default()),
            Some(b'+') => (false, trimmed.get(1..).unwrap_or_default()),
            _ => (false, trimmed),
        };

        let amount = digits
            .bytes()
            .take_while(u8::is_ascii_digit)
            .fold(0_i64, |acc, digit| {
                acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
            });

        Self(if negative { -amount } else { amount })
    }

    /// Coerce a raw JSON price field.
    ///
    /// Numbers are truncated toward zero, strings go through
    /// [`Price::parse_lenient`], and anything else is treated as on request.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(number) => number.as_i64().map_or_else(
                || {
                    #[allow(clippy::cast_possible_truncation)] // saturating float cast
                    let truncated = number.as_f64().unwrap_or_default() as i64;
                    Self(truncated)
                },
                Self,
            ),
            serde_json::Value::String(text) => Self::parse_lenient(text),
            _ => Self::ZERO,
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY_SYMBOL}{}", self.0)
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.fold(0_i64, |acc, price| acc.saturating_add(price.0)))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_display_uses_taka_glyph() {
        assert_eq!(Price::new(200).to_string(), "৳200");
        assert_eq!(Price::ZERO.to_string(), "৳0");
    }

    #[test]
    fn test_parse_lenient_integer_prefix() {
        assert_eq!(Price::parse_lenient("500"), Price::new(500));
        assert_eq!(Price::parse_lenient("  75abc"), Price::new(75));
        assert_eq!(Price::parse_lenient("-20"), Price::new(-20));
        assert_eq!(Price::parse_lenient("+8"), Price::new(8));
    }

    #[test]
    fn test_parse_lenient_without_digits_is_zero() {
        assert!(Price::parse_lenient("").is_on_request());
        assert!(Price::parse_lenient("abc").is_on_request());
        assert!(Price::parse_lenient("-").is_on_request());
        assert!(Price::parse_lenient("undefined").is_on_request());
    }

    #[test]
    fn test_parse_lenient_saturates() {
        assert_eq!(
            Price::parse_lenient("99999999999999999999999"),
            Price::new(i64::MAX)
        );
    }

    #[test]
    fn test_from_json_variants() {
        assert_eq!(Price::from_json(&json!(350)), Price::new(350));
        assert_eq!(Price::from_json(&json!(12.75)), Price::new(12));
        assert_eq!(Price::from_json(&json!("600")), Price::new(600));
        assert_eq!(Price::from_json(&json!(null)), Price::ZERO);
        assert_eq!(Price::from_json(&json!(true)), Price::ZERO);
        assert_eq!(Price::from_json(&json!({"amount": 5})), Price::ZERO);
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::new(100).times(2), Price::new(35).times(3)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::new(305));
        assert_eq!(Price::new(i64::MAX).times(2), Price::new(i64::MAX));
    }
}
