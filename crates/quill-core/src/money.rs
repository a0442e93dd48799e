//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    2 × 9.99 = 19.979999999999997  ❌ WRONG!                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units (paise / cents)                      │
//! │    2 × 999 = 1998  → "19.98"                                            │
//! │                                                                         │
//! │  Decimal text from the request ("9.99") is parsed straight into         │
//! │  minor units. No float ever touches an amount.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quill_core::money::Money;
//!
//! let price: Money = "9.99".parse().unwrap();
//! assert_eq!(price.cents(), 999);
//!
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.to_string(), "19.98");
//! assert_eq!(line_total.display_with("Rs."), "Rs.19.98");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::CoreError;

/// Number of minor units in one major unit.
pub const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: a discount above 100% legitimately produces a
///   negative total, so the type must be able to hold it
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde as decimal text**: `"9.99"` on the way out; decimal text or a
///   JSON number on the way in
///
/// ## Where Money is Used
/// ```text
/// LineItem.unit_price ──► LineItem.line_total ──► subtotal
///                                                    │
///                     discount % ──► tax % ──► compute_total ──► "Total: Rs.x.xx"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Largest unit price or line total an invoice accepts
    /// (10,000,000,000,000.00).
    ///
    /// Five lines at this bound, scaled by any 0..=100% discount and tax,
    /// stay well inside `i64`.
    pub const MAX_AMOUNT: Money = Money(1_000_000_000_000_000);

    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use quill_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity.
    ///
    /// Saturates at the `i64` bounds instead of wrapping. Amounts on a
    /// validated invoice stay far below that; see [`Money::MAX_AMOUNT`].
    ///
    /// ## Example
    /// ```rust
    /// use quill_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(999);
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 1998);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(i64::from(qty)))
    }

    /// Formats the amount with a currency marker in front, e.g. `Rs.9.99`.
    ///
    /// The sign goes before the marker: `-Rs.5.50`.
    pub fn display_with(&self, marker: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            marker,
            self.major().abs(),
            self.minor_part()
        )
    }
}

// =============================================================================
// Rounding
// =============================================================================

/// Divides `numerator` by a positive `denominator`, rounding half to even.
///
/// ## Bankers Rounding Explained
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  BANKERS ROUNDING (Round Half to Even)                              │
/// │                                                                     │
/// │  Half-up always rounds 0.5 UP:                                      │
/// │    0.5 → 1, 1.5 → 2, 2.5 → 3, 3.5 → 4                               │
/// │                                                                     │
/// │  Half-to-even rounds 0.5 to the nearest EVEN number:                │
/// │    0.5 → 0, 1.5 → 2, 2.5 → 2, 3.5 → 4                               │
/// │                                                                     │
/// │  Non-ties round to nearest as usual. Negative values mirror:        │
/// │    -2.5 → -2, -3.5 → -4                                             │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
pub fn div_round_half_even(numerator: i128, denominator: i128) -> i128 {
    debug_assert!(denominator > 0, "denominator must be positive");

    let quotient = numerator.div_euclid(denominator);
    let twice_remainder = numerator.rem_euclid(denominator) * 2;

    if twice_remainder > denominator || (twice_remainder == denominator && quotient % 2 != 0) {
        quotient + 1
    } else {
        quotient
    }
}

// =============================================================================
// Decimal Parsing
// =============================================================================

/// Parses fixed-point decimal text with at most two fractional digits into
/// an integer scaled by 100.
///
/// `"9.99"` → 999, `"10"` → 1000, `"12.5"` → 1250, `"-3.2"` → -320.
pub(crate) fn parse_hundredths(input: &str) -> Result<i64, String> {
    let text = input.trim();
    if text.is_empty() {
        return Err("value is empty".to_string());
    }

    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (digits, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err("no digits".to_string());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err("must be a decimal number".to_string());
    }
    if fraction.len() > 2 {
        return Err("at most two decimal places are allowed".to_string());
    }

    let whole_value: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| "value is too large".to_string())?
    };
    let fraction_value: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|e| e.to_string())? * 10,
        _ => fraction.parse::<i64>().map_err(|e| e.to_string())?,
    };

    let scaled = whole_value
        .checked_mul(100)
        .and_then(|v| v.checked_add(fraction_value))
        .ok_or_else(|| "value is too large".to_string())?;

    Ok(if negative { -scaled } else { scaled })
}

/// Wire form of a decimal value: JSON string or JSON number.
///
/// Numbers go through `serde_json::Number`'s text form so `9.99` is read as
/// the digits "9.99", never as the nearest binary float times 100.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum DecimalInput {
    Text(String),
    Number(serde_json::Number),
}

impl DecimalInput {
    pub(crate) fn into_text(self) -> String {
        match self {
            DecimalInput::Text(text) => text,
            DecimalInput::Number(number) => number.to_string(),
        }
    }
}

impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hundredths(s)
            .map(Money)
            .map_err(|reason| CoreError::InvalidAmount {
                input: s.to_string(),
                reason,
            })
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = DecimalInput::deserialize(deserializer)?.into_text();
        text.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal form with exactly two places, e.g. `19.98` or `-5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

// Add and Sub saturate like multiply_quantity.

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_display_with_marker() {
        assert_eq!(Money::from_cents(18900).display_with("Rs."), "Rs.189.00");
        assert_eq!(Money::from_cents(-550).display_with("Rs."), "-Rs.5.50");
    }

    #[test]
    fn test_parse_decimal_text() {
        assert_eq!("9.99".parse::<Money>().unwrap().cents(), 999);
        assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("12.5".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!(".5".parse::<Money>().unwrap().cents(), 50);
        assert_eq!(" 7. ".parse::<Money>().unwrap().cents(), 700);
        assert_eq!("-3.20".parse::<Money>().unwrap().cents(), -320);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("".parse::<Money>().is_err());
        assert!(".".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.999".parse::<Money>().is_err());
        assert!("1,000".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_serde_accepts_numbers_and_strings() {
        let from_number: Money = serde_json::from_str("9.99").unwrap();
        let from_string: Money = serde_json::from_str("\"9.99\"").unwrap();
        let from_integer: Money = serde_json::from_str("5").unwrap();
        assert_eq!(from_number.cents(), 999);
        assert_eq!(from_string.cents(), 999);
        assert_eq!(from_integer.cents(), 500);

        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"9.99\"");
        assert!(serde_json::from_str::<Money>("1.005").is_err());
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let total: Money = vec![a, b, Money::from_cents(1)].into_iter().sum();
        assert_eq!(total.cents(), 1501);
    }

    #[test]
    fn test_multiply_quantity_is_exact() {
        // 2 × 9.99 in binary floating point is 19.979999...
        assert_eq!(Money::from_cents(999).multiply_quantity(2).cents(), 1998);
        assert_eq!(Money::from_cents(999).multiply_quantity(0).cents(), 0);
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let price: Money = "50000000000000000".parse().unwrap();
        assert_eq!(price.multiply_quantity(1000).cents(), i64::MAX);

        let total: Money = vec![Money::from_cents(i64::MAX), Money::from_cents(1)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - Money::from_cents(1)).cents(), i64::MIN);
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(div_round_half_even(5, 10), 0); // 0.5
        assert_eq!(div_round_half_even(15, 10), 2); // 1.5
        assert_eq!(div_round_half_even(25, 10), 2); // 2.5
        assert_eq!(div_round_half_even(35, 10), 4); // 3.5
        assert_eq!(div_round_half_even(26, 10), 3); // 2.6
        assert_eq!(div_round_half_even(24, 10), 2); // 2.4
        assert_eq!(div_round_half_even(-25, 10), -2);
        assert_eq!(div_round_half_even(-35, 10), -4);
        assert_eq!(div_round_half_even(-26, 10), -3);
    }
}
