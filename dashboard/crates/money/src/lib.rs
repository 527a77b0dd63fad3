//! Decimal-safe currency amounts for the Servio service-center dashboard.
//!
//! Amounts are held as [`rust_decimal::Decimal`] values so that totals built
//! from many additions never pick up binary floating-point drift. Every amount
//! renders with exactly two fractional digits, rounding half away from zero.
//!
//! # Example
//!
//! ```
//! use money::Money;
//!
//! let total: Money = ["150", "80", "50"]
//!     .into_iter()
//!     .map(|raw| raw.parse::<Money>().expect("valid amount"))
//!     .sum();
//!
//! assert_eq!(total.to_string(), "280.00");
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Number of fractional digits used when presenting an amount.
pub const DISPLAY_SCALE: u32 = 2;

/// Error returned when text cannot be read as a currency amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid currency amount '{input}': {message}")]
pub struct MoneyParseError {
    /// The rejected input, as supplied.
    pub input: String,
    /// Description of the parse failure.
    pub message: String,
}

/// A currency amount.
///
/// ## Invariants
/// - Arithmetic is exact decimal arithmetic; rounding only happens when the
///   amount is displayed or explicitly [`rounded`](Money::rounded).
/// - Arithmetic never panics: results beyond the decimal range saturate at
///   the largest representable amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Build an amount from minor units (cents).
    ///
    /// ```
    /// use money::Money;
    ///
    /// assert_eq!(Money::from_minor(1599).to_string(), "15.99");
    /// ```
    pub fn from_minor(minor: i64) -> Self {
        Self(Decimal::new(minor, DISPLAY_SCALE))
    }

    /// Wrap an existing decimal value.
    pub const fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    /// Borrow the underlying decimal value.
    pub const fn as_decimal(self) -> Decimal {
        self.0
    }

    /// Whether the amount is strictly below zero.
    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiply a unit price by a quantity.
    ///
    /// ```
    /// use money::Money;
    ///
    /// let price: Money = "15.99".parse().expect("valid amount");
    /// assert_eq!(price.times(3).to_string(), "47.97");
    /// ```
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Round to the display scale, half away from zero.
    pub fn rounded(self) -> Self {
        let mut value = self
            .0
            .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(DISPLAY_SCALE);
        Self(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded().0;
        if rounded.is_zero() {
            return f.write_str("0.00");
        }
        write!(f, "{rounded}")
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();
        if digits.is_empty() {
            return Err(MoneyParseError {
                input: raw.to_owned(),
                message: "amount must not be empty".to_owned(),
            });
        }
        Decimal::from_str(digits)
            .or_else(|_| Decimal::from_scientific(digits))
            .map(Self)
            .map_err(|error| MoneyParseError {
                input: raw.to_owned(),
                message: error.to_string(),
            })
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Wire shapes accepted for an amount: a JSON number or decimal text.
#[derive(Deserialize)]
#[serde(untagged)]
enum MoneyRepr {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = match MoneyRepr::deserialize(deserializer)? {
            MoneyRepr::Number(number) => number.to_string(),
            MoneyRepr::Text(text) => text,
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}
