//! # Money Module
//!
//! Listing prices live in integer cents (`priceCents`, `shippingCostCents`,
//! `amountTotalCents`). The only place dollars appear is user input
//! ("12.50" typed into a price field) and the legacy `Product.price` field.
//!
//! ```text
//! "12.5" ──parse_input──► Money(1250) ──► Inventory.price_cents
//!                               │
//!                               └──to_major_units──► Product.price = 12.5
//! ```
//!
//! ## Usage
//! ```rust
//! use microshop_core::money::Money;
//!
//! let price = Money::from_cents(2500);
//! assert_eq!(price.to_string(), "$25.00");
//! assert_eq!(price.platform_fee().cents(), 125);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::PLATFORM_FEE_BPS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Parses a price typed by the user, in major units.
    ///
    /// Rounds to the nearest cent. Returns `None` for blank, non-numeric,
    /// non-finite or out-of-`i64` input; sign is not checked here.
    ///
    /// ## Example
    /// ```rust
    /// use microshop_core::money::Money;
    ///
    /// assert_eq!(Money::parse_input(" 19.99 ").unwrap().cents(), 1999);
    /// assert_eq!(Money::parse_input("0.125").unwrap().cents(), 13);
    /// assert!(Money::parse_input("abc").is_none());
    /// assert!(Money::parse_input("1e300").is_none());
    /// ```
    pub fn parse_input(input: &str) -> Option<Money> {
        let value: f64 = input.trim().parse().ok()?;
        let cents = (value * 100.0).round();
        // `as` saturates, so anything at or past 2^63 is rejected up front.
        if !cents.is_finite() || cents.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Converts a major-unit float (legacy `Product.price`) to cents.
    pub fn from_major_units(amount: f64) -> Money {
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in major units, for the legacy product shape.
    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Takes `bps` basis points of this amount, rounding half up.
    ///
    /// ## Example
    /// ```rust
    /// use microshop_core::money::Money;
    ///
    /// // 5% of $10.10 = 50.5 cents → 51
    /// assert_eq!(Money::from_cents(1010).percentage_of(500).cents(), 51);
    /// ```
    pub fn percentage_of(&self, bps: u32) -> Money {
        let cents = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money(cents as i64)
    }

    /// The marketplace's cut of a sale of this amount.
    pub fn platform_fee(&self) -> Money {
        self.percentage_of(PLATFORM_FEE_BPS)
    }

    /// Multiplies by a quantity; `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts; `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(Money::parse_input("25").map(|m| m.cents()), Some(2500));
        assert_eq!(Money::parse_input("0.1").map(|m| m.cents()), Some(10));
        assert_eq!(Money::parse_input("-3").map(|m| m.cents()), Some(-300));
        assert!(Money::parse_input("").is_none());
        assert!(Money::parse_input("   ").is_none());
        assert!(Money::parse_input("twelve").is_none());
        assert!(Money::parse_input("inf").is_none());
        assert!(Money::parse_input("NaN").is_none());
    }

    #[test]
    fn test_parse_input_rejects_values_past_i64() {
        assert!(Money::parse_input("1e300").is_none());
        assert!(Money::parse_input("-1e300").is_none());
        assert!(Money::parse_input("92233720368547758.08").is_none());
        assert_eq!(
            Money::parse_input("999999.99").map(|m| m.cents()),
            Some(99_999_999)
        );
    }

    #[test]
    fn test_checked_arithmetic_overflow() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.checked_multiply_quantity(2), None);
        assert_eq!(Money::from_cents(1000).checked_multiply_quantity(i64::MAX / 10), None);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
    }

    #[test]
    fn test_major_units_round_trip_for_legacy_price() {
        let price = Money::from_cents(1999);
        assert!((price.to_major_units() - 19.99).abs() < f64::EPSILON);
        assert_eq!(Money::from_major_units(19.99), price);
    }

    #[test]
    fn test_platform_fee() {
        assert_eq!(Money::from_cents(10000).platform_fee().cents(), 500);
        assert_eq!(Money::from_cents(999).platform_fee().cents(), 50);
        assert_eq!(Money::zero().platform_fee().cents(), 0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);
        assert_eq!((a + b).cents(), 1250);
        assert_eq!((a - b).cents(), 750);
        assert_eq!((b * 3).cents(), 750);
        assert_eq!(b.checked_multiply_quantity(4), Some(Money::from_cents(1000)));
        assert_eq!(a.checked_add(b), Some(Money::from_cents(1250)));

        let mut total = Money::zero();
        total += a;
        assert_eq!(total, a);
    }
}
