//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing float prices drifts:                                           │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A cart total that drifts can flip a budget from "ok" to "warning".    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹12.50 is stored as 1250 paise. Totals are exact integer sums.     │
//! │    Rounding happens exactly once, when a price is derived from weight. │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The JSON API speaks rupees as plain numbers (`12.5`), so `Money`
//! serializes to and from a major-unit number. Conversion from a number
//! rounds half-to-even at two decimals.
//!
//! ## Range
//! Amounts built from outside input stay within `±Money::MAX`, so sums and
//! differences of a few of them never leave `i64`. Arithmetic that could
//! cross the bound (`checked_add`, `for_weight`) returns `Option`.
//!
//! ## Usage
//! ```rust
//! use smartkart_core::money::Money;
//!
//! let price = Money::from_paise(1099); // ₹10.99
//! let total = price + Money::from_paise(500);
//! assert_eq!(total.paise(), 1599);
//! assert_eq!(total.to_string(), "₹15.99");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};

use crate::weight::Weight;
use crate::CURRENCY_SYMBOL;

/// Milligrams in one kilogram, the divisor for per-kg pricing.
const MILLIGRAMS_PER_KG: i128 = 1_000_000;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in paise (1/100 of a rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: `remaining` budget can go negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Custom serde**: major units on the wire, minor units in memory
///
/// ## Where Money is Used
/// ```text
/// Product.price ──────────────┬──► CartItem.price ──► Cart.total ──► Invoice.total
///                             │
/// Product.price_per_kg × Weight
///                                   Cart.total vs budget ──► BudgetReport
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude accepted from the wire or produced by pricing:
    /// ₹10,000,000,000,000.00.
    pub const MAX: Money = Money(1_000_000_000_000_000);

    /// Creates a Money value from paise (the smallest currency unit).
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from rupees and paise.
    ///
    /// ## Example
    /// ```rust
    /// use smartkart_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).paise(), 1099);
    /// assert_eq!(Money::from_major_minor(-5, 50).paise(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Converts a decimal rupee amount (as it arrives in JSON) to Money.
    ///
    /// Rounds half-to-even at two decimals. Returns `None` for NaN and
    /// infinities, and for amounts beyond `±Money::MAX`.
    ///
    /// ## Example
    /// ```rust
    /// use smartkart_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_f64(49.99), Some(Money::from_paise(4999)));
    /// assert_eq!(Money::from_major_f64(f64::NAN), None);
    /// assert_eq!(Money::from_major_f64(-92_233_720_368_547_758.08), None);
    /// ```
    pub fn from_major_f64(rupees: f64) -> Option<Self> {
        if !rupees.is_finite() {
            return None;
        }
        let paise = (rupees * 100.0).round_ties_even();
        let limit = Money::MAX.0 as f64;
        if paise < -limit || paise > limit {
            return None;
        }
        Some(Money(paise as i64))
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the amount in rupees as a float, for the wire and for ratios.
    #[inline]
    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value, saturating at `i64::MAX` paise.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Adds two amounts, or `None` if the sum leaves `±Money::MAX`.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .filter(Money::within_limit)
    }

    /// Subtracts, clamping at the ends of `i64` instead of wrapping.
    #[inline]
    pub const fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }

    #[inline]
    fn within_limit(&self) -> bool {
        self.0.unsigned_abs() <= Money::MAX.0.unsigned_abs()
    }

    /// Prices a measured weight at this per-kilogram rate.
    ///
    /// ## Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  BANKERS ROUNDING (Round Half to Even)                              │
    /// │                                                                     │
    /// │  price = milligrams × paise_per_kg / 1,000,000                      │
    /// │                                                                     │
    /// │  The division is exact integer math on i128. A remainder of        │
    /// │  exactly one half rounds to the nearest EVEN paisa:                 │
    /// │    0.5 → 0, 1.5 → 2, 2.5 → 2, 1249.75 → 1250                        │
    /// │                                                                     │
    /// │  This is exact decimal half-to-even rounding of                     │
    /// │  (grams / 1000) × price_per_kg to two places; no binary float       │
    /// │  representation error is involved.                                  │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use smartkart_core::{Money, Weight};
    ///
    /// let per_kg = Money::from_paise(4999); // ₹49.99/kg
    /// let price = per_kg.for_weight(Weight::from_grams(250)).unwrap();
    /// assert_eq!(price.paise(), 1250); // ₹12.4975 → ₹12.50
    /// ```
    ///
    /// Returns `None` when the price would exceed `±Money::MAX`.
    pub fn for_weight(&self, weight: Weight) -> Option<Money> {
        let numerator = self.0 as i128 * weight.milligrams() as i128;
        let paise = div_round_half_even(numerator, MILLIGRAMS_PER_KG);
        i64::try_from(paise)
            .ok()
            .map(Money)
            .filter(Money::within_limit)
    }
}

/// Integer division rounding to the nearest integer, ties to even.
///
/// `den` must be positive.
fn div_round_half_even(num: i128, den: i128) -> i128 {
    let quotient = num.div_euclid(den);
    let remainder = num.rem_euclid(den);
    let twice = remainder * 2;

    if twice > den || (twice == den && quotient % 2 != 0) {
        quotient + 1
    } else {
        quotient
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders money the way it appears in user-facing messages: `₹10.99`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            CURRENCY_SYMBOL,
            self.rupees().abs(),
            self.paise_part()
        )
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rupees = f64::deserialize(deserializer)?;
        Money::from_major_f64(rupees)
            .ok_or_else(|| serde::de::Error::custom("amount is not a finite number within range"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(1099);
        assert_eq!(money.paise(), 1099);
        assert_eq!(money.rupees(), 10);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_from_major_f64_rounds_to_paise() {
        assert_eq!(Money::from_major_f64(50.0), Some(Money::from_paise(5000)));
        assert_eq!(Money::from_major_f64(12.5), Some(Money::from_paise(1250)));
        assert_eq!(Money::from_major_f64(-3.2), Some(Money::from_paise(-320)));
        assert_eq!(Money::from_major_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_paise(1099).to_string(), "₹10.99");
        assert_eq!(Money::from_paise(500).to_string(), "₹5.00");
        assert_eq!(Money::from_paise(-550).to_string(), "-₹5.50");
        assert_eq!(Money::zero().to_string(), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((b - a).paise(), -500);
        assert_eq!(a.checked_add(b), Some(Money::from_paise(1500)));
    }

    #[test]
    fn test_limits_are_enforced() {
        assert_eq!(Money::MAX.checked_add(Money::from_paise(1)), None);
        assert_eq!(
            Money::MAX.checked_add(Money::from_paise(-1)),
            Some(Money::from_paise(Money::MAX.paise() - 1))
        );
        assert_eq!(Money::from_paise(i64::MAX).checked_add(Money::from_paise(1)), None);

        assert_eq!(Money::from_major_f64(10_000_000_000_000.0), Some(Money::MAX));
        assert_eq!(Money::from_major_f64(10_000_000_000_000.01), None);
        assert_eq!(Money::from_major_f64(-92_233_720_368_547_758.08), None);

        assert_eq!(Money::from_paise(i64::MIN).abs(), Money::from_paise(i64::MAX));
        assert_eq!(
            Money::from_paise(i64::MIN).saturating_sub(Money::from_paise(1)),
            Money::from_paise(i64::MIN)
        );

        assert!(serde_json::from_str::<Money>("1e300").is_err());
    }

    #[test]
    fn test_for_weight_exact() {
        // 500g at ₹120.00/kg = ₹60.00
        let per_kg = Money::from_paise(12000);
        assert_eq!(per_kg.for_weight(Weight::from_grams(500)), Some(Money::from_paise(6000)));
    }

    #[test]
    fn test_for_weight_out_of_range() {
        assert_eq!(Money::MAX.for_weight(Weight::MAX), None);

        // ₹300000/kg at 1e15 g wraps negative if truncated to i64
        let per_kg = Money::from_paise(30_000_000);
        assert_eq!(per_kg.for_weight(Weight::from_grams(1_000_000_000_000_000)), None);

        let per_kg = Money::from_paise(i64::MAX);
        assert_eq!(per_kg.for_weight(Weight::from_milligrams(i64::MAX)), None);
    }

    #[test]
    fn test_for_weight_rounds_half_to_even() {
        let one_paisa_per_kg = Money::from_paise(1);
        // 0.5 paise → 0
        assert_eq!(one_paisa_per_kg.for_weight(Weight::from_grams(500)), Some(Money::from_paise(0)));
        // 1.5 paise → 2
        assert_eq!(one_paisa_per_kg.for_weight(Weight::from_grams(1500)), Some(Money::from_paise(2)));
        // 2.5 paise → 2
        assert_eq!(one_paisa_per_kg.for_weight(Weight::from_grams(2500)), Some(Money::from_paise(2)));
        // 2.6 paise → 3
        assert_eq!(one_paisa_per_kg.for_weight(Weight::from_grams(2600)), Some(Money::from_paise(3)));
    }

    #[test]
    fn test_for_weight_fractional_grams() {
        // 333.3g at ₹90.00/kg = ₹29.997 → ₹30.00
        let per_kg = Money::from_paise(9000);
        let weight = Weight::from_milligrams(333_300);
        assert_eq!(per_kg.for_weight(weight), Some(Money::from_paise(3000)));
    }

    #[test]
    fn test_serde_uses_major_units() {
        let json = serde_json::to_string(&Money::from_paise(1250)).unwrap();
        assert_eq!(json, "12.5");

        let parsed: Money = serde_json::from_str("49.99").unwrap();
        assert_eq!(parsed.paise(), 4999);

        let whole: Money = serde_json::from_str("50").unwrap();
        assert_eq!(whole.paise(), 5000);
    }

    #[test]
    fn test_zero_and_checks() {
        assert_eq!(Money::zero().paise(), 0);
        assert!(Money::from_paise(100).is_positive());
        assert!(Money::from_paise(-100).is_negative());
        assert_eq!(Money::from_paise(-100).abs().paise(), 100);
    }
}
