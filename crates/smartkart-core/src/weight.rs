//! # Weight Module
//!
//! The `Weight` type: a scale reading or an expected product weight.
//!
//! Weights live in memory as whole milligrams so that tolerance checks and
//! price-by-weight are exact integer math, the same trick `Money` plays with
//! paise. On the wire (and in the catalog file) a weight is a number of
//! grams, possibly fractional.
//!
//! Readings are quantized to the milligram on the way in. Anything beyond
//! `±Weight::MAX` (a million kilograms) is rejected rather than stored.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const MILLIGRAMS_PER_GRAM: i64 = 1_000;

/// A weight in milligrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Weight(i64);

impl Weight {
    /// Largest magnitude accepted from the wire: 1,000,000 kg.
    pub const MAX: Weight = Weight(1_000_000_000_000);

    /// Creates a weight from whole grams.
    #[inline]
    pub const fn from_grams(grams: i64) -> Self {
        Weight(grams * MILLIGRAMS_PER_GRAM)
    }

    #[inline]
    pub const fn from_milligrams(milligrams: i64) -> Self {
        Weight(milligrams)
    }

    /// Converts a gram reading (as it arrives in JSON) to a Weight.
    ///
    /// Rounds half-to-even to the milligram, so `550.0004` becomes exactly
    /// `550`. Returns `None` for NaN, infinities and readings beyond
    /// `±Weight::MAX`.
    ///
    /// ## Example
    /// ```rust
    /// use smartkart_core::Weight;
    ///
    /// assert_eq!(Weight::from_grams_f64(540.0), Some(Weight::from_grams(540)));
    /// assert_eq!(Weight::from_grams_f64(0.25), Some(Weight::from_milligrams(250)));
    /// assert_eq!(Weight::from_grams_f64(f64::NAN), None);
    /// ```
    pub fn from_grams_f64(grams: f64) -> Option<Self> {
        if !grams.is_finite() {
            return None;
        }
        let milligrams = (grams * MILLIGRAMS_PER_GRAM as f64).round_ties_even();
        let limit = Weight::MAX.0 as f64;
        if milligrams < -limit || milligrams > limit {
            return None;
        }
        Some(Weight(milligrams as i64))
    }

    #[inline]
    pub const fn milligrams(&self) -> i64 {
        self.0
    }

    /// Returns the weight in grams as a float, for the wire.
    #[inline]
    pub fn to_grams_f64(&self) -> f64 {
        self.0 as f64 / MILLIGRAMS_PER_GRAM as f64
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Absolute difference between two weights, saturating at `i64::MAX`
    /// milligrams.
    #[inline]
    pub fn abs_diff(&self, other: Weight) -> Weight {
        Weight(i64::try_from(self.0.abs_diff(other.0)).unwrap_or(i64::MAX))
    }
}

/// Renders grams without trailing zeros: `500`, `512.5`, `0.125`.
impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let whole = magnitude / MILLIGRAMS_PER_GRAM as u64;
        let fraction = magnitude % MILLIGRAMS_PER_GRAM as u64;

        if fraction == 0 {
            write!(f, "{}{}", sign, whole)
        } else {
            let digits = format!("{:03}", fraction);
            write!(f, "{}{}.{}", sign, whole, digits.trim_end_matches('0'))
        }
    }
}

impl Serialize for Weight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_grams_f64())
    }
}

impl<'de> Deserialize<'de> for Weight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let grams = f64::deserialize(deserializer)?;
        Weight::from_grams_f64(grams)
            .ok_or_else(|| serde::de::Error::custom("weight is not a finite number within range"))
    }
}
