//! # Validation Module
//!
//! Turns a scanned product plus a scale reading into a cart line, or into a
//! precise reason why it cannot be accepted.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Scan Pipeline                                      │
//! │                                                                         │
//! │  Layer 1: Request fields                                               │
//! │  └── validate_scan(): product id present, weight present and finite    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog lookup (caller)                                      │
//! │  └── unknown id → ProductNotFound                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: WeightValidator::validate()                                  │
//! │  ├── Variable: weight > 0, price = weight × price_per_kg              │
//! │  └── Fixed:    |measured - expected| <= tolerance, catalog price       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use chrono::Utc;
//! use smartkart_core::{CoreError, Money, Product, Weight, WeightValidator};
//!
//! let butter = Product::fixed_weight(
//!     "A1", "Butter", "Dairy", "Aisle 2",
//!     Money::from_paise(5000), Weight::from_grams(500),
//! );
//! let validator = WeightValidator::default();
//!
//! let item = validator.validate(&butter, Weight::from_grams(540), Utc::now()).unwrap();
//! assert_eq!(item.price, Money::from_paise(5000));
//!
//! let err = validator.validate(&butter, Weight::from_grams(600), Utc::now()).unwrap_err();
//! assert!(matches!(err, CoreError::WeightMismatch { .. }));
//! ```

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{CartItem, LineKind, Pricing, Product};
use crate::weight::Weight;
use crate::WEIGHT_TOLERANCE_GRAMS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Request Field Validators
// =============================================================================

/// Validates the fields of a scan request.
///
/// ## Rules
/// - Product id must be present and not blank
/// - Measured weight must be present
/// - Measured weight must be a finite number (any sign: the sign is judged
///   later, per pricing mode)
///
/// ## Returns
/// The trimmed product id and the weight.
pub fn validate_scan(
    product_id: Option<&str>,
    measured_weight: Option<f64>,
) -> ValidationResult<(String, Weight)> {
    let product_id = product_id.map(str::trim).unwrap_or_default();

    let measured_weight = match measured_weight {
        Some(grams) if !product_id.is_empty() => grams,
        _ => return Err(ValidationError::ScanIncomplete),
    };

    let weight =
        Weight::from_grams_f64(measured_weight).ok_or_else(|| ValidationError::InvalidFormat {
            field: "measured_weight".to_string(),
            reason: format!("must be a finite number of grams within ±{}", Weight::MAX),
        })?;

    Ok((product_id.to_string(), weight))
}

// =============================================================================
// Weight Validator
// =============================================================================

/// Classifies a scale reading for a product and, on success, builds the
/// cart line.
///
/// Pure: the result depends only on the product, the reading, the
/// tolerance and the timestamp handed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightValidator {
    tolerance: Weight,
}

impl Default for WeightValidator {
    fn default() -> Self {
        WeightValidator::new(Weight::from_grams(WEIGHT_TOLERANCE_GRAMS))
    }
}

impl WeightValidator {
    pub fn new(tolerance: Weight) -> Self {
        WeightValidator { tolerance }
    }

    /// Validates `measured` against `product` and builds the cart line.
    ///
    /// ## Behavior
    /// - **Variable weight**: `measured <= 0` fails with
    ///   [`CoreError::InvalidWeight`]; otherwise the price is
    ///   `price_per_kg × measured` rounded half-to-even to the paisa. A
    ///   reading whose price would leave the money range is also an
    ///   invalid weight.
    /// - **Fixed weight**: a deviation above the tolerance fails with
    ///   [`CoreError::WeightMismatch`] carrying expected, measured and the
    ///   exact difference; a deviation equal to the tolerance is accepted.
    ///   The catalog price is used unchanged.
    ///
    /// The comparison is on the milligram-quantized reading held in
    /// [`Weight`]: a raw 550.0004 g arrives here as 550 g and is within a
    /// 50 g tolerance of 500 g, while 550.001 g is not.
    pub fn validate(
        &self,
        product: &Product,
        measured: Weight,
        added_at: DateTime<Utc>,
    ) -> CoreResult<CartItem> {
        let (price, kind) = match product.pricing {
            Pricing::Variable { price_per_kg } => {
                let price = price_per_kg
                    .for_weight(measured)
                    .filter(|_| measured.is_positive())
                    .ok_or(CoreError::InvalidWeight { measured })?;
                (price, LineKind::Variable { price_per_kg })
            }
            Pricing::Fixed {
                price,
                expected_weight,
            } => {
                let difference = measured.abs_diff(expected_weight);
                if difference > self.tolerance {
                    return Err(CoreError::WeightMismatch {
                        expected: expected_weight,
                        measured,
                        difference,
                        tolerance: self.tolerance,
                    });
                }
                (price, LineKind::Fixed { expected_weight })
            }
        };

        Ok(CartItem {
            product_id: product.product_id.clone(),
            name: product.name.clone(),
            price,
            category: product.category.clone(),
            aisle: product.aisle.clone(),
            measured_weight: measured,
            kind,
            added_at,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
