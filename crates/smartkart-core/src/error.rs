//! # Error Types
//!
//! Domain-specific error types for smartkart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  smartkart-core errors (this file)                                     │
//! │  ├── CoreError        - Expected checkout outcomes                     │
//! │  └── ValidationError  - Malformed request fields / catalog records     │
//! │                                                                         │
//! │  smartkart-store errors (separate crate)                               │
//! │  └── StoreError       - Catalog loading failures                       │
//! │                                                                         │
//! │  Server errors (in app)                                                │
//! │  └── ApiError         - What the client sees (JSON + status)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Client                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is a recoverable outcome the shopper can act on. None of
//! them is a fault, and none is worth retrying.

use thiserror::Error;

use crate::money::Money;
use crate::weight::Weight;

// =============================================================================
// Core Error
// =============================================================================

/// Outcomes of the scan → cart → checkout pipeline that are not a success.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// No product with this id in the catalog.
    #[error("Product not found")]
    ProductNotFound(String),

    /// A variable-weight item was weighed at zero or less.
    #[error("Please enter a valid weight for this item.")]
    InvalidWeight { measured: Weight },

    /// A fixed-weight item's reading is outside the tolerance.
    ///
    /// ## User Workflow
    /// ```text
    /// Scan "Butter 500g", scale reads 600g
    ///      │
    ///      ▼
    /// |600 - 500| = 100 > 50
    ///      │
    ///      ▼
    /// WeightMismatch { expected: 500g, measured: 600g, difference: 100g }
    ///      │
    ///      ▼
    /// Client shows the exact discrepancy and asks for a re-weigh
    /// ```
    #[error(
        "Weight mismatch! Expected: {expected}g, Measured: {measured}g. \
         Difference ({difference}g) exceeds tolerance of ±{tolerance}g."
    )]
    WeightMismatch {
        expected: Weight,
        measured: Weight,
        difference: Weight,
        tolerance: Weight,
    },

    /// Cart removal index outside `[0, len)`.
    #[error("Invalid cart index")]
    IndexOutOfRange { index: i64, len: usize },

    /// Adding the line would push the cart total past the money range.
    #[error("Cart total cannot exceed {limit}")]
    CartLimitExceeded { limit: Money },

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The session has not checked out yet.
    #[error("No recent invoice found")]
    InvoiceNotFound,

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any business logic runs, both for request bodies and for
/// catalog records that do not describe a coherent product.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A scan request without a product id or a weight.
    #[error("Product ID and measured weight are required")]
    ScanIncomplete,

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g. a non-finite number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_mismatch_message() {
        let err = CoreError::WeightMismatch {
            expected: Weight::from_grams(500),
            measured: Weight::from_grams(600),
            difference: Weight::from_grams(100),
            tolerance: Weight::from_grams(50),
        };
        assert_eq!(
            err.to_string(),
            "Weight mismatch! Expected: 500g, Measured: 600g. \
             Difference (100g) exceeds tolerance of ±50g."
        );
    }

    #[test]
    fn test_cart_limit_message() {
        let err = CoreError::CartLimitExceeded { limit: Money::MAX };
        assert_eq!(err.to_string(), "Cart total cannot exceed ₹10000000000000.00");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::ScanIncomplete.to_string(),
            "Product ID and measured weight are required"
        );
        let err = ValidationError::Required {
            field: "product_id".to_string(),
        };
        assert_eq!(err.to_string(), "product_id is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::ScanIncomplete.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Product ID and measured weight are required");
    }
}
