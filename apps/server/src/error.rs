//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in SmartKart                              │
//! │                                                                         │
//! │  Handler: Result<Json<T>, ApiError>                                     │
//! │         │                                                               │
//! │         ├── Malformed body ─── JsonRejection ──────────┐                │
//! │         │                                              ▼                │
//! │         ├── Domain outcome ─── CoreError ──────────► ApiError ──► HTTP  │
//! │         │                                                               │
//! │         └── Success ─────────────────────────────────────────► 200      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Response Body
//! ```json
//! {
//!   "success": false,
//!   "error": "Weight mismatch! Expected: 500g, Measured: 600g. ...",
//!   "code": "WEIGHT_MISMATCH",
//!   "expected_weight": 500.0,
//!   "measured_weight": 600.0,
//!   "difference": 100.0
//! }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use smartkart_core::{CoreError, ValidationError};

/// API error returned from handlers.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Extra fields merged into the response body
    detail: Map<String, Value>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or invoice not found (404)
    NotFound,

    /// Missing/malformed input or an invalid weight (400)
    ValidationError,

    /// Fixed-weight reading outside tolerance (400)
    WeightMismatch,

    /// Cart removal index out of range (400)
    InvalidCartIndex,

    /// Checkout with an empty cart (400)
    EmptyCart,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError
            | ErrorCode::WeightMismatch
            | ErrorCode::InvalidCartIndex
            | ErrorCode::EmptyCart => StatusCode::BAD_REQUEST,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            detail: Map::new(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Adds a field to the response body.
    pub fn with_detail(mut self, key: &str, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.detail.insert(key.to_string(), value);
            }
            Err(e) => tracing::warn!(key, error = %e, "Dropping unserializable error detail"),
        }
        self
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::ProductNotFound(_) | CoreError::InvoiceNotFound => {
                ApiError::new(ErrorCode::NotFound, message)
            }
            CoreError::InvalidWeight { .. }
            | CoreError::CartLimitExceeded { .. }
            | CoreError::Validation(_) => ApiError::validation(message),
            CoreError::WeightMismatch {
                expected,
                measured,
                difference,
                ..
            } => ApiError::new(ErrorCode::WeightMismatch, message)
                .with_detail("expected_weight", expected)
                .with_detail("measured_weight", measured)
                .with_detail("difference", difference),
            CoreError::IndexOutOfRange { .. } => {
                ApiError::new(ErrorCode::InvalidCartIndex, message)
            }
            CoreError::EmptyCart => ApiError::new(ErrorCode::EmptyCart, message),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        CoreError::from(err).into()
    }
}

/// Malformed or missing JSON bodies are input errors, whatever the cause.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = Map::new();
        body.insert("success".to_string(), Value::Bool(false));
        body.insert("error".to_string(), Value::String(self.message));
        body.insert("code".to_string(), json!(self.code));
        body.extend(self.detail);

        (self.code.status(), Json(Value::Object(body))).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// JSON Body Extractor
// =============================================================================

/// `Json<T>` whose rejection is an [`ApiError`], so a bad body gets the same
/// `{success: false, error}` shape as every other failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartkart_core::{Money, Weight};

    #[test]
    fn test_core_error_mapping() {
        let err = ApiError::from(CoreError::ProductNotFound("X".to_string()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Product not found");

        let err = ApiError::from(CoreError::EmptyCart);
        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(CoreError::IndexOutOfRange { index: 5, len: 1 });
        assert_eq!(err.message, "Invalid cart index");

        let err = ApiError::from(ValidationError::ScanIncomplete);
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = ApiError::from(CoreError::CartLimitExceeded { limit: Money::MAX });
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Cart total cannot exceed ₹10000000000000.00");
    }

    #[test]
    fn test_weight_mismatch_carries_detail() {
        let err = ApiError::from(CoreError::WeightMismatch {
            expected: Weight::from_grams(500),
            measured: Weight::from_grams(600),
            difference: Weight::from_grams(100),
            tolerance: Weight::from_grams(50),
        });
        assert_eq!(err.detail["difference"], json!(100.0));
        assert_eq!(err.detail["expected_weight"], json!(500.0));
        assert_eq!(err.detail["measured_weight"], json!(600.0));
    }
}
