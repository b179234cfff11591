//! # Cart Endpoints
//!
//! ## Add Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  {product_id, measured_weight}                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  validate_scan ──────── missing / non-numeric ──► 400 VALIDATION_ERROR  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  catalog lookup ─────── unknown id ─────────────► 404 NOT_FOUND         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  WeightValidator ────── bad reading ────────────► 400                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  lock session ──► cart.add ── total out of range ► 400 VALIDATION_ERROR │
//! │                      │                                                  │
//! │                      └──► 200 {success, message, item, cart}            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing touches the cart until the line has been fully validated, so a
//! rejected scan leaves the cart exactly as it was.
//!
//! Only a successful add creates a session. The other cart endpoints treat an
//! unknown session as an empty cart.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use smartkart_core::{validate_scan, Cart, CartItem, CartSummary, CoreError};
use tracing::{debug, warn};

use crate::error::{ApiError, ApiJson};
use crate::session::SessionId;
use crate::state::AppState;

/// Body of `POST /api/cart/add`.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub measured_weight: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct AddToCartResponse {
    pub success: bool,
    pub message: String,
    pub item: CartItem,
    pub cart: Vec<CartItem>,
}

#[derive(Debug, Serialize)]
pub struct RemoveFromCartResponse {
    pub success: bool,
    pub message: String,
    pub cart: Vec<CartItem>,
}

#[derive(Debug, Serialize)]
pub struct ClearCartResponse {
    pub success: bool,
    pub message: String,
}

/// `POST /api/cart/add`
pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    ApiJson(request): ApiJson<AddToCartRequest>,
) -> Result<Json<AddToCartResponse>, ApiError> {
    let (product_id, measured) =
        validate_scan(request.product_id.as_deref(), request.measured_weight)?;
    debug!(session = %session_id, %product_id, measured = %measured, "Scan received");

    let product = state
        .catalog
        .product(&product_id)
        .ok_or_else(|| CoreError::ProductNotFound(product_id.clone()))?;

    let item = state
        .validator
        .validate(product, measured, Utc::now())
        .inspect_err(|e| warn!(session = %session_id, %product_id, error = %e, "Scan rejected"))?;

    let handle = state.session(&session_id);
    let mut session = handle.lock().await;
    session.cart.add(item.clone())?;

    Ok(Json(AddToCartResponse {
        success: true,
        message: format!("{} added to cart successfully!", item.name),
        item,
        cart: session.cart.items().to_vec(),
    }))
}

/// `GET /api/cart`
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Json<CartSummary> {
    match state.existing_session(&session_id) {
        Some(handle) => Json(handle.lock().await.cart.summary()),
        None => Json(Cart::new().summary()),
    }
}

/// `DELETE /api/cart/remove/{index}`
///
/// An index that is negative, past the end, or not an integer at all is
/// reported as an invalid cart index.
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    index: Result<Path<i64>, PathRejection>,
) -> Result<Json<RemoveFromCartResponse>, ApiError> {
    let handle = state.existing_session(&session_id);
    let mut session = match &handle {
        Some(handle) => Some(handle.lock().await),
        None => None,
    };
    let len = session.as_ref().map_or(0, |s| s.cart.item_count());

    let index = match index {
        Ok(Path(index)) => index,
        Err(rejection) => {
            debug!(session = %session_id, error = %rejection.body_text(), "Unparseable cart index");
            return Err(CoreError::IndexOutOfRange { index: -1, len }.into());
        }
    };
    debug!(session = %session_id, index, "Removing cart line");

    let Some(session) = session.as_mut() else {
        return Err(CoreError::IndexOutOfRange { index, len }.into());
    };

    let position = usize::try_from(index).map_err(|_| CoreError::IndexOutOfRange { index, len })?;
    let removed = session.cart.remove_at(position)?;

    Ok(Json(RemoveFromCartResponse {
        success: true,
        message: format!("{} removed from cart", removed.name),
        cart: session.cart.items().to_vec(),
    }))
}

/// `DELETE /api/cart/clear`
pub async fn clear_cart(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Json<ClearCartResponse> {
    if let Some(handle) = state.existing_session(&session_id) {
        handle.lock().await.cart.clear();
        debug!(session = %session_id, "Cart cleared");
    }

    Json(ClearCartResponse {
        success: true,
        message: "Cart cleared".to_string(),
    })
}
