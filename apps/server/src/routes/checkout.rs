//! Checkout and invoice endpoints.

use axum::extract::State;
use axum::{Extension, Json};
use chrono::Utc;
use serde::Serialize;
use smartkart_core::{CoreError, Invoice};
use tracing::info;

use crate::error::ApiError;
use crate::session::SessionId;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub success: bool,
    pub invoice: Invoice,
}

/// `POST /api/checkout`
///
/// Snapshot and cart reset happen under one session lock. A session that
/// was never created has nothing to check out.
pub async fn checkout(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let handle = state
        .existing_session(&session_id)
        .ok_or(CoreError::EmptyCart)?;
    let mut session = handle.lock().await;
    let invoice = session.checkout(Utc::now())?.clone();

    info!(
        session = %session_id,
        invoice = %invoice.invoice_number,
        items = invoice.item_count,
        total = %invoice.total,
        "Checkout complete"
    );

    Ok(Json(InvoiceResponse {
        success: true,
        invoice,
    }))
}

/// `GET /api/invoice`: the most recent invoice of this session.
pub async fn get_last_invoice(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let handle = state
        .existing_session(&session_id)
        .ok_or(CoreError::InvoiceNotFound)?;
    let invoice = handle.lock().await.last_invoice()?.clone();

    Ok(Json(InvoiceResponse {
        success: true,
        invoice,
    }))
}
