//! Budget endpoint.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;
use smartkart_core::{BudgetReport, Money, Session, ValidationError};
use tracing::debug;

use crate::error::{ApiError, ApiJson};
use crate::session::SessionId;
use crate::state::AppState;

/// Body of `POST /api/budget/check`. A missing budget counts as zero.
#[derive(Debug, Deserialize)]
pub struct BudgetRequest {
    #[serde(default)]
    pub budget: f64,
}

/// `POST /api/budget/check`
pub async fn check_budget(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    ApiJson(request): ApiJson<BudgetRequest>,
) -> Result<Json<BudgetReport>, ApiError> {
    let budget = Money::from_major_f64(request.budget).ok_or_else(|| ValidationError::InvalidFormat {
        field: "budget".to_string(),
        reason: format!("must be a finite amount within ±{}", Money::MAX),
    })?;

    let report = match state.existing_session(&session_id) {
        Some(handle) => handle.lock().await.budget_report(budget),
        None => Session::new().budget_report(budget),
    };
    debug!(session = %session_id, status = ?report.status, "Budget checked");

    Ok(Json(report))
}
