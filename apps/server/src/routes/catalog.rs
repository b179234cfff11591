//! Catalog endpoints.

use axum::extract::{Path, State};
use axum::Json;
use smartkart_core::{CoreError, Product};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/products`: every product in catalog order.
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog.all_products().to_vec())
}

/// `GET /api/categories`: distinct categories, sorted.
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.categories())
}

/// `GET /api/product/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    debug!(%product_id, "Product lookup");

    state
        .catalog
        .product(&product_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| CoreError::ProductNotFound(product_id).into())
}
