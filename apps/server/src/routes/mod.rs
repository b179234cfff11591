//! # HTTP Routes
//!
//! ```text
//! GET    /api/products              catalog::list_products
//! GET    /api/categories            catalog::list_categories
//! GET    /api/product/{id}          catalog::get_product
//! POST   /api/cart/add              cart::add_to_cart
//! GET    /api/cart                  cart::get_cart
//! DELETE /api/cart/remove/{index}   cart::remove_from_cart
//! DELETE /api/cart/clear            cart::clear_cart
//! POST   /api/budget/check          budget::check_budget
//! POST   /api/checkout              checkout::checkout
//! GET    /api/invoice               checkout::get_last_invoice
//! GET    /health                    liveness
//! ```

pub mod budget;
pub mod cart;
pub mod catalog;
pub mod checkout;

use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::state::AppState;

/// All API routes, without the session layer.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(catalog::list_products))
        .route("/api/categories", get(catalog::list_categories))
        .route("/api/product/{id}", get(catalog::get_product))
        .route("/api/cart/add", post(cart::add_to_cart))
        .route("/api/cart", get(cart::get_cart))
        .route("/api/cart/remove/{index}", delete(cart::remove_from_cart))
        .route("/api/cart/clear", delete(cart::clear_cart))
        .route("/api/budget/check", post(budget::check_budget))
        .route("/api/checkout", post(checkout::checkout))
        .route("/api/invoice", get(checkout::get_last_invoice))
        .route("/health", get(health_handler))
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}
