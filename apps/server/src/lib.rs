//! # SmartKart Server
//!
//! HTTP JSON API for the SmartKart self-checkout.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Request Flow                                     │
//! │                                                                         │
//! │  Client ──► session_layer ──► route handler ──► smartkart-core          │
//! │             (cookie → SessionId)    │                                   │
//! │                                     ├── state.catalog   (lookup)        │
//! │                                     └── state.sessions  (cart, invoice) │
//! │                                                                         │
//! │  Errors: CoreError ──► ApiError ──► {success: false, error, code}       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (or a TOML file named by `SMARTKART_CONFIG`):
//! - `SMARTKART_BIND_ADDR` - Bind address (default: 0.0.0.0)
//! - `SMARTKART_PORT` - HTTP port (default: 5000)
//! - `SMARTKART_CATALOG_PATH` - Catalog file (default: data/products.json)
//! - `SMARTKART_WEIGHT_TOLERANCE_GRAMS` - Fixed-weight tolerance (default: 50)
//! - `SMARTKART_SESSION_TTL_SECS` - Idle session lifetime (default: 86400)

pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;

use axum::{middleware, Router};

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;

/// Builds the application router with session handling attached.
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(middleware::from_fn(session::session_layer))
        .with_state(state)
}
