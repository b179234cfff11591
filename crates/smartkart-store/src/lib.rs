//! # smartkart-store: Catalog and Session Storage
//!
//! This crate provides the two collaborators the checkout core reads and
//! writes: the product catalog and the per-client session state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SmartKart Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (POST /api/cart/add)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  smartkart-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   catalog.product("A1")          sessions.session("abc…")       │   │
//! │  │        │                                 │                      │   │
//! │  │        ▼                                 ▼                      │   │
//! │  │   JsonCatalog (immutable)        MemorySessionStore             │   │
//! │  │   Vec<Product> + id index        id → Arc<Mutex<Session>>       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  smartkart-core (validate, add to cart, checkout)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`error`] - Storage error types
//! - [`repository`] - Catalog and session implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use smartkart_store::{CatalogProvider, JsonCatalog, MemorySessionStore, SessionStore};
//!
//! let catalog = JsonCatalog::from_path("data/products.json")?;
//! let product = catalog.product("A1");
//!
//! let sessions = MemorySessionStore::default();
//! let handle = sessions.session("client-id");
//! let mut session = handle.lock().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use repository::catalog::{CatalogProvider, JsonCatalog};
pub use repository::session::{MemorySessionStore, SessionHandle, SessionStore};
