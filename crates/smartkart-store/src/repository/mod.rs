//! # Repository Module
//!
//! Storage implementations behind the traits the server depends on.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │  state.catalog.product(id)       state.sessions.session(sid)   │
//! │       ▼                                                                 │
//! │  dyn CatalogProvider                     dyn SessionStore              │
//! │  ├── all_products()                      ├── session(id)               │
//! │  ├── product(id)                         ├── contains(id)              │
//! │  └── categories()                        └── len()                     │
//! │       │                                        │                        │
//! │       ▼                                        ▼                        │
//! │  JsonCatalog                             MemorySessionStore            │
//! │                                                                         │
//! │  Handlers only see the traits, so tests can hand in any catalog.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`catalog::JsonCatalog`] - Read-only product catalog from a JSON file
//! - [`session::MemorySessionStore`] - In-process session map

pub mod catalog;
pub mod session;
