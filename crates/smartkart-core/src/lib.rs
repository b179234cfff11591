//! # smartkart-core: Pure Business Logic for SmartKart
//!
//! This crate is the **heart** of the SmartKart self-checkout backend. It
//! contains the validation and cart pipeline as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SmartKart Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser Front-end                            │   │
//! │  │    Catalog ──► Scan/Weigh ──► Cart ──► Budget ──► Invoice       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/server (axum)                           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ smartkart-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌─────────┐  ┌────────────────┐  │   │
//! │  │   │validation│─►│   cart   │─►│ budget  │  │    checkout    │  │   │
//! │  │   │ weights  │  │  ledger  │  │ status  │  │    invoices    │  │   │
//! │  │   └──────────┘  └──────────┘  └─────────┘  └────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO LOGGING • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          smartkart-store (catalog file, session map)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer paise (no floating point sums)
//! - [`weight`] - Weight type with integer milligrams
//! - [`types`] - Product, CartItem and their wire records
//! - [`validation`] - Weight validation and request field checks
//! - [`cart`] - The per-session cart ledger
//! - [`budget`] - Budget status classification
//! - [`checkout`] - Invoice generation
//! - [`session`] - Per-session state (cart + last invoice)
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use smartkart_core::{Money, Product, Session, Weight, WeightValidator};
//!
//! let apples = Product::variable_weight("P100", "Apples", "Fruits", "Aisle 1", Money::from_paise(12000));
//! let validator = WeightValidator::default();
//!
//! // 250g of apples at ₹120.00/kg
//! let item = validator.validate(&apples, Weight::from_grams(250), Utc::now()).unwrap();
//! assert_eq!(item.price, Money::from_paise(3000));
//!
//! let mut session = Session::new();
//! session.cart.add(item).unwrap();
//! let invoice = session.checkout(Utc::now()).unwrap();
//! assert_eq!(invoice.item_count, 1);
//! assert!(session.cart.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod budget;
pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod session;
pub mod types;
pub mod validation;
pub mod weight;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use budget::{BudgetReport, BudgetStatus};
pub use cart::{Cart, CartSummary};
pub use checkout::Invoice;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use session::Session;
pub use types::{CartItem, LineKind, Pricing, Product};
pub use validation::{validate_scan, WeightValidator};
pub use weight::Weight;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum allowed deviation between expected and measured weight for a
/// fixed-weight product, in grams.
pub const WEIGHT_TOLERANCE_GRAMS: i64 = 50;

/// Share of the budget (in percent) at which the status turns to `warning`.
pub const BUDGET_WARNING_PERCENT: f64 = 80.0;

/// Symbol used when money is rendered into user-facing messages.
pub const CURRENCY_SYMBOL: &str = "₹";
