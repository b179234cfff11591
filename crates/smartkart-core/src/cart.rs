//! # Cart Ledger
//!
//! The ordered list of validated lines for one shopping session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Ledger Operations                               │
//! │                                                                         │
//! │  Client Action            Endpoint                 Ledger Change        │
//! │  ─────────────            ────────                 ─────────────        │
//! │                                                                         │
//! │  Scan + weigh ───────────► POST /api/cart/add ───► items.push(item)    │
//! │                                                                         │
//! │  Click Remove ───────────► DELETE .../remove/i ──► items.remove(i)     │
//! │                                                                         │
//! │  Click Clear ────────────► DELETE .../clear ─────► items.clear()       │
//! │                                                                         │
//! │  View Cart ──────────────► GET /api/cart ────────► (read only)         │
//! │                                                                         │
//! │  NOTE: Removal is positional, so insertion order is significant.       │
//! │        The same product may appear on several lines.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::CartItem;

/// The shopping cart.
///
/// ## Invariants
/// - Lines keep their insertion order
/// - Lines are immutable once appended
/// - `total` is the exact sum of line prices and never exceeds `Money::MAX`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    total: Money,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Appends a validated line to the end of the cart.
    ///
    /// Fails with [`CoreError::CartLimitExceeded`], leaving the cart
    /// untouched, if the new total would leave the money range.
    pub fn add(&mut self, item: CartItem) -> CoreResult<()> {
        self.total = self
            .total
            .checked_add(item.price)
            .ok_or(CoreError::CartLimitExceeded { limit: Money::MAX })?;
        self.items.push(item);
        Ok(())
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Removes the line at `index` and returns it.
    ///
    /// The remaining lines keep their relative order.
    pub fn remove_at(&mut self, index: usize) -> CoreResult<CartItem> {
        if index >= self.items.len() {
            return Err(CoreError::IndexOutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(index);
        self.total = self.total - removed.price;
        Ok(removed)
    }

    /// Empties the cart. Idempotent.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total = Money::zero();
    }

    /// Returns the number of lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of line prices.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snapshot for the `GET /api/cart` response.
    pub fn summary(&self) -> CartSummary {
        CartSummary::from(self)
    }
}

/// Cart contents plus totals, as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSummary {
    pub cart: Vec<CartItem>,
    pub total: Money,
    pub item_count: usize,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        CartSummary {
            cart: cart.items.clone(),
            total: cart.total,
            item_count: cart.item_count(),
        }
    }
}
