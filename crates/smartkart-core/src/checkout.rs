//! # Checkout Engine
//!
//! Freezes a cart into an [`Invoice`].
//!
//! ## Checkout Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐  add/remove  ┌──────────┐  checkout   ┌──────────────┐    │
//! │  │  Empty   │─────────────►│ In Cart  │────────────►│   Invoice    │    │
//! │  │  Cart    │◄─────────────│          │             │ (last one    │    │
//! │  └──────────┘    clear     └──────────┘             │  retained)   │    │
//! │       ▲                         │                   └──────────────┘    │
//! │       └─────────────────────────┘ cart emptied by checkout              │
//! │                                                                         │
//! │  Checkout on an empty cart → EmptyCart, nothing changes.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Payment is simulated: every invoice is marked successful.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, CartItemRecord};

/// Payment status stamped on every invoice.
pub const PAYMENT_STATUS: &str = "Simulated - Successful";

/// Closing line printed on every invoice.
pub const INVOICE_MESSAGE: &str = "Thank you for shopping with SmartKart!";

/// Immutable snapshot of a completed cart.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Invoice {
    /// `INV-` followed by the issue time to the millisecond.
    pub invoice_number: String,
    /// Issue time as `dd-mm-yyyy HH:MM:SS`.
    pub date: String,
    #[ts(as = "Vec<CartItemRecord>")]
    pub items: Vec<CartItem>,
    pub item_count: usize,
    #[ts(as = "f64")]
    pub total: Money,
    pub payment_status: String,
    pub message: String,
    #[serde(skip)]
    #[ts(skip)]
    issued_at: DateTime<Utc>,
}

impl Invoice {
    /// Snapshots `cart` into an invoice issued at `issued_at`.
    ///
    /// The cart is only read. An empty cart fails with
    /// [`CoreError::EmptyCart`]: a zero-line invoice is never produced.
    pub(crate) fn issue(cart: &Cart, issued_at: DateTime<Utc>) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        Ok(Invoice {
            invoice_number: format!("INV-{}", issued_at.format("%Y%m%d%H%M%S%3f")),
            date: issued_at.format("%d-%m-%Y %H:%M:%S").to_string(),
            item_count: cart.item_count(),
            items: cart.items().to_vec(),
            total: cart.total(),
            payment_status: PAYMENT_STATUS.to_string(),
            message: INVOICE_MESSAGE.to_string(),
            issued_at,
        })
    }

    /// The earliest issue time a follow-up invoice may carry so that its
    /// number sorts strictly after this one.
    pub(crate) fn next_issue_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let earliest = self.issued_at + Duration::milliseconds(1);
        now.max(earliest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineKind;
    use crate::weight::Weight;
    use chrono::TimeZone;

    fn cart(prices: &[i64]) -> Cart {
        let mut cart = Cart::new();
        for &paise in prices {
            cart.add(line(paise)).unwrap();
        }
        cart
    }

    fn line(paise: i64) -> CartItem {
        CartItem {
            product_id: "V1".to_string(),
            name: "Tomatoes".to_string(),
            price: Money::from_paise(paise),
            category: "Vegetables".to_string(),
            aisle: "Aisle 1".to_string(),
            measured_weight: Weight::from_grams(750),
            kind: LineKind::Variable {
                price_per_kg: Money::from_paise(4000),
            },
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_formats_number_and_date() {
        let at = Utc.with_ymd_and_hms(2026, 3, 7, 14, 5, 9).unwrap() + Duration::milliseconds(42);
        let invoice = Invoice::issue(&cart(&[3000, 1250]), at).unwrap();

        assert_eq!(invoice.invoice_number, "INV-20260307140509042");
        assert_eq!(invoice.date, "07-03-2026 14:05:09");
        assert_eq!(invoice.item_count, 2);
        assert_eq!(invoice.total, Money::from_paise(4250));
        assert_eq!(invoice.payment_status, PAYMENT_STATUS);
        assert_eq!(invoice.message, INVOICE_MESSAGE);
        assert_eq!(invoice.issued_at, at);
    }

    #[test]
    fn test_issue_refuses_empty_cart() {
        assert_eq!(Invoice::issue(&Cart::new(), Utc::now()), Err(CoreError::EmptyCart));
    }

    #[test]
    fn test_next_issue_time_is_strictly_later() {
        let at = Utc.with_ymd_and_hms(2026, 3, 7, 14, 5, 9).unwrap();
        let invoice = Invoice::issue(&cart(&[100]), at).unwrap();

        assert_eq!(invoice.next_issue_time(at), at + Duration::milliseconds(1));
        let later = at + Duration::seconds(5);
        assert_eq!(invoice.next_issue_time(later), later);
    }

    #[test]
    fn test_serialized_shape() {
        let invoice = Invoice::issue(&cart(&[3000]), Utc::now()).unwrap();
        let value = serde_json::to_value(&invoice).unwrap();

        assert_eq!(value["total"], serde_json::json!(30.0));
        assert_eq!(value["item_count"], serde_json::json!(1));
        assert_eq!(value["items"][0]["variable_weight"], serde_json::json!(true));
        assert!(value.get("issued_at").is_none());
    }
}
