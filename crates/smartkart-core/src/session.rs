//! # Session State
//!
//! Everything one shopper's session owns: the cart and the last invoice.
//!
//! A `Session` is plain data handed to each operation explicitly, so the
//! whole pipeline can be exercised without a web framework. The session
//! store decides where it lives and how access is serialized.

use chrono::{DateTime, Utc};

use crate::budget::BudgetReport;
use crate::cart::Cart;
use crate::checkout::Invoice;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Per-session state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub cart: Cart,
    last_invoice: Option<Invoice>,
}

impl Session {
    /// Creates a session with an empty cart and no invoice.
    pub fn new() -> Self {
        Session::default()
    }

    /// Checks out the cart.
    ///
    /// ## Behavior
    /// - Empty cart: fails with [`CoreError::EmptyCart`] and changes nothing
    /// - Otherwise: the lines are copied into a new invoice, the cart is
    ///   left empty, and the invoice replaces any previous one
    ///
    /// The invoice is fully built before the cart is touched, so a failure
    /// leaves both the cart and the previous invoice as they were.
    ///
    /// The issue time is `now`, pushed forward if needed so the new invoice
    /// number sorts strictly after the previous one.
    pub fn checkout(&mut self, now: DateTime<Utc>) -> CoreResult<&Invoice> {
        let issued_at = match &self.last_invoice {
            Some(previous) => previous.next_issue_time(now),
            None => now,
        };

        let invoice = Invoice::issue(&self.cart, issued_at)?;
        self.cart.clear();

        Ok(self.last_invoice.insert(invoice))
    }

    /// The invoice from the most recent checkout.
    pub fn last_invoice(&self) -> CoreResult<&Invoice> {
        self.last_invoice.as_ref().ok_or(CoreError::InvoiceNotFound)
    }

    /// Budget status of the current cart.
    pub fn budget_report(&self, budget: Money) -> BudgetReport {
        BudgetReport::evaluate(budget, self.cart.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::BudgetStatus;
    use crate::types::Product;
    use crate::validation::WeightValidator;
    use crate::weight::Weight;

    fn session_with_butter(count: usize) -> Session {
        let butter = Product::fixed_weight(
            "A1",
            "Butter 500g",
            "Dairy",
            "Aisle 2",
            Money::from_paise(5000),
            Weight::from_grams(500),
        );
        let validator = WeightValidator::default();

        let mut session = Session::new();
        for _ in 0..count {
            let item = validator
                .validate(&butter, Weight::from_grams(510), Utc::now())
                .unwrap();
            session.cart.add(item).unwrap();
        }
        session
    }

    #[test]
    fn test_checkout_empty_cart_fails() {
        let mut session = Session::new();
        assert_eq!(session.checkout(Utc::now()).unwrap_err(), CoreError::EmptyCart);
        assert_eq!(session.last_invoice().unwrap_err(), CoreError::InvoiceNotFound);
    }

    #[test]
    fn test_checkout_snapshots_and_empties_cart() {
        let mut session = session_with_butter(3);
        let before = session.cart.summary();

        let invoice = session.checkout(Utc::now()).unwrap().clone();
        assert_eq!(invoice.item_count, before.item_count);
        assert_eq!(invoice.total, before.total);
        assert_eq!(invoice.items, before.cart);

        assert!(session.cart.is_empty());
        assert_eq!(session.last_invoice().unwrap(), &invoice);
    }

    #[test]
    fn test_second_checkout_replaces_invoice_with_later_number() {
        let now = Utc::now();
        let mut session = session_with_butter(1);
        let first = session.checkout(now).unwrap().invoice_number.clone();

        session.cart = session_with_butter(2).cart;
        let second = session.checkout(now).unwrap().clone();

        assert!(second.invoice_number > first);
        assert_eq!(second.item_count, 2);
        assert_eq!(session.last_invoice().unwrap().invoice_number, second.invoice_number);
    }

    #[test]
    fn test_failed_checkout_keeps_previous_invoice() {
        let mut session = session_with_butter(1);
        let first = session.checkout(Utc::now()).unwrap().clone();

        assert!(session.checkout(Utc::now()).is_err());
        assert_eq!(session.last_invoice().unwrap(), &first);
    }

    #[test]
    fn test_checkout_of_a_cart_at_the_money_limit() {
        let saffron = Product::variable_weight(
            "S1",
            "Saffron",
            "Spices",
            "Aisle 9",
            Money::from_paise(40_000_000),
        );
        let validator = WeightValidator::default();
        let now = Utc::now();

        // ₹400000/kg × 1,000,000 kg = 1/25 of the money range per line
        let line = validator.validate(&saffron, Weight::MAX, now).unwrap();
        let mut session = Session::new();
        let mut accepted = 0;
        for _ in 0..300 {
            match session.cart.add(line.clone()) {
                Ok(()) => accepted += 1,
                Err(err) => {
                    assert_eq!(err, CoreError::CartLimitExceeded { limit: Money::MAX });
                    break;
                }
            }
        }
        assert_eq!(accepted, 25);
        let total = session.cart.total();

        let invoice = session.checkout(now).unwrap().clone();
        assert_eq!(invoice.item_count, accepted);
        assert_eq!(invoice.total, total);
        assert!(session.cart.is_empty());
        assert_eq!(session.last_invoice().unwrap(), &invoice);
    }

    #[test]
    fn test_budget_report_uses_cart_total() {
        let session = session_with_butter(2);
        let report = session.budget_report(Money::from_paise(11000));
        // ₹100.00 of ₹110.00 = 90.9%
        assert_eq!(report.status, BudgetStatus::Warning);
        assert_eq!(report.total_spent, Money::from_paise(10000));
    }
}
