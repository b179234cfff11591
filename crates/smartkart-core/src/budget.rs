//! # Budget Evaluator
//!
//! Compares the cart total to the budget the shopper declared.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Classification (first match wins)                                      │
//! │                                                                         │
//! │  total > budget            ──► exceeded  "Budget exceeded by ₹20.00!"   │
//! │  percentage_used >= 80     ──► warning   "Warning: You have used ..."   │
//! │  otherwise                 ──► ok        ""                             │
//! │                                                                         │
//! │  percentage_used = total / budget × 100, or 0 when either side is      │
//! │  not positive (no division by zero).                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::BUDGET_WARNING_PERCENT;

/// Where spending stands relative to the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Ok,
    Warning,
    Exceeded,
}

/// Result of a budget check.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct BudgetReport {
    #[ts(as = "f64")]
    pub budget: Money,
    #[ts(as = "f64")]
    pub total_spent: Money,
    /// Negative once the budget is exceeded.
    #[ts(as = "f64")]
    pub remaining: Money,
    pub percentage_used: f64,
    pub status: BudgetStatus,
    /// Empty when the status is `ok`.
    pub message: String,
}

impl BudgetReport {
    /// Classifies `total_spent` against `budget`.
    ///
    /// Pure and recomputable from the cart total alone.
    ///
    /// ## Example
    /// ```rust
    /// use smartkart_core::{BudgetReport, BudgetStatus, Money};
    ///
    /// let report = BudgetReport::evaluate(Money::from_paise(10000), Money::from_paise(8500));
    /// assert_eq!(report.status, BudgetStatus::Warning);
    /// assert_eq!(report.remaining, Money::from_paise(1500));
    /// ```
    pub fn evaluate(budget: Money, total_spent: Money) -> Self {
        let remaining = budget.saturating_sub(total_spent);
        let percentage_used = percentage_used(budget, total_spent);

        let (status, message) = if total_spent > budget {
            (
                BudgetStatus::Exceeded,
                format!("Budget exceeded by {}!", remaining.abs()),
            )
        } else if percentage_used >= BUDGET_WARNING_PERCENT {
            (
                BudgetStatus::Warning,
                format!(
                    "Warning: You have used {:.1}% of your budget!",
                    percentage_used
                ),
            )
        } else {
            (BudgetStatus::Ok, String::new())
        };

        BudgetReport {
            budget,
            total_spent,
            remaining,
            percentage_used,
            status,
            message,
        }
    }
}

fn percentage_used(budget: Money, total_spent: Money) -> f64 {
    if !budget.is_positive() || !total_spent.is_positive() {
        return 0.0;
    }
    (total_spent.paise() as f64 * 100.0) / budget.paise() as f64
}
