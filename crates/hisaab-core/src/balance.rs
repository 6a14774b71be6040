//! # Balance Mutator
//!
//! The one place that decides how a salary payment moves an employee's
//! `balance_remaining`.
//!
//! ```text
//! balance_remaining: 1000 ──► pay 300 ──► 700   (delta -300)
//! balance_remaining:  200 ──► pay 500 ──► -300  (advance, allowed)
//! ```
//!
//! Callers must persist the result together with the payment it came from;
//! see `SalaryRepository::record_salary_payment` in hisaab-db.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Outcome of applying a payment to a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BalanceChange {
    pub new_balance: Money,
    /// Signed change, always the negated payment amount.
    pub delta: Money,
}

/// Applies a salary payment to the amount owed.
///
/// A negative result means the employee has been paid in advance; it is not
/// an error.
///
/// ## Example
/// ```rust
/// use hisaab_core::balance::apply_payment;
/// use hisaab_core::money::Money;
///
/// let change = apply_payment(Money::from_rupees(1000), Money::from_rupees(300));
/// assert_eq!(change.new_balance, Money::from_rupees(700));
/// assert_eq!(change.delta, Money::from_rupees(-300));
/// ```
#[inline]
pub fn apply_payment(current_balance: Money, payment_amount: Money) -> BalanceChange {
    BalanceChange {
        new_balance: current_balance - payment_amount,
        delta: -payment_amount,
    }
}
