//! # Salary Payment Planning
//!
//! Turns a payment form into everything the store must write atomically.
//!
//! ## Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  read employee.balance_remaining      (store, inside transaction)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  plan_salary_payment() ← THIS MODULE                                   │
//! │       ├── validate the form                                            │
//! │       ├── apply_payment()   → new balance, delta                       │
//! │       ├── encode()          → particulars text                         │
//! │       └── BalanceSnapshot   → typed copy of the same metadata          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT payment + snapshot, UPDATE employee   (same transaction)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Planning is pure, so the plan can be inspected or discarded freely; only
//! the store makes it real.

use chrono::{DateTime, Utc};

use crate::balance::{apply_payment, BalanceChange};
use crate::codec::encode;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{BalanceSnapshot, Employee, NewPayment, Payment};
use crate::validation::{validate_amount, validate_balance};

/// A salary payment ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryPaymentPlan {
    /// The payment row, particulars already encoded.
    pub payment: Payment,
    pub change: BalanceChange,
}

impl SalaryPaymentPlan {
    /// Employee the balance update applies to.
    pub fn employee_id(&self) -> &str {
        // Plans are only built for payments with an employee reference
        self.payment.employee_id.as_deref().unwrap_or_default()
    }

    /// The `balance_remaining` to store on the employee.
    pub fn updated_employee_balance(&self) -> Money {
        self.change.new_balance
    }
}

/// Plans a salary payment for `employee` from a payment form.
///
/// ## Errors
/// - `Validation` if the form is incomplete, the amount is not positive, or
///   either balance falls outside `MAX_AMOUNT_PAISA`
/// - `MissingEmployeeReference` if the form names no employee
/// - `EmployeeMismatch` if the form names a different employee
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use hisaab_core::money::Money;
/// use hisaab_core::salary::plan_salary_payment;
/// use hisaab_core::types::{Employee, NewPayment};
///
/// let now = Utc::now();
/// let ali = Employee {
///     id: "6f1c2a52-8f41-4a55-9a53-2d9b1c7e0a11".to_string(),
///     name: "Ali".to_string(),
///     age: None,
///     department: "Hifz".to_string(),
///     designation: "Teacher".to_string(),
///     salary: Money::from_rupees(1000),
///     balance_remaining: Money::from_rupees(1000),
///     created_at: now,
///     updated_at: now,
/// };
/// let form = NewPayment {
///     payment_number: "PV-1".to_string(),
///     name: "Ali".to_string(),
///     amount: Money::from_rupees(1000),
///     expense_head_id: "0b8f7c1e-3d2a-4c5b-8e9f-1a2b3c4d5e6f".to_string(),
///     employee_id: Some(ali.id.clone()),
///     particulars: "Monthly salary".to_string(),
/// };
///
/// let plan = plan_salary_payment(&ali, &form, "c3d4".to_string(), now).unwrap();
/// assert_eq!(plan.updated_employee_balance(), Money::zero());
/// assert_eq!(
///     plan.payment.particulars,
///     "Monthly salary|Employee: Ali|Previous Balance: 1000|New Balance: 0"
/// );
/// ```
pub fn plan_salary_payment(
    employee: &Employee,
    form: &NewPayment,
    id: String,
    timestamp: DateTime<Utc>,
) -> CoreResult<SalaryPaymentPlan> {
    form.validate()?;

    let requested = form
        .employee_id
        .as_deref()
        .ok_or_else(|| CoreError::MissingEmployeeReference {
            payment_number: form.payment_number.clone(),
        })?;

    if requested != employee.id {
        return Err(CoreError::EmployeeMismatch {
            requested: requested.to_string(),
            loaded: employee.id.clone(),
        });
    }

    let previous_balance = employee.balance_remaining;
    validate_balance("balance_remaining", previous_balance)?;

    let change = apply_payment(previous_balance, form.amount);
    validate_balance("balance_remaining", change.new_balance)?;

    let particulars = encode(
        &employee.name,
        previous_balance,
        change.new_balance,
        &form.particulars,
    );

    let payment = Payment {
        id,
        payment_number: form.payment_number.trim().to_string(),
        name: form.name.trim().to_string(),
        amount: form.amount,
        expense_head_id: form.expense_head_id.clone(),
        employee_id: Some(employee.id.clone()),
        particulars,
        timestamp,
        balance_snapshot: Some(BalanceSnapshot {
            employee_name: employee.name.trim().to_string(),
            previous_balance,
            new_balance: change.new_balance,
        }),
    };

    Ok(SalaryPaymentPlan { payment, change })
}

/// Checks that a planned salary payment is internally consistent before it
/// is written, and returns its snapshot.
///
/// The snapshot's new balance must equal previous balance minus amount, and
/// `updated_employee_balance` must equal that new balance. Whether the
/// previous balance is still current is for the store to check.
///
/// ## Errors
/// - `MissingEmployeeReference` / `MissingBalanceSnapshot`
/// - `Validation` if the amount or previous balance is out of range
/// - `SnapshotMismatch` if any of the balances disagree
pub fn verify_salary_payment(
    payment: &Payment,
    updated_employee_balance: Money,
) -> CoreResult<&BalanceSnapshot> {
    if payment.employee_id.is_none() {
        return Err(CoreError::MissingEmployeeReference {
            payment_number: payment.payment_number.clone(),
        });
    }

    let snapshot =
        payment
            .balance_snapshot
            .as_ref()
            .ok_or_else(|| CoreError::MissingBalanceSnapshot {
                payment_number: payment.payment_number.clone(),
            })?;

    validate_amount("amount", payment.amount)?;
    validate_balance("previous_balance", snapshot.previous_balance)?;

    let expected = apply_payment(snapshot.previous_balance, payment.amount).new_balance;
    for found in [snapshot.new_balance, updated_employee_balance] {
        if found != expected {
            return Err(CoreError::SnapshotMismatch {
                payment_number: payment.payment_number.clone(),
                expected,
                found,
            });
        }
    }

    Ok(snapshot)
}

// =============================================================================
// Unit Tests
// =============================================================================
