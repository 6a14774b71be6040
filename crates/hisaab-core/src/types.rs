//! # Domain Types
//!
//! Core domain types used throughout Hisaab.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Head       │   │    Employee     │   │    Payment      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  kind           │◄──┤  department     │◄──┤  employee_id?   │       │
//! │  │  name           │   │  salary         │   │  expense_head   │       │
//! │  │  "Salary" = ★   │   │  balance_rem.   │   │  particulars    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Receipt      │   │ BalanceSnapshot │  typed ledger metadata      │
//! │  │  income_head    │   │  prev / new     │  stored beside a salary     │
//! │  └─────────────────┘   └─────────────────┘  payment                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Immutability
//! Receipts and payments are append-only. Nothing in this crate offers a way
//! to change one after it is built; the ledger depends on that.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::validation::{
    validate_amount, validate_balance, validate_document_number, validate_label,
    validate_person_name, validate_salary, validate_uuid, ValidationResult,
};

// =============================================================================
// Heads
// =============================================================================

/// Whether a head files incoming receipts or outgoing payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum HeadKind {
    /// Income head, referenced by receipts.
    Income,
    /// Expense head, referenced by payments.
    Expense,
}

impl HeadKind {
    /// Lowercase label, matching the stored column value.
    pub const fn as_str(&self) -> &'static str {
        match self {
            HeadKind::Income => "income",
            HeadKind::Expense => "expense",
        }
    }
}

/// A named income or expense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Head {
    pub id: String,
    pub kind: HeadKind,
    pub name: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Head {
    /// True for the reserved expense head whose payments carry ledger data.
    pub fn is_salary(&self) -> bool {
        self.kind == HeadKind::Expense && self.name == crate::SALARY_HEAD_NAME
    }
}

// =============================================================================
// Employee
// =============================================================================

/// An employee on the institute payroll.
///
/// `balance_remaining` is positive while salary is owed and negative after an
/// advance. Once the employee exists it only changes through
/// [`crate::balance::apply_payment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub age: Option<i64>,
    pub department: String,
    pub designation: String,
    /// Monthly salary.
    pub salary: Money,
    pub balance_remaining: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Registration form for a new employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewEmployee {
    pub name: String,
    pub age: Option<i64>,
    pub department: String,
    pub designation: String,
    pub salary: Money,
    /// Amount already owed on the day the employee is registered.
    pub opening_balance: Money,
}

impl NewEmployee {
    /// Checks the form fields before insert.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_person_name("name", &self.name)?;
        validate_label("department", &self.department)?;
        validate_label("designation", &self.designation)?;
        validate_salary(self.salary)?;
        validate_balance("opening_balance", self.opening_balance)?;
        Ok(())
    }
}

/// Profile edit for an existing employee.
///
/// Deliberately has no balance field: the balance moves only with salary
/// payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EmployeeUpdate {
    pub name: String,
    pub age: Option<i64>,
    pub department: String,
    pub designation: String,
    pub salary: Money,
}

impl EmployeeUpdate {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_person_name("name", &self.name)?;
        validate_label("department", &self.department)?;
        validate_label("designation", &self.designation)?;
        validate_salary(self.salary)
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// Incoming funds filed under an income head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Receipt {
    pub id: String,
    pub receipt_number: String,
    /// Name of the payer.
    pub name: String,
    pub amount: Money,
    pub income_head_id: String,
    pub particulars: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

/// Form for recording a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewReceipt {
    pub receipt_number: String,
    pub name: String,
    pub amount: Money,
    pub income_head_id: String,
    pub particulars: String,
}

impl NewReceipt {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_document_number("receipt_number", &self.receipt_number)?;
        validate_person_name("name", &self.name)?;
        validate_amount("amount", self.amount)?;
        validate_uuid("income_head_id", &self.income_head_id)?;
        Ok(())
    }
}

// =============================================================================
// Payment
// =============================================================================

/// Ledger metadata captured when a salary payment is written.
///
/// Stored in its own table next to the payment so the ledger never has to
/// parse it out of free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BalanceSnapshot {
    pub employee_name: String,
    pub previous_balance: Money,
    pub new_balance: Money,
}

/// Outgoing funds filed under an expense head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Payment {
    pub id: String,
    pub payment_number: String,
    /// Name of the payee.
    pub name: String,
    pub amount: Money,
    pub expense_head_id: String,
    /// Set only for salary payments.
    pub employee_id: Option<String>,
    /// Free text. For salary payments this also carries the encoded ledger
    /// segments (see [`crate::codec`]).
    pub particulars: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    /// Present for salary payments written by this crate; absent for
    /// records that predate the side table.
    pub balance_snapshot: Option<BalanceSnapshot>,
}

impl Payment {
    /// Whether this payment belongs to an employee's salary ledger.
    #[inline]
    pub fn is_salary(&self) -> bool {
        self.employee_id.is_some()
    }
}

/// Form for recording a payment.
///
/// `particulars` is the operator's free text; for salary payments it becomes
/// the detail segment of the encoded particulars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewPayment {
    pub payment_number: String,
    pub name: String,
    pub amount: Money,
    pub expense_head_id: String,
    pub employee_id: Option<String>,
    pub particulars: String,
}

impl NewPayment {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_document_number("payment_number", &self.payment_number)?;
        validate_person_name("name", &self.name)?;
        validate_amount("amount", self.amount)?;
        validate_uuid("expense_head_id", &self.expense_head_id)?;
        if let Some(employee_id) = &self.employee_id {
            validate_uuid("employee_id", employee_id)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
