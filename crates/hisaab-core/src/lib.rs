//! # hisaab-core: Pure Bookkeeping Logic for Hisaab
//!
//! Receipts, payments, heads and employee salary ledgers for a single
//! institute, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Hisaab Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Presentation (browser UI)                      │   │
//! │  │    Heads ──► Employees ──► Payment form ──► Ledger / Records    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ts-rs bindings                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ hisaab-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   codec   │  │  balance  │  │  ledger   │  │  records  │  │   │
//! │  │   │  encode   │  │  apply_   │  │  build_   │  │  merge_   │  │   │
//! │  │   │  decode   │  │  payment  │  │  ledger   │  │  records  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO LOGGING • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  hisaab-db (Transaction Store)                  │   │
//! │  │        SQLite, migrations, repositories, atomic salary path     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Head, Employee, Receipt, Payment)
//! - [`money`] - Money in paisa, integer arithmetic only
//! - [`codec`] - Ledger metadata inside payment particulars
//! - [`balance`] - The balance mutator
//! - [`salary`] - Planning a salary payment for the store
//! - [`ledger`] - Employee ledgers from the payment history
//! - [`records`] - Merged receipts/payments view
//! - [`error`] / [`validation`] - Typed errors and input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use hisaab_core::balance::apply_payment;
//! use hisaab_core::codec::{decode, encode};
//! use hisaab_core::Money;
//!
//! let change = apply_payment(Money::from_rupees(1000), Money::from_rupees(1000));
//! let text = encode("Ali", Money::from_rupees(1000), change.new_balance, "Monthly salary");
//!
//! let fields = decode(&text, "Ali");
//! assert_eq!(fields.new_balance_amount(), Some(Money::zero()));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod balance;
pub mod codec;
pub mod error;
pub mod ledger;
pub mod money;
pub mod records;
pub mod salary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name of the reserved expense head whose payments update an employee's
/// balance.
///
/// Matched exactly, case included; existing records were filed under this
/// spelling.
pub const SALARY_HEAD_NAME: &str = "Salary";
