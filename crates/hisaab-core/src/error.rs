//! # Error Types
//!
//! Domain-specific error types for hisaab-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  hisaab-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  hisaab-db errors (separate crate)                                     │
//! │  └── DbError          - Store failures, wraps CoreError                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! - Particulars text missing ledger segments: the decoder falls back to
//!   defaults.
//! - A payment pointing at an employee outside the supplied set: the
//!   assembler leaves it out.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A payment against the Salary head must name the employee being paid.
    #[error("Salary payment {payment_number} has no employee")]
    MissingEmployeeReference { payment_number: String },

    /// Employee references are only meaningful on the Salary head.
    ///
    /// ## When This Occurs
    /// - A form left an employee selected after switching to another head
    #[error("Payment {payment_number} names an employee but is filed under '{head}'")]
    UnexpectedEmployeeReference {
        payment_number: String,
        head: String,
    },

    /// The draft was planned against a different employee record.
    #[error("Payment is for employee {requested}, but employee {loaded} was loaded")]
    EmployeeMismatch { requested: String, loaded: String },

    /// A salary payment handed to the store without its typed balance
    /// snapshot.
    #[error("Salary payment {payment_number} carries no balance snapshot")]
    MissingBalanceSnapshot { payment_number: String },

    /// The balances attached to a salary payment do not follow from its
    /// amount.
    ///
    /// ## When This Occurs
    /// - The new balance passed to the store differs from the snapshot
    /// - The snapshot's new balance is not previous balance minus amount
    #[error("Salary payment {payment_number} should leave a balance of {expected}, got {found}")]
    SnapshotMismatch {
        payment_number: String,
        expected: Money,
        found: Money,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
