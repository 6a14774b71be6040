//! # Validation Module
//!
//! Input validation utilities for Hisaab forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser form                                                 │
//! │  ├── required / type="number" step="0.01"                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rule validation (lengths, positive amounts, ids)         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE constraints                                     │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use hisaab_core::money::Money;
//! use hisaab_core::validation::{validate_amount, validate_head_name};
//!
//! assert!(validate_head_name("Utilities").is_ok());
//! assert!(validate_amount("amount", Money::zero()).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_HEAD_NAME: usize = 100;
const MAX_PERSON_NAME: usize = 200;
const MAX_DOCUMENT_NUMBER: usize = 50;
const MAX_LABEL: usize = 100;

/// Largest amount or balance accepted, in paisa (Rs. 10 trillion).
///
/// Any two values inside this bound can be added or subtracted without
/// overflowing `i64`.
pub const MAX_AMOUNT_PAISA: i64 = 1_000_000_000_000_000;

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates an income or expense head name.
///
/// ## Rules
/// - Must not be blank
/// - At most 100 characters
///
/// ## Example
/// ```rust
/// use hisaab_core::validation::validate_head_name;
///
/// assert!(validate_head_name("Salary").is_ok());
/// assert!(validate_head_name("   ").is_err());
/// ```
pub fn validate_head_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_HEAD_NAME)
}

/// Validates a payer, payee or employee name (1..=200 characters).
pub fn validate_person_name(field: &str, name: &str) -> ValidationResult<()> {
    validate_text(field, name, MAX_PERSON_NAME)
}

/// Validates a receipt or payment number (1..=50 characters).
///
/// Numbers are typed by the operator from paper books, so no format is
/// imposed beyond length.
pub fn validate_document_number(field: &str, number: &str) -> ValidationResult<()> {
    validate_text(field, number, MAX_DOCUMENT_NUMBER)
}

/// Validates a short label such as a department or designation.
pub fn validate_label(field: &str, value: &str) -> ValidationResult<()> {
    validate_text(field, value, MAX_LABEL)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a receipt or payment amount.
///
/// ## Rules
/// - Must be positive (> 0)
/// - At most [`MAX_AMOUNT_PAISA`]
///
/// Balances may go negative; amounts may not.
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    if amount.paisa() > MAX_AMOUNT_PAISA {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: MAX_AMOUNT_PAISA,
        });
    }

    Ok(())
}

/// Validates a monthly salary (0..=[`MAX_AMOUNT_PAISA`]).
pub fn validate_salary(salary: Money) -> ValidationResult<()> {
    if salary.is_negative() || salary.paisa() > MAX_AMOUNT_PAISA {
        return Err(ValidationError::OutOfRange {
            field: "salary".to_string(),
            min: 0,
            max: MAX_AMOUNT_PAISA,
        });
    }

    Ok(())
}

/// Validates an amount owed, which may be negative after advances.
///
/// ## Example
/// ```rust
/// use hisaab_core::money::Money;
/// use hisaab_core::validation::{validate_balance, MAX_AMOUNT_PAISA};
///
/// assert!(validate_balance("opening_balance", Money::from_rupees(-500)).is_ok());
/// assert!(validate_balance("opening_balance", Money::from_paisa(MAX_AMOUNT_PAISA + 1)).is_err());
/// ```
pub fn validate_balance(field: &str, balance: Money) -> ValidationResult<()> {
    if balance.paisa().abs() > MAX_AMOUNT_PAISA {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: -MAX_AMOUNT_PAISA,
            max: MAX_AMOUNT_PAISA,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string.
///
/// ## Example
/// ```rust
/// use hisaab_core::validation::validate_uuid;
///
/// assert!(validate_uuid("id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("id", "not-a-uuid").is_err());
/// ```
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
