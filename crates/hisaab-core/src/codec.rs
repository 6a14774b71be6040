//! # Ledger Particulars Codec
//!
//! Salary payments carry their ledger metadata inside the free-text
//! `particulars` field:
//!
//! ```text
//! Monthly salary|Employee: Ali|Previous Balance: 1000|New Balance: 0
//! └─── detail ─┘ └─ name ────┘ └─ before payment ──┘ └─ after ──┘
//! ```
//!
//! The shape is fixed: records written years ago must still decode, so the
//! prefixes, their order and the `|` delimiter never change. Detail text is
//! not escaped; a `|` typed by the operator splits the detail and a typed
//! prefix can shadow the real segment. New payments also store a
//! [`BalanceSnapshot`](crate::types::BalanceSnapshot) so the ledger does not
//! depend on this text for them.
//!
//! Decoding is total. Particulars typed by hand, or written before the
//! convention existed, decode to defaults instead of failing.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::BalanceSnapshot;

/// Segment separator.
pub const LEDGER_DELIMITER: char = '|';
/// Prefix of the employee name segment.
pub const EMPLOYEE_PREFIX: &str = "Employee:";
/// Prefix of the balance-before-payment segment.
pub const PREVIOUS_BALANCE_PREFIX: &str = "Previous Balance:";
/// Prefix of the balance-after-payment segment.
pub const NEW_BALANCE_PREFIX: &str = "New Balance:";

/// Balance text used when a segment is missing.
const DEFAULT_BALANCE: &str = "0";

// =============================================================================
// Decoded Fields
// =============================================================================

/// Ledger metadata recovered from a payment.
///
/// Balances stay as the text that was stored so that a row can always be
/// shown exactly as written; use [`LedgerFields::new_balance_amount`] for
/// arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LedgerFields {
    pub employee_name: String,
    pub previous_balance: String,
    pub new_balance: String,
    pub detail: String,
}

impl LedgerFields {
    /// Builds fields from a stored snapshot plus the payment's detail text.
    pub fn from_snapshot(snapshot: &BalanceSnapshot, detail: impl Into<String>) -> Self {
        LedgerFields {
            employee_name: snapshot.employee_name.clone(),
            previous_balance: snapshot.previous_balance.to_plain_string(),
            new_balance: snapshot.new_balance.to_plain_string(),
            detail: detail.into(),
        }
    }

    /// Previous balance as money, if the stored text is a decimal.
    pub fn previous_balance_amount(&self) -> Option<Money> {
        Money::parse_decimal(&self.previous_balance)
    }

    /// New balance as money, if the stored text is a decimal.
    pub fn new_balance_amount(&self) -> Option<Money> {
        Money::parse_decimal(&self.new_balance)
    }
}

// =============================================================================
// Encoder
// =============================================================================

/// Encodes salary ledger metadata into a particulars string.
///
/// Every segment is trimmed. The detail text is stored as given (after
/// trimming) even if it contains the delimiter.
///
/// ## Example
/// ```rust
/// use hisaab_core::codec::encode;
/// use hisaab_core::money::Money;
///
/// let text = encode("Ali", Money::from_rupees(1000), Money::zero(), "Monthly salary");
/// assert_eq!(text, "Monthly salary|Employee: Ali|Previous Balance: 1000|New Balance: 0");
/// ```
pub fn encode(
    employee_name: &str,
    previous_balance: Money,
    new_balance: Money,
    detail: &str,
) -> String {
    let segments = [
        detail.trim().to_string(),
        format!("{} {}", EMPLOYEE_PREFIX, employee_name.trim()),
        format!(
            "{} {}",
            PREVIOUS_BALANCE_PREFIX,
            previous_balance.to_plain_string()
        ),
        format!("{} {}", NEW_BALANCE_PREFIX, new_balance.to_plain_string()),
    ];

    segments
        .iter()
        .map(|segment| segment.trim())
        .collect::<Vec<_>>()
        .join(&LEDGER_DELIMITER.to_string())
}

// =============================================================================
// Decoder
// =============================================================================

/// Returns the trimmed remainder of the first segment carrying `prefix`,
/// or `None` if no segment has it or the remainder is blank.
fn find_segment<'a>(segments: &[&'a str], prefix: &str) -> Option<&'a str> {
    segments
        .iter()
        .find_map(|segment| segment.strip_prefix(prefix))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Decodes a particulars string.
///
/// - `employee_name` falls back to `fallback_name` (the payee name)
/// - both balances fall back to `"0"`
/// - `detail` is the first segment, whatever it contains
///
/// ## Example
/// ```rust
/// use hisaab_core::codec::decode;
///
/// let fields = decode("Bonus payment", "Jane");
/// assert_eq!(fields.detail, "Bonus payment");
/// assert_eq!(fields.employee_name, "Jane");
/// assert_eq!(fields.new_balance, "0");
/// ```
pub fn decode(particulars: &str, fallback_name: &str) -> LedgerFields {
    let segments: Vec<&str> = particulars
        .split(LEDGER_DELIMITER)
        .map(str::trim)
        .collect();

    let employee_name = find_segment(&segments, EMPLOYEE_PREFIX).unwrap_or(fallback_name);
    let previous_balance =
        find_segment(&segments, PREVIOUS_BALANCE_PREFIX).unwrap_or(DEFAULT_BALANCE);
    let new_balance = find_segment(&segments, NEW_BALANCE_PREFIX).unwrap_or(DEFAULT_BALANCE);
    let detail = segments.first().copied().unwrap_or_default();

    LedgerFields {
        employee_name: employee_name.to_string(),
        previous_balance: previous_balance.to_string(),
        new_balance: new_balance.to_string(),
        detail: detail.to_string(),
    }
}

/// The detail segment alone, for payments whose balances come from a
/// snapshot.
pub fn detail_segment(particulars: &str) -> &str {
    particulars
        .split(LEDGER_DELIMITER)
        .next()
        .map(str::trim)
        .unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================
