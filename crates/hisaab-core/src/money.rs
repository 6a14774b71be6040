//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  parseFloat("0.1") + parseFloat("0.2") = 0.30000000000000004  ❌        │
//! │                                                                         │
//! │  A salary ledger that drifts by a paisa per row never reconciles       │
//! │  with the stored balance_remaining.                                    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paisa                                            │
//! │    Rs. 1000.50 = 100050 paisa                                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Text Forms
//! - [`Money::to_plain_string`] - `1000`, `-300`, `1250.50`. This is the
//!   form written into payment particulars and must stay stable.
//! - `Display` - `Rs. 1000.00`, for printouts and logs.
//!
//! ## Usage
//! ```rust
//! use hisaab_core::money::Money;
//!
//! let salary = Money::from_rupees(25_000);
//! let advance = Money::from_major_minor(500, 50);
//!
//! assert_eq!((salary - advance).to_plain_string(), "24499.50");
//! assert_eq!(Money::parse_decimal("1000"), Some(Money::from_rupees(1000)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A signed amount in paisa (1/100 of a rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: balances go negative when an employee is paid in advance
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Transparent sqlx type**: stored as an INTEGER column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paisa (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use hisaab_core::money::Money;
    ///
    /// let fee = Money::from_paisa(150_050); // Rs. 1500.50
    /// assert_eq!(fee.paisa(), 150_050);
    /// ```
    #[inline]
    pub const fn from_paisa(paisa: i64) -> Self {
        Money(paisa)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Creates a Money value from rupees and paisa.
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = Rs. -5.50, not Rs. -4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in paisa.
    #[inline]
    pub const fn paisa(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paisa portion (always 0-99).
    #[inline]
    pub const fn paisa_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Renders the amount as a plain decimal without currency symbol.
    ///
    /// Whole amounts drop the fraction entirely; anything else keeps two
    /// digits. This is the form stored inside payment particulars, so old
    /// records (`Previous Balance: 1000`) and new ones look the same.
    ///
    /// ## Example
    /// ```rust
    /// use hisaab_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(1000).to_plain_string(), "1000");
    /// assert_eq!(Money::from_rupees(-300).to_plain_string(), "-300");
    /// assert_eq!(Money::from_paisa(125_050).to_plain_string(), "1250.50");
    /// assert_eq!(Money::from_paisa(-5).to_plain_string(), "-0.05");
    /// ```
    pub fn to_plain_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let (major, minor) = (abs / 100, abs % 100);

        if minor == 0 {
            format!("{}{}", sign, major)
        } else {
            format!("{}{}.{:02}", sign, major, minor)
        }
    }

    /// Parses a decimal amount such as `1000`, `-300`, `1250.5` or `+12.75`.
    ///
    /// A third fractional digit rounds half away from zero; further digits
    /// are ignored. Returns `None` for anything that is not a plain decimal
    /// (empty text, letters, thousands separators, overflow).
    ///
    /// ## Example
    /// ```rust
    /// use hisaab_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("1250.5"), Some(Money::from_paisa(125_050)));
    /// assert_eq!(Money::parse_decimal(" -300 "), Some(Money::from_rupees(-300)));
    /// assert_eq!(Money::parse_decimal("abc"), None);
    /// ```
    pub fn parse_decimal(text: &str) -> Option<Money> {
        let text = text.trim();

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (major, minor) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if major.is_empty() && minor.is_empty() {
            return None;
        }
        if !major.bytes().all(|b| b.is_ascii_digit()) || !minor.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let major: i64 = if major.is_empty() { 0 } else { major.parse().ok()? };

        let mut digits = minor.bytes().map(|b| i64::from(b - b'0'));
        let tens = digits.next().unwrap_or(0);
        let units = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|d| d >= 5);

        let paisa = major
            .checked_mul(100)?
            .checked_add(tens * 10 + units + i64::from(round_up))?;

        Some(Money(if negative { -paisa } else { paisa }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Printable form, e.g. `Rs. 1000.00` or `Rs. -300.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "Rs. {}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paisa() {
        let money = Money::from_paisa(109_950);
        assert_eq!(money.paisa(), 109_950);
        assert_eq!(money.rupees(), 1099);
        assert_eq!(money.paisa_part(), 50);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).paisa(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).paisa(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paisa(1099)), "Rs. 10.99");
        assert_eq!(format!("{}", Money::from_rupees(1000)), "Rs. 1000.00");
        assert_eq!(format!("{}", Money::from_rupees(-300)), "Rs. -300.00");
        assert_eq!(format!("{}", Money::zero()), "Rs. 0.00");
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(Money::zero().to_plain_string(), "0");
        assert_eq!(Money::from_rupees(1000).to_plain_string(), "1000");
        assert_eq!(Money::from_rupees(-300).to_plain_string(), "-300");
        assert_eq!(Money::from_paisa(1050).to_plain_string(), "10.50");
        assert_eq!(Money::from_paisa(-50).to_plain_string(), "-0.50");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("0"), Some(Money::zero()));
        assert_eq!(Money::parse_decimal("1000"), Some(Money::from_rupees(1000)));
        assert_eq!(Money::parse_decimal("1000.00"), Some(Money::from_rupees(1000)));
        assert_eq!(Money::parse_decimal("10.5"), Some(Money::from_paisa(1050)));
        assert_eq!(Money::parse_decimal(".75"), Some(Money::from_paisa(75)));
        assert_eq!(Money::parse_decimal("-300"), Some(Money::from_rupees(-300)));
        assert_eq!(Money::parse_decimal("+12"), Some(Money::from_rupees(12)));
        assert_eq!(Money::parse_decimal("1.005"), Some(Money::from_paisa(101)));
        assert_eq!(Money::parse_decimal("1.004"), Some(Money::from_paisa(100)));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert_eq!(Money::parse_decimal(""), None);
        assert_eq!(Money::parse_decimal("."), None);
        assert_eq!(Money::parse_decimal("-"), None);
        assert_eq!(Money::parse_decimal("1,000"), None);
        assert_eq!(Money::parse_decimal("Rs. 10"), None);
        assert_eq!(Money::parse_decimal("1.2.3"), None);
        assert_eq!(Money::parse_decimal("99999999999999999999"), None);
    }

    #[test]
    fn test_plain_string_parses_back() {
        for paisa in [0, 1, 99, 100, 101_050, -5, -30_000] {
            let money = Money::from_paisa(paisa);
            assert_eq!(Money::parse_decimal(&money.to_plain_string()), Some(money));
        }
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(1000);
        let b = Money::from_rupees(300);

        assert_eq!(a - b, Money::from_rupees(700));
        assert_eq!(a + b, Money::from_rupees(1300));
        assert_eq!(-b, Money::from_rupees(-300));

        let total: Money = [a, b].iter().sum();
        assert_eq!(total, Money::from_rupees(1300));
    }

    #[test]
    fn test_zero_and_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_paisa(1).is_positive());
        assert!(Money::from_paisa(-1).is_negative());
        assert_eq!(Money::from_paisa(-550).abs(), Money::from_paisa(550));
    }
}
