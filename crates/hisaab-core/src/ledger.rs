//! # Ledger Assembler
//!
//! Rebuilds an employee's salary ledger from the flat payment history.
//!
//! ## Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  all payments (any order)                                              │
//! │       │                                                                 │
//! │       ▼  keep employee_id == employee.id                               │
//! │       ▼  stable sort by timestamp (ties keep store order)              │
//! │                                                                         │
//! │  EmployeeLedger { employee, payments }   ← query result                │
//! │       │                                                                 │
//! │       ▼  entries(): decode each payment lazily                         │
//! │                                                                         │
//! │  Date/Time │ Name │ Details        │ Amount │ Balance                  │
//! │  01 Jan    │ Ali  │ Monthly salary │ 1000   │ 0      ← snapshot value  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Balances are taken from what was written with each payment, never
//! replayed. If the employee's stored balance disagrees with the last row,
//! [`EmployeeLedger::balance_drift`] reports it; nothing here corrects it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::codec::{decode, detail_segment, LedgerFields};
use crate::money::Money;
use crate::types::{Employee, Payment};

// =============================================================================
// Entries
// =============================================================================

/// One displayed ledger row. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LedgerEntry {
    pub payment_id: String,
    pub payment_number: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub employee_name: String,
    pub detail: String,
    pub amount: Money,
    /// Balance after this payment, as recorded when it was written.
    /// Text that is not a decimal shows as zero.
    pub running_balance: Money,
}

/// Ledger metadata of a payment: the typed snapshot when there is one,
/// otherwise whatever the particulars text decodes to.
pub fn ledger_fields(payment: &Payment) -> LedgerFields {
    match &payment.balance_snapshot {
        Some(snapshot) => LedgerFields::from_snapshot(snapshot, detail_segment(&payment.particulars)),
        None => decode(&payment.particulars, &payment.name),
    }
}

fn entry_for(payment: &Payment) -> LedgerEntry {
    let fields = ledger_fields(payment);
    let running_balance = fields.new_balance_amount().unwrap_or_default();

    LedgerEntry {
        payment_id: payment.id.clone(),
        payment_number: payment.payment_number.clone(),
        timestamp: payment.timestamp,
        employee_name: fields.employee_name,
        detail: fields.detail,
        amount: payment.amount,
        running_balance,
    }
}

// =============================================================================
// Employee Ledger
// =============================================================================

/// Stored balance and ledger closing balance that do not agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BalanceDrift {
    /// `balance_remaining` on the employee record.
    pub stored: Money,
    /// Running balance of the last ledger row.
    pub ledger: Money,
}

/// Ledger query result: the employee and their salary payments in
/// chronological replay order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EmployeeLedger {
    pub employee: Employee,
    pub payments: Vec<Payment>,
}

impl EmployeeLedger {
    /// Display rows, decoded fresh on every call.
    pub fn entries(&self) -> impl Iterator<Item = LedgerEntry> + '_ {
        self.payments.iter().map(entry_for)
    }

    /// Running balance of the last row, or `None` for an empty ledger.
    pub fn closing_balance(&self) -> Option<Money> {
        self.payments.last().map(|payment| entry_for(payment).running_balance)
    }

    /// Total paid across the ledger.
    pub fn total_paid(&self) -> Money {
        self.payments.iter().map(|payment| payment.amount).sum()
    }

    /// Reports a mismatch between the employee's stored balance and the
    /// ledger's closing balance. An empty ledger never drifts.
    pub fn balance_drift(&self) -> Option<BalanceDrift> {
        let ledger = self.closing_balance()?;
        let stored = self.employee.balance_remaining;

        (ledger != stored).then_some(BalanceDrift { stored, ledger })
    }
}

// =============================================================================
// Assembly
// =============================================================================

fn chronological(mut payments: Vec<Payment>) -> Vec<Payment> {
    // sort_by_key is stable: equal timestamps keep insertion order
    payments.sort_by_key(|payment| payment.timestamp);
    payments
}

/// Builds one employee's ledger from the full payment history.
///
/// ## Example
/// ```rust,ignore
/// let ledger = build_ledger(&ali, &payments);
/// for row in ledger.entries() {
///     println!("{} {} {}", row.timestamp, row.detail, row.running_balance);
/// }
/// ```
pub fn build_ledger(employee: &Employee, all_payments: &[Payment]) -> EmployeeLedger {
    let payments = all_payments
        .iter()
        .filter(|payment| payment.employee_id.as_deref() == Some(employee.id.as_str()))
        .cloned()
        .collect();

    EmployeeLedger {
        employee: employee.clone(),
        payments: chronological(payments),
    }
}

/// Builds the ledgers of every employee in one pass.
///
/// Payments that reference an employee not in `employees` are left out;
/// one dangling reference does not stop the rest from rendering. The result
/// follows the order of `employees`.
pub fn build_ledgers(employees: &[Employee], all_payments: &[Payment]) -> Vec<EmployeeLedger> {
    let mut by_employee: HashMap<&str, Vec<Payment>> = employees
        .iter()
        .map(|employee| (employee.id.as_str(), Vec::new()))
        .collect();

    for payment in all_payments {
        let Some(employee_id) = payment.employee_id.as_deref() else {
            continue;
        };
        if let Some(bucket) = by_employee.get_mut(employee_id) {
            bucket.push(payment.clone());
        }
    }

    employees
        .iter()
        .map(|employee| EmployeeLedger {
            employee: employee.clone(),
            payments: chronological(
                by_employee.remove(employee.id.as_str()).unwrap_or_default(),
            ),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;
    use crate::types::BalanceSnapshot;
    use chrono::TimeZone;

    const ALI: &str = "6f1c2a52-8f41-4a55-9a53-2d9b1c7e0a11";
    const ZAINAB: &str = "9a0e4b7d-1c2f-4e3a-b5d6-7f8091a2b3c4";
    const GHOST: &str = "00000000-0000-0000-0000-00000000dead";

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap()
    }

    fn employee(id: &str, name: &str, balance: Money) -> Employee {
        Employee {
            id: id.to_string(),
            name: name.to_string(),
            age: None,
            department: "Hifz".to_string(),
            designation: "Teacher".to_string(),
            salary: Money::from_rupees(1000),
            balance_remaining: balance,
            created_at: at(1),
            updated_at: at(1),
        }
    }

    fn payment(id: &str, employee_id: Option<&str>, day: u32, particulars: &str) -> Payment {
        Payment {
            id: id.to_string(),
            payment_number: format!("PV-{}", id),
            name: "Payee".to_string(),
            amount: Money::from_rupees(100),
            expense_head_id: "head".to_string(),
            employee_id: employee_id.map(str::to_string),
            particulars: particulars.to_string(),
            timestamp: at(day),
            balance_snapshot: None,
        }
    }

    #[test]
    fn test_orders_chronologically() {
        let ali = employee(ALI, "Ali", Money::zero());
        let history = vec![
            payment("t3", Some(ALI), 20, "third"),
            payment("t1", Some(ALI), 5, "first"),
            payment("t2", Some(ALI), 10, "second"),
        ];

        let ledger = build_ledger(&ali, &history);
        let ids: Vec<_> = ledger.entries().map(|e| e.payment_id).collect();
        assert_eq!(ids, ["t1", "t2", "t3"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ali = employee(ALI, "Ali", Money::zero());
        let history = vec![
            payment("a", Some(ALI), 5, ""),
            payment("b", Some(ALI), 5, ""),
            payment("c", Some(ALI), 1, ""),
        ];

        let ids: Vec<_> = build_ledger(&ali, &history)
            .entries()
            .map(|e| e.payment_id)
            .collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn test_filters_other_employees_and_plain_payments() {
        let ali = employee(ALI, "Ali", Money::zero());
        let history = vec![
            payment("mine", Some(ALI), 1, ""),
            payment("hers", Some(ZAINAB), 2, ""),
            payment("electricity", None, 3, "WAPDA bill"),
        ];

        let ledger = build_ledger(&ali, &history);
        assert_eq!(ledger.payments.len(), 1);
        assert_eq!(ledger.payments[0].id, "mine");
    }

    #[test]
    fn test_entries_use_decoded_particulars() {
        let ali = employee(ALI, "Ali", Money::from_rupees(700));
        let history = vec![payment(
            "p",
            Some(ALI),
            1,
            &encode("Ali", Money::from_rupees(800), Money::from_rupees(700), "Jan"),
        )];

        let entry = build_ledger(&ali, &history).entries().next().unwrap();
        assert_eq!(entry.employee_name, "Ali");
        assert_eq!(entry.detail, "Jan");
        assert_eq!(entry.running_balance, Money::from_rupees(700));
        assert_eq!(entry.amount, Money::from_rupees(100));
    }

    #[test]
    fn test_legacy_particulars_fall_back() {
        let ali = employee(ALI, "Ali", Money::zero());
        let history = vec![payment("old", Some(ALI), 1, "paid in cash")];

        let entry = build_ledger(&ali, &history).entries().next().unwrap();
        assert_eq!(entry.employee_name, "Payee");
        assert_eq!(entry.detail, "paid in cash");
        assert_eq!(entry.running_balance, Money::zero());
    }

    #[test]
    fn test_snapshot_wins_over_particulars() {
        let ali = employee(ALI, "Ali", Money::from_rupees(50));
        let mut p = payment("p", Some(ALI), 1, "Note|New Balance: 999|mangled");
        p.balance_snapshot = Some(BalanceSnapshot {
            employee_name: "Ali".to_string(),
            previous_balance: Money::from_rupees(150),
            new_balance: Money::from_rupees(50),
        });

        let ledger = build_ledger(&ali, &[p]);
        let entry = ledger.entries().next().unwrap();
        assert_eq!(entry.running_balance, Money::from_rupees(50));
        assert_eq!(entry.detail, "Note");
        assert_eq!(ledger.balance_drift(), None);
    }

    #[test]
    fn test_entries_are_restartable() {
        let ali = employee(ALI, "Ali", Money::zero());
        let history = vec![payment("1", Some(ALI), 1, ""), payment("2", Some(ALI), 2, "")];
        let ledger = build_ledger(&ali, &history);

        let first: Vec<_> = ledger.entries().collect();
        let second: Vec<_> = ledger.entries().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_balance_drift() {
        let history = vec![payment(
            "p",
            Some(ALI),
            1,
            &encode("Ali", Money::from_rupees(1000), Money::zero(), "Jan"),
        )];

        let in_sync = build_ledger(&employee(ALI, "Ali", Money::zero()), &history);
        assert_eq!(in_sync.closing_balance(), Some(Money::zero()));
        assert_eq!(in_sync.balance_drift(), None);

        // Balance edited behind the ledger's back
        let edited = build_ledger(&employee(ALI, "Ali", Money::from_rupees(400)), &history);
        assert_eq!(
            edited.balance_drift(),
            Some(BalanceDrift {
                stored: Money::from_rupees(400),
                ledger: Money::zero(),
            })
        );

        let empty = build_ledger(&employee(ALI, "Ali", Money::from_rupees(400)), &[]);
        assert_eq!(empty.balance_drift(), None);
    }

    #[test]
    fn test_build_ledgers_skips_unknown_employees() {
        let employees = vec![
            employee(ALI, "Ali", Money::zero()),
            employee(ZAINAB, "Zainab", Money::zero()),
        ];
        let history = vec![
            payment("z2", Some(ZAINAB), 9, ""),
            payment("ghost", Some(GHOST), 2, ""),
            payment("a1", Some(ALI), 3, ""),
            payment("z1", Some(ZAINAB), 4, ""),
            payment("bill", None, 5, ""),
        ];

        let ledgers = build_ledgers(&employees, &history);
        assert_eq!(ledgers.len(), 2);
        assert_eq!(ledgers[0].employee.id, ALI);
        assert_eq!(ledgers[0].payments.len(), 1);

        let zainab: Vec<_> = ledgers[1].entries().map(|e| e.payment_id).collect();
        assert_eq!(zainab, ["z1", "z2"]);

        let everything: Vec<_> = ledgers
            .iter()
            .flat_map(|l| l.payments.iter().map(|p| p.id.as_str()))
            .collect();
        assert!(!everything.contains(&"ghost"));
    }

    #[test]
    fn test_total_paid() {
        let ali = employee(ALI, "Ali", Money::zero());
        let history = vec![payment("1", Some(ALI), 1, ""), payment("2", Some(ALI), 2, "")];
        assert_eq!(build_ledger(&ali, &history).total_paid(), Money::from_rupees(200));
    }

    #[test]
    fn test_ledger_serializes_for_presentation() {
        let ali = employee(ALI, "Ali", Money::zero());
        let ledger = build_ledger(&ali, &[payment("1", Some(ALI), 1, "")]);

        let json = serde_json::to_value(&ledger).unwrap();
        assert_eq!(json["employee"]["name"], "Ali");
        assert_eq!(json["payments"][0]["payment_number"], "PV-1");
    }
}
