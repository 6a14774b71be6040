//! # Records View
//!
//! Receipts and payments merged into one newest-first list, with the
//! filters the records screen offers.
//!
//! ```text
//! receipts ──┐
//!            ├──► RecordFilter (dates, kind, head) ──► newest first
//! payments ──┘
//! ```
//!
//! When a `kind` is chosen the head filter is ignored: the kind already
//! decides which head list applies.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Payment, Receipt};

/// Receipt or payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RecordKind {
    Receipt,
    Payment,
}

/// One row of the records view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Record {
    pub kind: RecordKind,
    pub id: String,
    /// Receipt or payment number.
    pub number: String,
    pub name: String,
    pub amount: Money,
    /// Income head for receipts, expense head for payments.
    pub head_id: String,
    pub particulars: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

impl From<&Receipt> for Record {
    fn from(receipt: &Receipt) -> Self {
        Record {
            kind: RecordKind::Receipt,
            id: receipt.id.clone(),
            number: receipt.receipt_number.clone(),
            name: receipt.name.clone(),
            amount: receipt.amount,
            head_id: receipt.income_head_id.clone(),
            particulars: receipt.particulars.clone(),
            timestamp: receipt.timestamp,
        }
    }
}

impl From<&Payment> for Record {
    fn from(payment: &Payment) -> Self {
        Record {
            kind: RecordKind::Payment,
            id: payment.id.clone(),
            number: payment.payment_number.clone(),
            name: payment.name.clone(),
            amount: payment.amount,
            head_id: payment.expense_head_id.clone(),
            particulars: payment.particulars.clone(),
            timestamp: payment.timestamp,
        }
    }
}

// =============================================================================
// Filter
// =============================================================================

/// Records screen filters. Every field is optional; the default matches
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecordFilter {
    /// First day included (UTC).
    #[ts(as = "Option<String>")]
    pub start_date: Option<NaiveDate>,
    /// Last day included (UTC).
    #[ts(as = "Option<String>")]
    pub end_date: Option<NaiveDate>,
    pub kind: Option<RecordKind>,
    /// Income or expense head id. Ignored when `kind` is set.
    pub head_id: Option<String>,
}

impl RecordFilter {
    /// Earliest timestamp inside the range.
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.start_date
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
    }

    /// First timestamp after the range. `None` when unbounded, or when the
    /// end date is the last representable day.
    pub fn ends_before(&self) -> Option<DateTime<Utc>> {
        self.end_date
            .and_then(|date| date.succ_opt())
            .map(|next| next.and_time(NaiveTime::MIN).and_utc())
    }

    fn in_range(&self, timestamp: DateTime<Utc>) -> bool {
        let day = timestamp.date_naive();
        self.start_date.map_or(true, |start| day >= start)
            && self.end_date.map_or(true, |end| day <= end)
    }

    /// Whether a record passes every active filter.
    pub fn matches(&self, record: &Record) -> bool {
        if !self.in_range(record.timestamp) {
            return false;
        }

        match (self.kind, &self.head_id) {
            (Some(kind), _) => record.kind == kind,
            (None, Some(head_id)) => &record.head_id == head_id,
            (None, None) => true,
        }
    }
}

// =============================================================================
// Merge
// =============================================================================

/// Merges receipts and payments newest first.
///
/// The sort is stable: records with equal timestamps keep the order they
/// were given in, receipts before payments.
pub fn merge_records(receipts: &[Receipt], payments: &[Payment], filter: &RecordFilter) -> Vec<Record> {
    let mut records: Vec<Record> = receipts
        .iter()
        .map(Record::from)
        .chain(payments.iter().map(Record::from))
        .filter(|record| filter.matches(record))
        .collect();

    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    records
}

/// Totals shown under the records table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecordTotals {
    pub receipts: Money,
    pub payments: Money,
}

impl RecordTotals {
    pub fn of(records: &[Record]) -> Self {
        records.iter().fold(RecordTotals::default(), |mut totals, record| {
            match record.kind {
                RecordKind::Receipt => totals.receipts += record.amount,
                RecordKind::Payment => totals.payments += record.amount,
            }
            totals
        })
    }

    /// Receipts minus payments.
    pub fn net(&self) -> Money {
        self.receipts - self.payments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FEES: &str = "aaaaaaaa-0000-0000-0000-000000000001";
    const DONATIONS: &str = "aaaaaaaa-0000-0000-0000-000000000002";
    const SALARY: &str = "bbbbbbbb-0000-0000-0000-000000000001";
    const UTILITIES: &str = "bbbbbbbb-0000-0000-0000-000000000002";

    fn at(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, day, hour, 0, 0).unwrap()
    }

    fn receipt(id: &str, head: &str, rupees: i64, timestamp: DateTime<Utc>) -> Receipt {
        Receipt {
            id: id.to_string(),
            receipt_number: format!("R-{}", id),
            name: "Parent".to_string(),
            amount: Money::from_rupees(rupees),
            income_head_id: head.to_string(),
            particulars: String::new(),
            timestamp,
        }
    }

    fn payment(id: &str, head: &str, rupees: i64, timestamp: DateTime<Utc>) -> Payment {
        Payment {
            id: id.to_string(),
            payment_number: format!("P-{}", id),
            name: "Payee".to_string(),
            amount: Money::from_rupees(rupees),
            expense_head_id: head.to_string(),
            employee_id: None,
            particulars: String::new(),
            timestamp,
            balance_snapshot: None,
        }
    }

    fn fixture() -> (Vec<Receipt>, Vec<Payment>) {
        (
            vec![
                receipt("r1", FEES, 500, at(1, 5, 10)),
                receipt("r2", DONATIONS, 2000, at(2, 1, 9)),
            ],
            vec![
                payment("p1", SALARY, 1000, at(1, 31, 23)),
                payment("p2", UTILITIES, 300, at(2, 1, 0)),
            ],
        )
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_newest_first() {
        let (receipts, payments) = fixture();
        let records = merge_records(&receipts, &payments, &RecordFilter::default());
        assert_eq!(ids(&records), ["r2", "p2", "p1", "r1"]);
    }

    #[test]
    fn test_ties_keep_receipts_first() {
        let ts = at(3, 1, 12);
        let receipts = vec![receipt("r", FEES, 1, ts)];
        let payments = vec![payment("p", UTILITIES, 1, ts)];

        let records = merge_records(&receipts, &payments, &RecordFilter::default());
        assert_eq!(ids(&records), ["r", "p"]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let (receipts, payments) = fixture();
        let filter = RecordFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 31),
            end_date: NaiveDate::from_ymd_opt(2024, 2, 1),
            ..Default::default()
        };

        let records = merge_records(&receipts, &payments, &filter);
        assert_eq!(ids(&records), ["r2", "p2", "p1"]);
    }

    #[test]
    fn test_kind_filter() {
        let (receipts, payments) = fixture();
        let filter = RecordFilter {
            kind: Some(RecordKind::Payment),
            ..Default::default()
        };

        let records = merge_records(&receipts, &payments, &filter);
        assert_eq!(ids(&records), ["p2", "p1"]);
    }

    #[test]
    fn test_head_filter_applies_to_both_kinds() {
        let (receipts, payments) = fixture();

        let by_income = RecordFilter {
            head_id: Some(FEES.to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&merge_records(&receipts, &payments, &by_income)), ["r1"]);

        let by_expense = RecordFilter {
            head_id: Some(SALARY.to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&merge_records(&receipts, &payments, &by_expense)), ["p1"]);
    }

    #[test]
    fn test_kind_overrides_head_filter() {
        let (receipts, payments) = fixture();
        let filter = RecordFilter {
            kind: Some(RecordKind::Receipt),
            head_id: Some(SALARY.to_string()),
            ..Default::default()
        };

        let records = merge_records(&receipts, &payments, &filter);
        assert_eq!(ids(&records), ["r2", "r1"]);
    }

    #[test]
    fn test_bounds() {
        let filter = RecordFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 2, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 2, 29),
            ..Default::default()
        };
        assert_eq!(filter.starts_at(), Some(at(2, 1, 0)));
        assert_eq!(filter.ends_before(), Some(at(3, 1, 0)));
        assert_eq!(RecordFilter::default().starts_at(), None);
    }

    #[test]
    fn test_totals() {
        let (receipts, payments) = fixture();
        let records = merge_records(&receipts, &payments, &RecordFilter::default());
        let totals = RecordTotals::of(&records);

        assert_eq!(totals.receipts, Money::from_rupees(2500));
        assert_eq!(totals.payments, Money::from_rupees(1300));
        assert_eq!(totals.net(), Money::from_rupees(1200));
    }
}
