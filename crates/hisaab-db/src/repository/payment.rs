//! # Payment Repository
//!
//! Outgoing funds. Payments are append-only.
//!
//! ## Routing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PaymentRepository::create(form)                                       │
//! │       │                                                                 │
//! │       ├── head is Salary, employee set   → SalaryRepository::pay_salary│
//! │       ├── head is Salary, no employee    → MissingEmployeeReference    │
//! │       ├── other head, employee set       → UnexpectedEmployeeReference │
//! │       └── other head, no employee        → plain INSERT                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows are read joined with `salary_ledger_entries`, so salary payments
//! written by this crate come back with their balance snapshot.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use hisaab_core::{BalanceSnapshot, CoreError, HeadKind, Money, NewPayment, Payment};

use super::generate_id;
use super::receipt::require_head;
use super::salary::SalaryRepository;

/// Payment columns joined with the optional ledger snapshot.
pub(crate) const PAYMENT_SELECT: &str = r#"
    SELECT
        p.id,
        p.payment_number,
        p.name,
        p.amount,
        p.expense_head_id,
        p.employee_id,
        p.particulars,
        p.timestamp,
        s.employee_name AS snapshot_employee_name,
        s.previous_balance AS snapshot_previous_balance,
        s.new_balance AS snapshot_new_balance
    FROM payments p
    LEFT JOIN salary_ledger_entries s ON s.payment_id = p.id
"#;

/// Database row for [`PAYMENT_SELECT`].
#[derive(Debug, FromRow)]
pub(crate) struct PaymentRow {
    id: String,
    payment_number: String,
    name: String,
    amount: Money,
    expense_head_id: String,
    employee_id: Option<String>,
    particulars: String,
    timestamp: DateTime<Utc>,
    snapshot_employee_name: Option<String>,
    snapshot_previous_balance: Option<Money>,
    snapshot_new_balance: Option<Money>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        let balance_snapshot = match (
            row.snapshot_employee_name,
            row.snapshot_previous_balance,
            row.snapshot_new_balance,
        ) {
            (Some(employee_name), Some(previous_balance), Some(new_balance)) => {
                Some(BalanceSnapshot {
                    employee_name,
                    previous_balance,
                    new_balance,
                })
            }
            _ => None,
        };

        Payment {
            id: row.id,
            payment_number: row.payment_number,
            name: row.name,
            amount: row.amount,
            expense_head_id: row.expense_head_id,
            employee_id: row.employee_id,
            particulars: row.particulars,
            timestamp: row.timestamp,
            balance_snapshot,
        }
    }
}

/// Inserts a payment and, if it carries one, its ledger snapshot.
///
/// Runs on the caller's connection so salary writes can share a
/// transaction with the balance update.
pub(crate) async fn insert_payment(conn: &mut SqliteConnection, payment: &Payment) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO payments (
            id, payment_number, name, amount, expense_head_id,
            employee_id, particulars, timestamp
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(&payment.id)
    .bind(&payment.payment_number)
    .bind(&payment.name)
    .bind(payment.amount)
    .bind(&payment.expense_head_id)
    .bind(&payment.employee_id)
    .bind(&payment.particulars)
    .bind(payment.timestamp)
    .execute(&mut *conn)
    .await?;

    if let Some(snapshot) = &payment.balance_snapshot {
        sqlx::query(
            r#"
            INSERT INTO salary_ledger_entries (
                payment_id, employee_name, previous_balance, new_balance
            ) VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&payment.id)
        .bind(&snapshot.employee_name)
        .bind(snapshot.previous_balance)
        .bind(snapshot.new_balance)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// Repository for payment database operations.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    /// Creates a new PaymentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PaymentRepository { pool }
    }

    /// Records a payment, stamped now.
    ///
    /// Payments under the Salary head go through
    /// [`SalaryRepository::pay_salary`] so the employee's balance moves with
    /// them.
    ///
    /// ## Errors
    /// - `Validation` for an invalid form or a head that is not an expense head
    /// - `Core(MissingEmployeeReference)` for a Salary payment with no employee
    /// - `Core(UnexpectedEmployeeReference)` for an employee on any other head
    pub async fn create(&self, form: &NewPayment) -> DbResult<Payment> {
        form.validate()?;

        let head = {
            let mut conn = self.pool.acquire().await?;
            require_head(&mut conn, &form.expense_head_id, HeadKind::Expense, "expense_head_id").await?
        };

        match (head.is_salary(), form.employee_id.is_some()) {
            (true, true) => {
                return SalaryRepository::new(self.pool.clone()).pay_salary(form).await;
            }
            (true, false) => {
                return Err(CoreError::MissingEmployeeReference {
                    payment_number: form.payment_number.clone(),
                }
                .into());
            }
            (false, true) => {
                return Err(CoreError::UnexpectedEmployeeReference {
                    payment_number: form.payment_number.clone(),
                    head: head.name,
                }
                .into());
            }
            (false, false) => {}
        }

        let payment = Payment {
            id: generate_id(),
            payment_number: form.payment_number.trim().to_string(),
            name: form.name.trim().to_string(),
            amount: form.amount,
            expense_head_id: head.id,
            employee_id: None,
            particulars: form.particulars.trim().to_string(),
            timestamp: Utc::now(),
            balance_snapshot: None,
        };

        debug!(
            id = %payment.id,
            payment_number = %payment.payment_number,
            amount = %payment.amount,
            "Creating payment"
        );

        let mut conn = self.pool.acquire().await?;
        insert_payment(&mut conn, &payment).await?;

        Ok(payment)
    }

    /// Gets a payment by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Payment>> {
        let sql = format!("{} WHERE p.id = ?1", PAYMENT_SELECT);
        let row = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Payment::from))
    }

    /// All payments in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Payment>> {
        self.list_between(None, None).await
    }

    /// Payments with `from <= timestamp < until`, in insertion order.
    pub async fn list_between(
        &self,
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> DbResult<Vec<Payment>> {
        debug!(?from, ?until, "Listing payments");

        let sql = format!(
            r#"{}
            WHERE (?1 IS NULL OR p.timestamp >= ?1)
              AND (?2 IS NULL OR p.timestamp < ?2)
            ORDER BY p.timestamp, p.rowid
            "#,
            PAYMENT_SELECT
        );

        let rows = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(from)
            .bind(until)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Payment::from).collect())
    }

    /// One employee's salary payments in ledger replay order.
    pub async fn list_for_employee(&self, employee_id: &str) -> DbResult<Vec<Payment>> {
        debug!(employee_id = %employee_id, "Listing employee payments");

        let sql = format!(
            "{} WHERE p.employee_id = ?1 ORDER BY p.timestamp, p.rowid",
            PAYMENT_SELECT
        );

        let rows = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Payment::from).collect())
    }

    /// Every payment that names an employee, in replay order.
    pub async fn list_employee_linked(&self) -> DbResult<Vec<Payment>> {
        let sql = format!(
            "{} WHERE p.employee_id IS NOT NULL ORDER BY p.timestamp, p.rowid",
            PAYMENT_SELECT
        );

        let rows = sqlx::query_as::<_, PaymentRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Payment::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::repository::test_support::*;

    fn form(head_id: &str, employee_id: Option<&str>) -> NewPayment {
        NewPayment {
            payment_number: "PV-1".to_string(),
            name: "WAPDA".to_string(),
            amount: Money::from_rupees(4_200),
            expense_head_id: head_id.to_string(),
            employee_id: employee_id.map(str::to_string),
            particulars: "Electricity, March".to_string(),
        }
    }

    #[tokio::test]
    async fn test_plain_payment() {
        let db = test_db().await;
        let utilities = head(&db, HeadKind::Expense, "Utilities").await;

        let created = db.payments().create(&form(&utilities.id, None)).await.unwrap();
        assert!(created.balance_snapshot.is_none());

        let loaded = db.payments().get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(loaded, created);
        assert_eq!(db.payments().list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_employee_on_plain_head_rejected() {
        let db = test_db().await;
        let utilities = head(&db, HeadKind::Expense, "Utilities").await;
        let ali = employee(&db, "Ali", 1000).await;

        let err = db
            .payments()
            .create(&form(&utilities.id, Some(&ali.id)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::UnexpectedEmployeeReference { .. })
        ));
        assert!(db.payments().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_salary_head_requires_employee() {
        let db = test_db().await;
        let salary = salary_head(&db).await;

        let err = db.payments().create(&form(&salary.id, None)).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::MissingEmployeeReference { .. })
        ));
    }

    #[tokio::test]
    async fn test_salary_head_routes_to_salary_path() {
        let db = test_db().await;
        let salary = salary_head(&db).await;
        let ali = employee(&db, "Ali", 10_000).await;

        let payment = db
            .payments()
            .create(&form(&salary.id, Some(&ali.id)))
            .await
            .unwrap();

        assert!(payment.balance_snapshot.is_some());
        let ali = db.employees().get_by_id(&ali.id).await.unwrap().unwrap();
        assert_eq!(ali.balance_remaining, Money::from_rupees(5_800));
    }

    #[tokio::test]
    async fn test_income_head_rejected() {
        let db = test_db().await;
        let fees = head(&db, HeadKind::Income, "Fees").await;

        let err = db.payments().create(&form(&fees.id, None)).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_for_employee_in_insertion_order() {
        let db = test_db().await;
        let salary = salary_head(&db).await;
        let utilities = head(&db, HeadKind::Expense, "Utilities").await;
        let ali = employee(&db, "Ali", 10_000).await;
        let zainab = employee(&db, "Zainab", 10_000).await;

        let mut numbers = Vec::new();
        for (n, who) in [(1, &ali), (2, &zainab), (3, &ali)] {
            let mut f = form(&salary.id, Some(&who.id));
            f.payment_number = format!("PV-{}", n);
            db.payments().create(&f).await.unwrap();
            if who.id == ali.id {
                numbers.push(f.payment_number);
            }
        }
        db.payments().create(&form(&utilities.id, None)).await.unwrap();

        let listed: Vec<_> = db
            .payments()
            .list_for_employee(&ali.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.payment_number)
            .collect();
        assert_eq!(listed, numbers);

        assert_eq!(db.payments().list_employee_linked().await.unwrap().len(), 3);
        assert_eq!(db.payments().list().await.unwrap().len(), 4);
    }
}
