//! # Salary Repository
//!
//! The atomic salary write path and the ledger queries.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  pay_salary(form)                                                      │
//! │       │                                                                 │
//! │       ▼  BEGIN                                                          │
//! │  ├── head must be the Salary expense head                              │
//! │  ├── SELECT employee (current balance_remaining)                       │
//! │  ├── plan_salary_payment()   ← hisaab-core, pure                       │
//! │  ├── INSERT payments                                                   │
//! │  ├── INSERT salary_ledger_entries                                      │
//! │  └── UPDATE employees SET balance_remaining                            │
//! │       │                                                                 │
//! │       ▼  COMMIT   (any error above: ROLLBACK, nothing written)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The payment and the balance it produced are never observable apart.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use hisaab_core::ledger::{build_ledger, build_ledgers, EmployeeLedger};
use hisaab_core::salary::{plan_salary_payment, verify_salary_payment};
use hisaab_core::{CoreError, Employee, Head, HeadKind, Money, NewPayment, Payment};

use super::employee::{EmployeeRepository, EMPLOYEE_COLUMNS};
use super::generate_id;
use super::payment::{insert_payment, PaymentRepository, PaymentRow, PAYMENT_SELECT};
use super::receipt::require_head;

async fn require_salary_head(conn: &mut SqliteConnection, head_id: &str) -> DbResult<Head> {
    let head = require_head(conn, head_id, HeadKind::Expense, "expense_head_id").await?;

    if !head.is_salary() {
        return Err(DbError::NotSalaryHead {
            head_id: head_id.to_string(),
        });
    }

    Ok(head)
}

async fn write_salary_payment(
    conn: &mut SqliteConnection,
    payment: &Payment,
    employee_id: &str,
    updated_employee_balance: Money,
) -> DbResult<()> {
    insert_payment(conn, payment).await?;

    let result = sqlx::query(
        "UPDATE employees SET balance_remaining = ?2, updated_at = ?3 WHERE id = ?1",
    )
    .bind(employee_id)
    .bind(updated_employee_balance)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Employee", employee_id));
    }

    Ok(())
}

fn report_drift(ledger: &EmployeeLedger) {
    if let Some(drift) = ledger.balance_drift() {
        warn!(
            employee_id = %ledger.employee.id,
            stored = %drift.stored,
            ledger = %drift.ledger,
            "Stored balance differs from ledger closing balance"
        );
    }
}

/// Repository for salary payments and employee ledgers.
#[derive(Debug, Clone)]
pub struct SalaryRepository {
    pool: SqlitePool,
}

impl SalaryRepository {
    /// Creates a new SalaryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SalaryRepository { pool }
    }

    /// Persists an already planned salary payment and the employee's new
    /// balance in one transaction. All or nothing.
    ///
    /// The payment must carry its balance snapshot, and
    /// `updated_employee_balance` must be the snapshot's new balance. The
    /// snapshot's previous balance is compared with the stored one inside
    /// the transaction, so a plan made before another payment cannot land.
    ///
    /// ## Errors
    /// - `Core(MissingEmployeeReference)` if the payment names no employee
    /// - `Core(MissingBalanceSnapshot)` / `Core(SnapshotMismatch)` if the
    ///   balances attached to the payment disagree
    /// - `NotFound` if the employee does not exist
    /// - `StaleBalance` if the employee's balance moved since planning
    /// - `NotSalaryHead` if it is not filed under the Salary head
    /// - `UniqueViolation` / `ForeignKeyViolation` / `QueryFailed` from SQLite
    /// - `TransactionFailed` if the transaction cannot begin or commit
    pub async fn record_salary_payment(
        &self,
        payment: &Payment,
        updated_employee_balance: Money,
    ) -> DbResult<()> {
        let employee_id =
            payment
                .employee_id
                .as_deref()
                .ok_or_else(|| CoreError::MissingEmployeeReference {
                    payment_number: payment.payment_number.clone(),
                })?;

        let snapshot = verify_salary_payment(payment, updated_employee_balance)?;

        debug!(
            id = %payment.id,
            employee_id = %employee_id,
            new_balance = %updated_employee_balance,
            "Recording salary payment"
        );

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        require_salary_head(&mut tx, &payment.expense_head_id).await?;

        let stored = sqlx::query_scalar::<_, Money>(
            "SELECT balance_remaining FROM employees WHERE id = ?1",
        )
        .bind(employee_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Employee", employee_id))?;

        if stored != snapshot.previous_balance {
            return Err(DbError::StaleBalance {
                employee_id: employee_id.to_string(),
                planned: snapshot.previous_balance,
                stored,
            });
        }

        write_salary_payment(&mut tx, payment, employee_id, updated_employee_balance).await?;

        tx.commit().await.map_err(DbError::transaction)?;

        info!(
            id = %payment.id,
            employee_id = %employee_id,
            amount = %payment.amount,
            new_balance = %updated_employee_balance,
            "Salary payment recorded"
        );

        Ok(())
    }

    /// Pays salary from a payment form.
    ///
    /// The employee's balance is read inside the same transaction that
    /// writes the payment, so the snapshot always matches what was stored.
    ///
    /// ## Errors
    /// - `Validation` / `Core` for an invalid form
    /// - `NotFound` if the employee or head does not exist
    /// - `NotSalaryHead` if the head is not the Salary expense head
    pub async fn pay_salary(&self, form: &NewPayment) -> DbResult<Payment> {
        form.validate()?;

        let employee_id = form
            .employee_id
            .as_deref()
            .ok_or_else(|| CoreError::MissingEmployeeReference {
                payment_number: form.payment_number.clone(),
            })?;

        debug!(
            employee_id = %employee_id,
            payment_number = %form.payment_number,
            amount = %form.amount,
            "Paying salary"
        );

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        require_salary_head(&mut tx, &form.expense_head_id).await?;

        let sql = format!("SELECT {} FROM employees WHERE id = ?1", EMPLOYEE_COLUMNS);
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(employee_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("Employee", employee_id))?;

        let plan = plan_salary_payment(&employee, form, generate_id(), Utc::now())?;

        write_salary_payment(
            &mut tx,
            &plan.payment,
            plan.employee_id(),
            plan.updated_employee_balance(),
        )
        .await?;

        tx.commit().await.map_err(DbError::transaction)?;

        info!(
            id = %plan.payment.id,
            employee_id = %employee_id,
            amount = %plan.payment.amount,
            previous_balance = %employee.balance_remaining,
            new_balance = %plan.updated_employee_balance(),
            "Salary paid"
        );

        Ok(plan.payment)
    }

    /// One employee's ledger.
    pub async fn ledger(&self, employee_id: &str) -> DbResult<EmployeeLedger> {
        debug!(employee_id = %employee_id, "Building ledger");

        let employee = EmployeeRepository::new(self.pool.clone())
            .get_by_id(employee_id)
            .await?
            .ok_or_else(|| DbError::not_found("Employee", employee_id))?;

        let payments = PaymentRepository::new(self.pool.clone())
            .list_for_employee(employee_id)
            .await?;

        let ledger = build_ledger(&employee, &payments);
        report_drift(&ledger);

        Ok(ledger)
    }

    /// Ledgers of all employees, in employee list order.
    pub async fn ledgers(&self) -> DbResult<Vec<EmployeeLedger>> {
        debug!("Building all ledgers");

        let employees = EmployeeRepository::new(self.pool.clone()).list().await?;
        let payments = PaymentRepository::new(self.pool.clone())
            .list_employee_linked()
            .await?;

        let ledgers = build_ledgers(&employees, &payments);
        ledgers.iter().for_each(report_drift);

        Ok(ledgers)
    }

    /// Payments filed under the Salary head, newest first. Empty if the
    /// head does not exist yet.
    pub async fn list(&self) -> DbResult<Vec<Payment>> {
        debug!("Listing salary payments");

        let sql = format!(
            r#"{}
            JOIN heads h ON h.id = p.expense_head_id
            WHERE h.kind = ?1 AND h.name = ?2
            ORDER BY p.timestamp DESC, p.rowid DESC
            "#,
            PAYMENT_SELECT
        );

        let rows = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(HeadKind::Expense)
            .bind(hisaab_core::SALARY_HEAD_NAME)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Payment::from).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
