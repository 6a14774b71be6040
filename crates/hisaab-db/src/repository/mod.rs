//! # Repository Module
//!
//! Database repository implementations for Hisaab.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Caller                                                                │
//! │       │                                                                 │
//! │       │  db.salaries().pay_salary(&form)                               │
//! │       ▼                                                                 │
//! │  SalaryRepository                                                      │
//! │  ├── pay_salary(&self, form)          ← one SQLite transaction         │
//! │  ├── record_salary_payment(&self, ..) ← one SQLite transaction         │
//! │  ├── ledger(&self, employee_id)                                        │
//! │  └── ledgers(&self)                                                    │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`HeadRepository`](head::HeadRepository) - Income / expense heads
//! - [`EmployeeRepository`](employee::EmployeeRepository) - Payroll records
//! - [`ReceiptRepository`](receipt::ReceiptRepository) - Incoming funds
//! - [`PaymentRepository`](payment::PaymentRepository) - Outgoing funds
//! - [`SalaryRepository`](salary::SalaryRepository) - Atomic salary writes and ledgers
//! - [`RecordsRepository`](records::RecordsRepository) - Merged records view

pub mod employee;
pub mod head;
pub mod payment;
pub mod receipt;
pub mod records;
pub mod salary;

/// Generates a new primary key.
pub(crate) fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
