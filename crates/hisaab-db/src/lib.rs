//! # hisaab-db: Transaction Store for Hisaab
//!
//! SQLite storage for heads, employees, receipts and payments, with sqlx for
//! async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Hisaab Data Flow                                 │
//! │                                                                         │
//! │  Payment form (presentation layer)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     hisaab-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ HeadRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ EmployeeRepo  │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │ SalaryRepo    │    │              │  │   │
//! │  │   │ Management    │    │ RecordsRepo   │    │              │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │ pure calls                     │   │
//! │  │                                ▼                                 │   │
//! │  │               hisaab-core (plan, encode, assemble)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (WAL)                       │   │
//! │  │                     $HISAAB_DB_PATH or ./hisaab.db              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`config`] - Environment configuration and tracing setup
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hisaab_db::{Database, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let db = Database::new(config.db_config()).await?;
//!
//! let payment = db.salaries().pay_salary(&form).await?;
//! let ledger = db.salaries().ledger(&employee_id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{init_tracing, ConfigError, StoreConfig};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::employee::EmployeeRepository;
pub use repository::head::HeadRepository;
pub use repository::payment::PaymentRepository;
pub use repository::receipt::ReceiptRepository;
pub use repository::records::RecordsRepository;
pub use repository::salary::SalaryRepository;
