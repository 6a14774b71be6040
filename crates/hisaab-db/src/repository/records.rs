//! # Records Repository
//!
//! Loads receipts and payments inside the filter's date range and hands
//! them to [`merge_records`] for the remaining filters and ordering.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use hisaab_core::records::{merge_records, Record, RecordFilter, RecordTotals};

use super::payment::PaymentRepository;
use super::receipt::ReceiptRepository;

/// Repository for the merged records view.
#[derive(Debug, Clone)]
pub struct RecordsRepository {
    pool: SqlitePool,
}

impl RecordsRepository {
    /// Creates a new RecordsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RecordsRepository { pool }
    }

    /// Receipts and payments matching `filter`, newest first.
    pub async fn list(&self, filter: &RecordFilter) -> DbResult<Vec<Record>> {
        debug!(?filter, "Listing records");

        let from = filter.starts_at();
        let until = filter.ends_before();

        let receipts = ReceiptRepository::new(self.pool.clone())
            .list_between(from, until)
            .await?;
        let payments = PaymentRepository::new(self.pool.clone())
            .list_between(from, until)
            .await?;

        Ok(merge_records(&receipts, &payments, filter))
    }

    /// Records matching `filter` together with their totals.
    pub async fn summary(&self, filter: &RecordFilter) -> DbResult<(Vec<Record>, RecordTotals)> {
        let records = self.list(filter).await?;
        let totals = RecordTotals::of(&records);
        Ok((records, totals))
    }
}
