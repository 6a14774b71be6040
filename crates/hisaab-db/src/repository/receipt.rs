//! # Receipt Repository
//!
//! Incoming funds. Receipts are append-only.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use hisaab_core::{Head, HeadKind, NewReceipt, Receipt, ValidationError};

use super::generate_id;

const RECEIPT_COLUMNS: &str =
    "id, receipt_number, name, amount, income_head_id, particulars, timestamp";

/// Loads a head and checks its kind, inside whatever connection or
/// transaction the caller holds.
pub(crate) async fn require_head(
    conn: &mut SqliteConnection,
    id: &str,
    kind: HeadKind,
    field: &str,
) -> DbResult<Head> {
    let head = sqlx::query_as::<_, Head>(
        "SELECT id, kind, name, created_at FROM heads WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| DbError::not_found("Head", id))?;

    if head.kind != kind {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{}' is not an {} head", head.name, kind.as_str()),
        }
        .into());
    }

    Ok(head)
}

/// Repository for receipt database operations.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    pool: SqlitePool,
}

impl ReceiptRepository {
    /// Creates a new ReceiptRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReceiptRepository { pool }
    }

    /// Records a receipt against an income head, stamped now.
    pub async fn create(&self, form: &NewReceipt) -> DbResult<Receipt> {
        form.validate()?;

        let mut conn = self.pool.acquire().await?;
        require_head(&mut conn, &form.income_head_id, HeadKind::Income, "income_head_id").await?;

        let receipt = Receipt {
            id: generate_id(),
            receipt_number: form.receipt_number.trim().to_string(),
            name: form.name.trim().to_string(),
            amount: form.amount,
            income_head_id: form.income_head_id.clone(),
            particulars: form.particulars.trim().to_string(),
            timestamp: Utc::now(),
        };

        debug!(
            id = %receipt.id,
            receipt_number = %receipt.receipt_number,
            amount = %receipt.amount,
            "Creating receipt"
        );

        sqlx::query(
            r#"
            INSERT INTO receipts (
                id, receipt_number, name, amount, income_head_id, particulars, timestamp
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&receipt.id)
        .bind(&receipt.receipt_number)
        .bind(&receipt.name)
        .bind(receipt.amount)
        .bind(&receipt.income_head_id)
        .bind(&receipt.particulars)
        .bind(receipt.timestamp)
        .execute(&mut *conn)
        .await?;

        Ok(receipt)
    }

    /// All receipts in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Receipt>> {
        self.list_between(None, None).await
    }

    /// Receipts with `from <= timestamp < until`, in insertion order.
    /// Either bound may be open.
    pub async fn list_between(
        &self,
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> DbResult<Vec<Receipt>> {
        debug!(?from, ?until, "Listing receipts");

        let sql = format!(
            r#"
            SELECT {}
            FROM receipts
            WHERE (?1 IS NULL OR timestamp >= ?1)
              AND (?2 IS NULL OR timestamp < ?2)
            ORDER BY timestamp, rowid
            "#,
            RECEIPT_COLUMNS
        );

        let receipts = sqlx::query_as::<_, Receipt>(&sql)
            .bind(from)
            .bind(until)
            .fetch_all(&self.pool)
            .await?;

        Ok(receipts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::*;
    use hisaab_core::Money;

    fn form(head_id: &str, number: &str) -> NewReceipt {
        NewReceipt {
            receipt_number: number.to_string(),
            name: "Parent of Ahmad".to_string(),
            amount: Money::from_rupees(1500),
            income_head_id: head_id.to_string(),
            particulars: " March fee ".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let db = test_db().await;
        let fees = head(&db, HeadKind::Income, "Fees").await;

        let first = db.receipts().create(&form(&fees.id, "R-1")).await.unwrap();
        let second = db.receipts().create(&form(&fees.id, "R-2")).await.unwrap();
        assert_eq!(first.particulars, "March fee");

        let ids: Vec<_> = db.receipts().list().await.unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, [first.id, second.id]);
    }

    #[tokio::test]
    async fn test_expense_head_rejected() {
        let db = test_db().await;
        let utilities = head(&db, HeadKind::Expense, "Utilities").await;

        let err = db.receipts().create(&form(&utilities.id, "R-1")).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
        assert!(db.receipts().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_head() {
        let db = test_db().await;
        let err = db
            .receipts()
            .create(&form("0b8f7c1e-3d2a-4c5b-8e9f-1a2b3c4d5e6f", "R-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_between_bounds() {
        let db = test_db().await;
        let fees = head(&db, HeadKind::Income, "Fees").await;
        let receipt = db.receipts().create(&form(&fees.id, "R-1")).await.unwrap();

        let before = receipt.timestamp - chrono::Duration::seconds(1);
        let after = receipt.timestamp + chrono::Duration::seconds(1);

        assert_eq!(db.receipts().list_between(Some(before), Some(after)).await.unwrap().len(), 1);
        assert!(db.receipts().list_between(Some(after), None).await.unwrap().is_empty());
        assert!(db.receipts().list_between(None, Some(before)).await.unwrap().is_empty());
    }
}
