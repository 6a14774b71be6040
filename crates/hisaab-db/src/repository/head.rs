//! # Head Repository
//!
//! Income and expense heads. Names are unique per kind; a head cannot be
//! deleted while receipts or payments are filed under it.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use hisaab_core::validation::validate_head_name;
use hisaab_core::{Head, HeadKind, SALARY_HEAD_NAME};

use super::generate_id;

/// Repository for head database operations.
#[derive(Debug, Clone)]
pub struct HeadRepository {
    pool: SqlitePool,
}

impl HeadRepository {
    /// Creates a new HeadRepository.
    pub fn new(pool: SqlitePool) -> Self {
        HeadRepository { pool }
    }

    /// Lists the heads of one kind, by name.
    pub async fn list(&self, kind: HeadKind) -> DbResult<Vec<Head>> {
        debug!(kind = kind.as_str(), "Listing heads");

        let heads = sqlx::query_as::<_, Head>(
            r#"
            SELECT id, kind, name, created_at
            FROM heads
            WHERE kind = ?1
            ORDER BY name COLLATE NOCASE
            "#,
        )
        .bind(kind)
        .fetch_all(&self.pool)
        .await?;

        Ok(heads)
    }

    /// Gets a head by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Head>> {
        let head = sqlx::query_as::<_, Head>(
            "SELECT id, kind, name, created_at FROM heads WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(head)
    }

    /// The reserved Salary expense head, if it has been created.
    pub async fn salary_head(&self) -> DbResult<Option<Head>> {
        let head = sqlx::query_as::<_, Head>(
            "SELECT id, kind, name, created_at FROM heads WHERE kind = ?1 AND name = ?2",
        )
        .bind(HeadKind::Expense)
        .bind(SALARY_HEAD_NAME)
        .fetch_optional(&self.pool)
        .await?;

        Ok(head)
    }

    /// Creates a head.
    ///
    /// ## Errors
    /// - `Validation` for an empty or overlong name
    /// - `UniqueViolation` if a head of the same kind already has the name
    pub async fn create(&self, kind: HeadKind, name: &str) -> DbResult<Head> {
        validate_head_name(name)?;

        let head = Head {
            id: generate_id(),
            kind,
            name: name.trim().to_string(),
            created_at: Utc::now(),
        };

        debug!(id = %head.id, kind = kind.as_str(), name = %head.name, "Creating head");

        sqlx::query("INSERT INTO heads (id, kind, name, created_at) VALUES (?1, ?2, ?3, ?4)")
            .bind(&head.id)
            .bind(head.kind)
            .bind(&head.name)
            .bind(head.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::UniqueViolation { .. } => {
                    DbError::duplicate(format!("{} head", kind.as_str()), head.name.clone())
                }
                other => other,
            })?;

        Ok(head)
    }

    /// Deletes a head.
    ///
    /// ## Errors
    /// - `NotFound` if no head has this ID
    /// - `ForeignKeyViolation` if receipts or payments reference it
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting head");

        let result = sqlx::query("DELETE FROM heads WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Head", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::*;
    use hisaab_core::{Money, NewReceipt};

    #[tokio::test]
    async fn test_create_and_list_by_kind() {
        let db = test_db().await;
        let heads = db.heads();

        heads.create(HeadKind::Income, "  Fees ").await.unwrap();
        heads.create(HeadKind::Income, "Donations").await.unwrap();
        heads.create(HeadKind::Expense, "Utilities").await.unwrap();

        let income: Vec<_> = heads
            .list(HeadKind::Income)
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(income, ["Donations", "Fees"]);
        assert_eq!(heads.list(HeadKind::Expense).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let db = test_db().await;
        let heads = db.heads();

        heads.create(HeadKind::Expense, "Salary").await.unwrap();
        let err = heads.create(HeadKind::Expense, "Salary").await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        // Same name under the other kind is a different head
        heads.create(HeadKind::Income, "Salary").await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let db = test_db().await;
        let err = db.heads().create(HeadKind::Income, "   ").await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_salary_head_lookup() {
        let db = test_db().await;
        assert!(db.heads().salary_head().await.unwrap().is_none());

        let created = salary_head(&db).await;
        let found = db.heads().salary_head().await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(found.is_salary());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let fees = head(&db, HeadKind::Income, "Fees").await;

        db.heads().delete(&fees.id).await.unwrap();
        assert!(db.heads().get_by_id(&fees.id).await.unwrap().is_none());

        let err = db.heads().delete(&fees.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_referenced_head_fails() {
        let db = test_db().await;
        let fees = head(&db, HeadKind::Income, "Fees").await;

        db.receipts()
            .create(&NewReceipt {
                receipt_number: "R-1".to_string(),
                name: "Parent".to_string(),
                amount: Money::from_rupees(500),
                income_head_id: fees.id.clone(),
                particulars: String::new(),
            })
            .await
            .unwrap();

        let err = db.heads().delete(&fees.id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert!(db.heads().get_by_id(&fees.id).await.unwrap().is_some());
    }
}
