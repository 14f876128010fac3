//! Audit log repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::audit::{AuditLogDetails, AuditLogRow},
};

#[derive(Clone)]
pub struct AuditRepository {
    pool: Pool<Postgres>,
}

impl AuditRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Append one entry. The log is append-only; there is no update path.
    pub async fn append(&self, user_id: i32, action: &str, details: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_log (user_id, action, details, timestamp)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind(action)
        .bind(details)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Window of entries newest first, joined with actor display fields.
    /// equipment_name/admin_notes are filled in by the service from the
    /// details payload.
    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<AuditLogDetails>> {
        let rows = sqlx::query_as::<_, AuditLogRow>(
            r#"
            SELECT a.id, a.user_id, a.action, a.details, a.timestamp,
                   u.name as user_name, u.email as user_email
            FROM audit_log a
            LEFT JOIN users u ON u.id = a.user_id
            ORDER BY a.timestamp DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AuditLogDetails::from).collect())
    }

    /// Total number of entries
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM audit_log")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
