//! Audit log repository.

use domain::models::{AuditLog, CreateAuditLogInput};
use sqlx::PgPool;

use crate::entities::AuditLogEntity;

/// Repository for the append-only audit trail.
#[derive(Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new audit log entry.
    pub async fn insert(&self, input: CreateAuditLogInput) -> Result<AuditLog, sqlx::Error> {
        let entity = sqlx::query_as::<_, AuditLogEntity>(
            r#"
            INSERT INTO audit_logs (user_id, action, entity_type, entity_id, details, ip_address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, action, entity_type, entity_id, details, ip_address, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.action.as_str())
        .bind(input.entity_type.as_str())
        .bind(input.entity_id)
        .bind(&input.details)
        .bind(&input.ip_address)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Insert without waiting. Failures are logged and never reach the caller.
    pub fn insert_async(&self, input: CreateAuditLogInput) {
        let pool = self.pool.clone();
        tokio::spawn(async move {
            let action = input.action;
            let repo = AuditLogRepository::new(pool);
            if let Err(e) = repo.insert(input).await {
                tracing::warn!(action = %action, error = %e, "Failed to insert audit log");
            }
        });
    }
}
