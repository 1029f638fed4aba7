//! Audit log entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for audit logs.
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogEntity {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<Uuid>,
    pub details: serde_json::Value,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AuditLogEntity> for domain::models::AuditLog {
    fn from(entity: AuditLogEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            action: entity.action,
            entity_type: entity.entity_type,
            entity_id: entity.entity_id,
            details: entity.details,
            ip_address: entity.ip_address,
            created_at: entity.created_at,
        }
    }
}
