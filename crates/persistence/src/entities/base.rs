//! Base and equipment type entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the bases table.
#[derive(Debug, Clone, FromRow)]
pub struct BaseEntity {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub commander_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BaseEntity> for domain::models::Base {
    fn from(entity: BaseEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            location: entity.location,
            commander_user_id: entity.commander_user_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the equipment_types table.
#[derive(Debug, Clone, FromRow)]
pub struct EquipmentTypeEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EquipmentTypeEntity> for domain::models::EquipmentType {
    fn from(entity: EquipmentTypeEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
