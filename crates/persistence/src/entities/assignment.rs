//! Assignment entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::assignment::AssignmentHistoryItem;
use domain::models::{Assignment, AssignmentStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for assignment_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "assignment_status", rename_all = "lowercase")]
pub enum AssignmentStatusDb {
    Active,
    Returned,
}

impl From<AssignmentStatusDb> for AssignmentStatus {
    fn from(db: AssignmentStatusDb) -> Self {
        match db {
            AssignmentStatusDb::Active => Self::Active,
            AssignmentStatusDb::Returned => Self::Returned,
        }
    }
}

impl From<AssignmentStatus> for AssignmentStatusDb {
    fn from(status: AssignmentStatus) -> Self {
        match status {
            AssignmentStatus::Active => Self::Active,
            AssignmentStatus::Returned => Self::Returned,
        }
    }
}

/// Database row mapping for the assignments table.
#[derive(Debug, Clone, FromRow)]
pub struct AssignmentEntity {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub assigned_to_user_id: Uuid,
    pub assigned_by: Uuid,
    pub status: AssignmentStatusDb,
    pub assigned_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

impl From<AssignmentEntity> for Assignment {
    fn from(entity: AssignmentEntity) -> Self {
        Self {
            id: entity.id,
            asset_id: entity.asset_id,
            assigned_to_user_id: entity.assigned_to_user_id,
            assigned_by: entity.assigned_by,
            status: entity.status.into(),
            assigned_date: entity.assigned_date,
            return_date: entity.return_date,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct AssignmentHistoryEntity {
    pub id: Uuid,
    pub assigned_date: DateTime<Utc>,
    pub asset_id: Uuid,
    pub asset_serial_number: String,
    pub equipment_type_name: String,
    pub current_base_id: Uuid,
    pub current_base_name: String,
    pub assigned_to_user_id: Uuid,
    pub assigned_to_username: Option<String>,
    pub assigned_by_username: Option<String>,
    pub status: AssignmentStatusDb,
    pub return_date: Option<DateTime<Utc>>,
}

impl From<AssignmentHistoryEntity> for AssignmentHistoryItem {
    fn from(entity: AssignmentHistoryEntity) -> Self {
        Self {
            id: entity.id,
            assigned_date: entity.assigned_date,
            asset_id: entity.asset_id,
            asset_serial_number: entity.asset_serial_number,
            equipment_type_name: entity.equipment_type_name,
            current_base_id: entity.current_base_id,
            current_base_name: entity.current_base_name,
            assigned_to_user_id: entity.assigned_to_user_id,
            assigned_to_username: entity.assigned_to_username,
            assigned_by_username: entity.assigned_by_username,
            status: entity.status.into(),
            return_date: entity.return_date,
        }
    }
}
