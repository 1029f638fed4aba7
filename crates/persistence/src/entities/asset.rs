//! Asset entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::{Asset, AssetStatus, AssetSummary};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for asset_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "asset_status", rename_all = "lowercase")]
pub enum AssetStatusDb {
    Available,
    Assigned,
    Expended,
}

impl From<AssetStatusDb> for AssetStatus {
    fn from(db: AssetStatusDb) -> Self {
        match db {
            AssetStatusDb::Available => Self::Available,
            AssetStatusDb::Assigned => Self::Assigned,
            AssetStatusDb::Expended => Self::Expended,
        }
    }
}

impl From<AssetStatus> for AssetStatusDb {
    fn from(status: AssetStatus) -> Self {
        match status {
            AssetStatus::Available => Self::Available,
            AssetStatus::Assigned => Self::Assigned,
            AssetStatus::Expended => Self::Expended,
        }
    }
}

/// Database row mapping for the assets table.
#[derive(Debug, Clone, FromRow)]
pub struct AssetEntity {
    pub id: Uuid,
    pub serial_number: String,
    pub equipment_type_id: Uuid,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub current_base_id: Uuid,
    pub status: AssetStatusDb,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
}

impl From<AssetEntity> for Asset {
    fn from(entity: AssetEntity) -> Self {
        Self {
            id: entity.id,
            serial_number: entity.serial_number,
            equipment_type_id: entity.equipment_type_id,
            model: entity.model,
            manufacturer: entity.manufacturer,
            current_base_id: entity.current_base_id,
            status: entity.status.into(),
            created_at: entity.created_at,
            last_updated_at: entity.last_updated_at,
        }
    }
}

/// Asset joined with its equipment type and base names.
#[derive(Debug, Clone, FromRow)]
pub struct AssetSummaryEntity {
    #[sqlx(flatten)]
    pub asset: AssetEntity,
    pub equipment_type_name: String,
    pub base_name: String,
}

impl From<AssetSummaryEntity> for AssetSummary {
    fn from(entity: AssetSummaryEntity) -> Self {
        Self {
            asset: entity.asset.into(),
            equipment_type_name: entity.equipment_type_name,
            base_name: entity.base_name,
        }
    }
}
