//! Transfer entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::transfer::TransferHistoryItem;
use domain::models::{Transfer, TransferStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for transfer_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "transfer_status", rename_all = "snake_case")]
pub enum TransferStatusDb {
    Pending,
    InTransit,
    Completed,
    Cancelled,
}

impl From<TransferStatusDb> for TransferStatus {
    fn from(db: TransferStatusDb) -> Self {
        match db {
            TransferStatusDb::Pending => Self::Pending,
            TransferStatusDb::InTransit => Self::InTransit,
            TransferStatusDb::Completed => Self::Completed,
            TransferStatusDb::Cancelled => Self::Cancelled,
        }
    }
}

impl From<TransferStatus> for TransferStatusDb {
    fn from(status: TransferStatus) -> Self {
        match status {
            TransferStatus::Pending => Self::Pending,
            TransferStatus::InTransit => Self::InTransit,
            TransferStatus::Completed => Self::Completed,
            TransferStatus::Cancelled => Self::Cancelled,
        }
    }
}

/// Database row mapping for the transfers table.
#[derive(Debug, Clone, FromRow)]
pub struct TransferEntity {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub from_base_id: Uuid,
    pub to_base_id: Uuid,
    pub quantity: i32,
    pub status: TransferStatusDb,
    pub transferred_by: Uuid,
    pub transfer_date: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<TransferEntity> for Transfer {
    fn from(entity: TransferEntity) -> Self {
        Self {
            id: entity.id,
            asset_id: entity.asset_id,
            from_base_id: entity.from_base_id,
            to_base_id: entity.to_base_id,
            quantity: entity.quantity,
            status: entity.status.into(),
            transferred_by: entity.transferred_by,
            transfer_date: entity.transfer_date,
            completed_at: entity.completed_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct TransferHistoryEntity {
    pub id: Uuid,
    pub transfer_date: DateTime<Utc>,
    pub asset_id: Uuid,
    pub asset_serial_number: String,
    pub equipment_type_name: String,
    pub from_base_id: Uuid,
    pub from_base_name: String,
    pub to_base_id: Uuid,
    pub to_base_name: String,
    pub quantity: i32,
    pub status: TransferStatusDb,
    pub completed_at: Option<DateTime<Utc>>,
    pub transferred_by_username: Option<String>,
}

impl From<TransferHistoryEntity> for TransferHistoryItem {
    fn from(entity: TransferHistoryEntity) -> Self {
        Self {
            id: entity.id,
            transfer_date: entity.transfer_date,
            asset_id: entity.asset_id,
            asset_serial_number: entity.asset_serial_number,
            equipment_type_name: entity.equipment_type_name,
            from_base_id: entity.from_base_id,
            from_base_name: entity.from_base_name,
            to_base_id: entity.to_base_id,
            to_base_name: entity.to_base_name,
            quantity: entity.quantity,
            status: entity.status.into(),
            completed_at: entity.completed_at,
            transferred_by_username: entity.transferred_by_username,
        }
    }
}
