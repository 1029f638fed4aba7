//! Expenditure entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::expenditure::ExpenditureHistoryItem;
use domain::models::Expenditure;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the expenditures table.
#[derive(Debug, Clone, FromRow)]
pub struct ExpenditureEntity {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub base_id: Uuid,
    pub quantity: i32,
    pub reason: Option<String>,
    pub expended_by: Uuid,
    pub expenditure_date: DateTime<Utc>,
}

impl From<ExpenditureEntity> for Expenditure {
    fn from(entity: ExpenditureEntity) -> Self {
        Self {
            id: entity.id,
            asset_id: entity.asset_id,
            base_id: entity.base_id,
            quantity: entity.quantity,
            reason: entity.reason,
            expended_by: entity.expended_by,
            expenditure_date: entity.expenditure_date,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ExpenditureHistoryEntity {
    pub id: Uuid,
    pub expenditure_date: DateTime<Utc>,
    pub asset_id: Uuid,
    pub asset_serial_number: String,
    pub equipment_type_name: String,
    pub base_id: Uuid,
    pub base_name: String,
    pub quantity: i32,
    pub reason: Option<String>,
    pub expended_by_username: Option<String>,
}

impl From<ExpenditureHistoryEntity> for ExpenditureHistoryItem {
    fn from(entity: ExpenditureHistoryEntity) -> Self {
        Self {
            id: entity.id,
            expenditure_date: entity.expenditure_date,
            asset_id: entity.asset_id,
            asset_serial_number: entity.asset_serial_number,
            equipment_type_name: entity.equipment_type_name,
            base_id: entity.base_id,
            base_name: entity.base_name,
            quantity: entity.quantity,
            reason: entity.reason,
            expended_by_username: entity.expended_by_username,
        }
    }
}
