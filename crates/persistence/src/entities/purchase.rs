//! Purchase entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::purchase::PurchaseHistoryItem;
use domain::models::Purchase;
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the purchases table.
#[derive(Debug, Clone, FromRow)]
pub struct PurchaseEntity {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub base_id: Uuid,
    pub quantity: i32,
    pub unit_cost: Option<Decimal>,
    pub total_cost: Option<Decimal>,
    pub purchased_by: Uuid,
    pub purchase_date: DateTime<Utc>,
}

impl From<PurchaseEntity> for Purchase {
    fn from(entity: PurchaseEntity) -> Self {
        Self {
            id: entity.id,
            asset_id: entity.asset_id,
            base_id: entity.base_id,
            quantity: entity.quantity,
            unit_cost: entity.unit_cost,
            total_cost: entity.total_cost,
            purchased_by: entity.purchased_by,
            purchase_date: entity.purchase_date,
        }
    }
}

/// Purchase row joined with asset, type, base and user names.
#[derive(Debug, Clone, FromRow)]
pub struct PurchaseHistoryEntity {
    pub id: Uuid,
    pub purchase_date: DateTime<Utc>,
    pub asset_id: Uuid,
    pub asset_serial_number: String,
    pub equipment_type_name: String,
    pub base_id: Uuid,
    pub base_name: String,
    pub quantity: i32,
    pub unit_cost: Option<Decimal>,
    pub total_cost: Option<Decimal>,
    pub purchased_by_username: Option<String>,
}

impl From<PurchaseHistoryEntity> for PurchaseHistoryItem {
    fn from(entity: PurchaseHistoryEntity) -> Self {
        Self {
            id: entity.id,
            purchase_date: entity.purchase_date,
            asset_id: entity.asset_id,
            asset_serial_number: entity.asset_serial_number,
            equipment_type_name: entity.equipment_type_name,
            base_id: entity.base_id,
            base_name: entity.base_name,
            quantity: entity.quantity,
            unit_cost: entity.unit_cost,
            total_cost: entity.total_cost,
            purchased_by_username: entity.purchased_by_username,
        }
    }
}
