//! Asset balance entities (database row mappings).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{AssetBalance, DashboardMetrics, NetMovementDetail};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the asset_balances table.
#[derive(Debug, Clone, FromRow)]
pub struct AssetBalanceEntity {
    pub id: Uuid,
    pub balance_date: NaiveDate,
    pub base_id: Uuid,
    pub equipment_type_id: Uuid,
    pub opening_balance: i32,
    pub purchases: i32,
    pub transfers_in: i32,
    pub transfers_out: i32,
    pub assigned: i32,
    pub expended: i32,
    pub closing_balance: i32,
    pub net_movement: i32,
    pub last_calculated_at: DateTime<Utc>,
}

impl From<AssetBalanceEntity> for AssetBalance {
    fn from(entity: AssetBalanceEntity) -> Self {
        Self {
            id: entity.id,
            balance_date: entity.balance_date,
            base_id: entity.base_id,
            equipment_type_id: entity.equipment_type_id,
            opening_balance: entity.opening_balance,
            purchases: entity.purchases,
            transfers_in: entity.transfers_in,
            transfers_out: entity.transfers_out,
            assigned: entity.assigned,
            expended: entity.expended,
            closing_balance: entity.closing_balance,
            net_movement: entity.net_movement,
            last_calculated_at: entity.last_calculated_at,
        }
    }
}

/// Summed dashboard totals. `SUM` over INTEGER yields BIGINT.
#[derive(Debug, Clone, FromRow)]
pub struct DashboardTotalsEntity {
    pub total_opening_balance: i64,
    pub total_closing_balance: i64,
    pub total_net_movement: i64,
    pub total_assigned: i64,
    pub total_expended: i64,
}

impl From<DashboardTotalsEntity> for DashboardMetrics {
    fn from(entity: DashboardTotalsEntity) -> Self {
        Self {
            total_opening_balance: entity.total_opening_balance,
            total_closing_balance: entity.total_closing_balance,
            total_net_movement: entity.total_net_movement,
            total_assigned: entity.total_assigned,
            total_expended: entity.total_expended,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct NetMovementDetailEntity {
    pub base_id: Uuid,
    pub base_name: String,
    pub equipment_type_id: Uuid,
    pub equipment_type_name: String,
    pub balance_date: NaiveDate,
    pub purchases: i32,
    pub transfers_in: i32,
    pub transfers_out: i32,
}

impl From<NetMovementDetailEntity> for NetMovementDetail {
    fn from(entity: NetMovementDetailEntity) -> Self {
        Self {
            base_id: entity.base_id,
            base_name: entity.base_name,
            equipment_type_id: entity.equipment_type_id,
            equipment_type_name: entity.equipment_type_name,
            balance_date: entity.balance_date,
            purchases: entity.purchases,
            transfers_in: entity.transfers_in,
            transfers_out: entity.transfers_out,
        }
    }
}
