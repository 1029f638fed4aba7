//! Dashboard aggregate models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Totals over the balance rows in scope. All zero when nothing matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_opening_balance: i64,
    pub total_closing_balance: i64,
    pub total_net_movement: i64,
    pub total_assigned: i64,
    pub total_expended: i64,
}

/// One unaggregated balance row with display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetMovementDetail {
    pub base_id: Uuid,
    pub base_name: String,
    pub equipment_type_id: Uuid,
    pub equipment_type_name: String,
    pub balance_date: NaiveDate,
    pub purchases: i32,
    pub transfers_in: i32,
    pub transfers_out: i32,
}

/// Query parameters shared by the dashboard endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    /// Defaults to today (UTC).
    pub date: Option<NaiveDate>,
    pub base_id: Option<Uuid>,
    pub equipment_type_id: Option<Uuid>,
}
