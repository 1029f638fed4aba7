//! Purchase history models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable record of an acquisition into a base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub base_id: Uuid,
    pub quantity: i32,
    pub unit_cost: Option<Decimal>,
    pub total_cost: Option<Decimal>,
    pub purchased_by: Uuid,
    pub purchase_date: DateTime<Utc>,
}

/// Request payload for `POST /purchases`.
///
/// Required fields are optional here so a missing field yields a
/// descriptive 400 instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordPurchaseRequest {
    pub asset_id: Option<Uuid>,
    pub base_id: Option<Uuid>,
    pub quantity: Option<i32>,
    pub unit_cost: Option<Decimal>,
    pub total_cost: Option<Decimal>,
}

/// Flattened purchase row for history listings.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseHistoryItem {
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

/// Query parameters for `GET /purchases`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPurchasesQuery {
    pub date: Option<NaiveDate>,
    pub base_id: Option<Uuid>,
    pub equipment_type_id: Option<Uuid>,
}
