//! Expenditure history models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Immutable record of consumption or write-off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expenditure {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub base_id: Uuid,
    pub quantity: i32,
    pub reason: Option<String>,
    pub expended_by: Uuid,
    pub expenditure_date: DateTime<Utc>,
}

/// Request payload for `POST /expenditures`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RecordExpenditureRequest {
    pub asset_id: Option<Uuid>,
    pub quantity: Option<i32>,

    #[validate(length(max = 1000, message = "Reason cannot exceed 1000 characters"))]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenditureHistoryItem {
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

/// Query parameters for `GET /expenditures`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListExpendituresQuery {
    pub date: Option<NaiveDate>,
    pub base_id: Option<Uuid>,
    pub equipment_type_id: Option<Uuid>,
}
