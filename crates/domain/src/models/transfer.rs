//! Transfer history models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Status of a transfer.
///
/// Transfers are recorded as `Completed` immediately; the in-flight states
/// are part of the stored vocabulary only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    Pending,
    InTransit,
    Completed,
    Cancelled,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Pending => "pending",
            TransferStatus::InTransit => "in_transit",
            TransferStatus::Completed => "completed",
            TransferStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for TransferStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TransferStatus::Pending),
            "in_transit" => Ok(TransferStatus::InTransit),
            "completed" => Ok(TransferStatus::Completed),
            "cancelled" => Ok(TransferStatus::Cancelled),
            _ => Err(format!("Invalid transfer status: {}", s)),
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub from_base_id: Uuid,
    pub to_base_id: Uuid,
    pub quantity: i32,
    pub status: TransferStatus,
    pub transferred_by: Uuid,
    pub transfer_date: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Request payload for `POST /transfers`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordTransferRequest {
    pub asset_id: Option<Uuid>,
    pub from_base_id: Option<Uuid>,
    pub to_base_id: Option<Uuid>,
    pub quantity: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferHistoryItem {
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
    pub status: TransferStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub transferred_by_username: Option<String>,
}

/// Query parameters for `GET /transfers`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTransfersQuery {
    pub date: Option<NaiveDate>,
    pub from_base_id: Option<Uuid>,
    pub to_base_id: Option<Uuid>,
    pub equipment_type_id: Option<Uuid>,
}
