//! Assignment models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Active,
    Returned,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Active => "active",
            AssignmentStatus::Returned => "returned",
        }
    }
}

impl FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(AssignmentStatus::Active),
            "returned" => Ok(AssignmentStatus::Returned),
            _ => Err(format!("Invalid assignment status: {}", s)),
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An asset handed to a person.
///
/// `return_date` stays empty; no operation closes an assignment yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub assigned_to_user_id: Uuid,
    pub assigned_by: Uuid,
    pub status: AssignmentStatus,
    pub assigned_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

/// Request payload for `POST /assignments`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignAssetRequest {
    pub asset_id: Option<Uuid>,
    pub assigned_to_user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentHistoryItem {
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
    pub status: AssignmentStatus,
    pub return_date: Option<DateTime<Utc>>,
}

/// Query parameters for `GET /assignments`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAssignmentsQuery {
    pub date: Option<NaiveDate>,
    pub base_id: Option<Uuid>,
    pub equipment_type_id: Option<Uuid>,
    pub assigned_to_user_id: Option<Uuid>,
}
