//! Asset registry domain models.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::assignment::Assignment;
use super::expenditure::Expenditure;
use super::purchase::Purchase;
use super::transfer::Transfer;

lazy_static! {
    /// Serial numbers: alphanumeric start, then letters, digits, `-`, `_`, `/` or `.`.
    static ref SERIAL_NUMBER_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9\-_/.]{0,63}$").unwrap();
}

/// Lifecycle status of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Available,
    Assigned,
    Expended,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Available => "available",
            AssetStatus::Assigned => "assigned",
            AssetStatus::Expended => "expended",
        }
    }

    /// Expended is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AssetStatus::Expended)
    }
}

impl FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(AssetStatus::Available),
            "assigned" => Ok(AssetStatus::Assigned),
            "expended" => Ok(AssetStatus::Expended),
            _ => Err(format!("Invalid asset status: {}", s)),
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One serialized, trackable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub serial_number: String,
    pub equipment_type_id: Uuid,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub current_base_id: Uuid,
    pub status: AssetStatus,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
}

/// Asset joined with its display names.
#[derive(Debug, Clone, Serialize)]
pub struct AssetSummary {
    #[serde(flatten)]
    pub asset: Asset,
    pub equipment_type_name: String,
    pub base_name: String,
}

/// Asset with its full movement history, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct AssetDetails {
    #[serde(flatten)]
    pub summary: AssetSummary,
    pub purchases: Vec<Purchase>,
    pub transfers: Vec<Transfer>,
    pub assignments: Vec<Assignment>,
    pub expenditures: Vec<Expenditure>,
}

/// Validates an asset serial number.
pub fn validate_serial_number(serial: &str) -> Result<(), ValidationError> {
    if SERIAL_NUMBER_REGEX.is_match(serial) {
        Ok(())
    } else {
        let mut err = ValidationError::new("serial_number_format");
        err.message = Some(
            "Serial number must be 1-64 characters of letters, digits, '-', '_', '/' or '.'".into(),
        );
        Err(err)
    }
}

/// Request payload for registering an asset.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAssetRequest {
    #[validate(custom(function = "validate_serial_number"))]
    pub serial_number: String,

    pub equipment_type_id: Uuid,

    #[validate(length(max = 255, message = "Model cannot exceed 255 characters"))]
    pub model: Option<String>,

    #[validate(length(max = 255, message = "Manufacturer cannot exceed 255 characters"))]
    pub manufacturer: Option<String>,

    pub current_base_id: Uuid,

    pub status: Option<AssetStatus>,
}

/// Request payload for editing an asset. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAssetRequest {
    #[validate(custom(function = "validate_serial_number"))]
    pub serial_number: Option<String>,

    pub equipment_type_id: Option<Uuid>,

    #[validate(length(max = 255, message = "Model cannot exceed 255 characters"))]
    pub model: Option<String>,

    #[validate(length(max = 255, message = "Manufacturer cannot exceed 255 characters"))]
    pub manufacturer: Option<String>,

    pub current_base_id: Option<Uuid>,

    pub status: Option<AssetStatus>,
}

/// Query parameters for listing assets.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAssetsQuery {
    pub base_id: Option<Uuid>,
    pub equipment_type_id: Option<Uuid>,
    pub status: Option<AssetStatus>,
}
