//! Audit log domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Audited actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    AssetPurchased,
    AssetTransferred,
    AssetAssigned,
    AssetExpended,
    AssetCreated,
    AssetUpdated,
    AssetDeleted,
    BaseCreated,
    BaseUpdated,
    BaseDeleted,
    EquipmentTypeCreated,
    EquipmentTypeUpdated,
    EquipmentTypeDeleted,
    LedgerRolledOver,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::AssetPurchased => "ASSET_PURCHASED",
            AuditAction::AssetTransferred => "ASSET_TRANSFERRED",
            AuditAction::AssetAssigned => "ASSET_ASSIGNED",
            AuditAction::AssetExpended => "ASSET_EXPENDED",
            AuditAction::AssetCreated => "ASSET_CREATED",
            AuditAction::AssetUpdated => "ASSET_UPDATED",
            AuditAction::AssetDeleted => "ASSET_DELETED",
            AuditAction::BaseCreated => "BASE_CREATED",
            AuditAction::BaseUpdated => "BASE_UPDATED",
            AuditAction::BaseDeleted => "BASE_DELETED",
            AuditAction::EquipmentTypeCreated => "EQUIPMENT_TYPE_CREATED",
            AuditAction::EquipmentTypeUpdated => "EQUIPMENT_TYPE_UPDATED",
            AuditAction::EquipmentTypeDeleted => "EQUIPMENT_TYPE_DELETED",
            AuditAction::LedgerRolledOver => "LEDGER_ROLLED_OVER",
        }
    }
}

impl FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = match s.to_uppercase().as_str() {
            "ASSET_PURCHASED" => AuditAction::AssetPurchased,
            "ASSET_TRANSFERRED" => AuditAction::AssetTransferred,
            "ASSET_ASSIGNED" => AuditAction::AssetAssigned,
            "ASSET_EXPENDED" => AuditAction::AssetExpended,
            "ASSET_CREATED" => AuditAction::AssetCreated,
            "ASSET_UPDATED" => AuditAction::AssetUpdated,
            "ASSET_DELETED" => AuditAction::AssetDeleted,
            "BASE_CREATED" => AuditAction::BaseCreated,
            "BASE_UPDATED" => AuditAction::BaseUpdated,
            "BASE_DELETED" => AuditAction::BaseDeleted,
            "EQUIPMENT_TYPE_CREATED" => AuditAction::EquipmentTypeCreated,
            "EQUIPMENT_TYPE_UPDATED" => AuditAction::EquipmentTypeUpdated,
            "EQUIPMENT_TYPE_DELETED" => AuditAction::EquipmentTypeDeleted,
            "LEDGER_ROLLED_OVER" => AuditAction::LedgerRolledOver,
            _ => return Err(format!("Unknown audit action: {}", s)),
        };
        Ok(action)
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of entity an audit event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEntityType {
    Purchase,
    Transfer,
    Assignment,
    Expenditure,
    Asset,
    Base,
    EquipmentType,
    Ledger,
}

impl AuditEntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEntityType::Purchase => "purchase",
            AuditEntityType::Transfer => "transfer",
            AuditEntityType::Assignment => "assignment",
            AuditEntityType::Expenditure => "expenditure",
            AuditEntityType::Asset => "asset",
            AuditEntityType::Base => "base",
            AuditEntityType::EquipmentType => "equipment_type",
            AuditEntityType::Ledger => "ledger",
        }
    }
}

impl fmt::Display for AuditEntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored audit event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<Uuid>,
    pub details: JsonValue,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for appending an audit event.
#[derive(Debug, Clone)]
pub struct CreateAuditLogInput {
    pub user_id: Option<Uuid>,
    pub action: AuditAction,
    pub entity_type: AuditEntityType,
    pub entity_id: Option<Uuid>,
    pub details: JsonValue,
    pub ip_address: Option<String>,
}
