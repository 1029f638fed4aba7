//! Audit event construction.
//!
//! Route handlers build a [`CreateAuditLogInput`] here and hand it to the
//! repository for asynchronous insertion after their transaction commits.

use crate::models::{AuditAction, AuditEntityType, CreateAuditLogInput};
use serde_json::{json, Map, Value as JsonValue};
use uuid::Uuid;

/// Fluent builder for audit events.
#[derive(Debug, Clone)]
pub struct AuditLogBuilder {
    user_id: Option<Uuid>,
    action: AuditAction,
    entity_type: AuditEntityType,
    entity_id: Option<Uuid>,
    details: Map<String, JsonValue>,
    ip_address: Option<String>,
}

impl AuditLogBuilder {
    /// An event performed by a user.
    pub fn user_action(user_id: Uuid, action: AuditAction, entity_type: AuditEntityType) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::system_action(action, entity_type)
        }
    }

    /// An event performed by a background job.
    pub fn system_action(action: AuditAction, entity_type: AuditEntityType) -> Self {
        Self {
            user_id: None,
            action,
            entity_type,
            entity_id: None,
            details: Map::new(),
            ip_address: None,
        }
    }

    pub fn on_entity(mut self, entity_id: Uuid) -> Self {
        self.entity_id = Some(entity_id);
        self
    }

    /// Add one key to the details object.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Merge every key of a JSON object into the details object.
    pub fn with_details(mut self, details: JsonValue) -> Self {
        if let JsonValue::Object(map) = details {
            self.details.extend(map);
        }
        self
    }

    pub fn with_ip(mut self, ip: Option<String>) -> Self {
        self.ip_address = ip;
        self
    }

    pub fn build(self) -> CreateAuditLogInput {
        CreateAuditLogInput {
            user_id: self.user_id,
            action: self.action,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            details: JsonValue::Object(self.details),
            ip_address: self.ip_address,
        }
    }
}

/// Convenience constructors for the common events.
pub mod audit_helpers {
    use super::*;
    use crate::models::{Assignment, Expenditure, Purchase, Transfer};

    pub fn purchase_recorded(user_id: Uuid, purchase: &Purchase) -> CreateAuditLogInput {
        AuditLogBuilder::user_action(
            user_id,
            AuditAction::AssetPurchased,
            AuditEntityType::Purchase,
        )
        .on_entity(purchase.id)
        .with_details(json!({
            "asset_id": purchase.asset_id,
            "base_id": purchase.base_id,
            "quantity": purchase.quantity,
            "total_cost": purchase.total_cost,
        }))
        .build()
    }

    pub fn transfer_recorded(user_id: Uuid, transfer: &Transfer) -> CreateAuditLogInput {
        AuditLogBuilder::user_action(
            user_id,
            AuditAction::AssetTransferred,
            AuditEntityType::Transfer,
        )
        .on_entity(transfer.id)
        .with_details(json!({
            "asset_id": transfer.asset_id,
            "from_base_id": transfer.from_base_id,
            "to_base_id": transfer.to_base_id,
            "quantity": transfer.quantity,
        }))
        .build()
    }

    pub fn assignment_recorded(
        user_id: Uuid,
        assignment: &Assignment,
        base_id: Uuid,
    ) -> CreateAuditLogInput {
        AuditLogBuilder::user_action(
            user_id,
            AuditAction::AssetAssigned,
            AuditEntityType::Assignment,
        )
        .on_entity(assignment.id)
        .with_details(json!({
            "asset_id": assignment.asset_id,
            "assigned_to_user_id": assignment.assigned_to_user_id,
            "base_id": base_id,
        }))
        .build()
    }

    pub fn expenditure_recorded(user_id: Uuid, expenditure: &Expenditure) -> CreateAuditLogInput {
        AuditLogBuilder::user_action(
            user_id,
            AuditAction::AssetExpended,
            AuditEntityType::Expenditure,
        )
        .on_entity(expenditure.id)
        .with_details(json!({
            "asset_id": expenditure.asset_id,
            "base_id": expenditure.base_id,
            "quantity": expenditure.quantity,
            "reason": expenditure.reason,
        }))
        .build()
    }

    /// Create/update/delete of a reference record.
    pub fn reference_changed(
        user_id: Uuid,
        action: AuditAction,
        entity_type: AuditEntityType,
        entity_id: Uuid,
        details: JsonValue,
    ) -> CreateAuditLogInput {
        AuditLogBuilder::user_action(user_id, action, entity_type)
            .on_entity(entity_id)
            .with_details(details)
            .build()
    }

    /// Day rollover, run either by the scheduler (no user) or by an admin.
    pub fn ledger_rolled_over(
        user_id: Option<Uuid>,
        balance_date: chrono::NaiveDate,
        rows_affected: u64,
    ) -> CreateAuditLogInput {
        let builder = match user_id {
            Some(uid) => AuditLogBuilder::user_action(
                uid,
                AuditAction::LedgerRolledOver,
                AuditEntityType::Ledger,
            ),
            None => {
                AuditLogBuilder::system_action(AuditAction::LedgerRolledOver, AuditEntityType::Ledger)
            }
        };
        builder
            .with_detail("balance_date", balance_date.to_string())
            .with_detail("rows_affected", rows_affected)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Purchase, Transfer, TransferStatus};
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_builder_collects_details() {
        let user_id = Uuid::new_v4();
        let entity_id = Uuid::new_v4();
        let input = AuditLogBuilder::user_action(
            user_id,
            AuditAction::BaseCreated,
            AuditEntityType::Base,
        )
        .on_entity(entity_id)
        .with_detail("name", "Fort Alpha")
        .with_details(json!({"location": "North"}))
        .with_ip(Some("10.0.0.1".to_string()))
        .build();

        assert_eq!(input.user_id, Some(user_id));
        assert_eq!(input.entity_id, Some(entity_id));
        assert_eq!(input.details["name"], "Fort Alpha");
        assert_eq!(input.details["location"], "North");
        assert_eq!(input.ip_address.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_with_details_ignores_non_objects() {
        let input = AuditLogBuilder::system_action(
            AuditAction::LedgerRolledOver,
            AuditEntityType::Ledger,
        )
        .with_details(json!([1, 2, 3]))
        .build();
        assert_eq!(input.details, json!({}));
        assert!(input.user_id.is_none());
    }

    #[test]
    fn test_purchase_recorded() {
        let purchase = Purchase {
            id: Uuid::new_v4(),
            asset_id: Uuid::new_v4(),
            base_id: Uuid::new_v4(),
            quantity: 2,
            unit_cost: None,
            total_cost: None,
            purchased_by: Uuid::new_v4(),
            purchase_date: Utc::now(),
        };
        let input = audit_helpers::purchase_recorded(purchase.purchased_by, &purchase);
        assert_eq!(input.action, AuditAction::AssetPurchased);
        assert_eq!(input.entity_type, AuditEntityType::Purchase);
        assert_eq!(input.entity_id, Some(purchase.id));
        assert_eq!(input.details["quantity"], 2);
    }

    #[test]
    fn test_transfer_recorded_names_both_bases() {
        let transfer = Transfer {
            id: Uuid::new_v4(),
            asset_id: Uuid::new_v4(),
            from_base_id: Uuid::new_v4(),
            to_base_id: Uuid::new_v4(),
            quantity: 1,
            status: TransferStatus::Completed,
            transferred_by: Uuid::new_v4(),
            transfer_date: Utc::now(),
            completed_at: Some(Utc::now()),
        };
        let input = audit_helpers::transfer_recorded(transfer.transferred_by, &transfer);
        assert_eq!(
            input.details["from_base_id"],
            json!(transfer.from_base_id)
        );
        assert_eq!(input.details["to_base_id"], json!(transfer.to_base_id));
    }

    #[test]
    fn test_ledger_rolled_over_system_actor() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let input = audit_helpers::ledger_rolled_over(None, date, 4);
        assert!(input.user_id.is_none());
        assert_eq!(input.details["balance_date"], "2024-05-02");
        assert_eq!(input.details["rows_affected"], 4);
    }
}
