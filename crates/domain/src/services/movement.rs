//! Business rules for the four inventory movements.
//!
//! Each recorder runs the same pipeline:
//! request → command (field presence, quantity, costs) → asset rules →
//! history row → ledger postings. The rules here are pure; the api crate
//! runs them inside one database transaction.

use rust_decimal::Decimal;
use shared::validation::{
    validate_cost, validate_quantity, COST_TOO_LARGE, MAX_COST, MAX_MOVEMENT_QUANTITY,
    QUANTITY_TOO_LARGE,
};
use thiserror::Error;
use uuid::Uuid;

use crate::models::assignment::AssignAssetRequest;
use crate::models::expenditure::RecordExpenditureRequest;
use crate::models::purchase::RecordPurchaseRequest;
use crate::models::transfer::RecordTransferRequest;
use crate::models::{Asset, AssetStatus, BalanceDelta, BalanceField, Principal, Role};

/// Why a movement was refused before anything was written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MovementRejection {
    #[error("{0}")]
    MissingFields(&'static str),

    #[error("Quantity must be a positive number.")]
    InvalidQuantity,

    #[error("Quantity cannot exceed {}.", MAX_MOVEMENT_QUANTITY)]
    QuantityTooLarge,

    #[error("Cost cannot be negative.")]
    NegativeCost,

    #[error("Cost cannot exceed {}.", MAX_COST)]
    CostTooLarge,

    #[error("Cannot transfer an asset to the same base.")]
    SameBase,

    #[error("Asset not found.")]
    AssetNotFound,

    #[error("Base not found.")]
    BaseNotFound,

    #[error("Asset is not currently at the specified 'from' base ({expected}). It is at {actual}.")]
    AssetNotAtBase { expected: Uuid, actual: Uuid },

    #[error("Cannot transfer an expended asset.")]
    TransferOfExpended,

    #[error("Asset is not available for assignment. Current status: {0}.")]
    NotAvailable(AssetStatus),

    #[error("Assigned user not found.")]
    AssignedUserNotFound,

    #[error("Asset is already marked as expended.")]
    AlreadyExpended,

    #[error("Access denied. You can only assign assets from your assigned base.")]
    AssignOutsideBase,

    #[error("Access denied. You can only record expenditures for assets at your assigned base.")]
    ExpendOutsideBase,
}

/// Coarse category of a rejection, used for status-code mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    Validation,
    NotFound,
    Forbidden,
}

impl MovementRejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            MovementRejection::AssetNotFound | MovementRejection::BaseNotFound => {
                RejectionKind::NotFound
            }
            MovementRejection::AssignOutsideBase | MovementRejection::ExpendOutsideBase => {
                RejectionKind::Forbidden
            }
            _ => RejectionKind::Validation,
        }
    }
}

fn check_quantity(quantity: i32) -> Result<i32, MovementRejection> {
    validate_quantity(quantity).map_err(|e| {
        if e.code == QUANTITY_TOO_LARGE {
            MovementRejection::QuantityTooLarge
        } else {
            MovementRejection::InvalidQuantity
        }
    })?;
    Ok(quantity)
}

fn check_cost(cost: Option<Decimal>) -> Result<Option<Decimal>, MovementRejection> {
    if let Some(ref value) = cost {
        validate_cost(value).map_err(|e| {
            if e.code == COST_TOO_LARGE {
                MovementRejection::CostTooLarge
            } else {
                MovementRejection::NegativeCost
            }
        })?;
    }
    Ok(cost)
}

/// A validated purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseCommand {
    pub asset_id: Uuid,
    pub base_id: Uuid,
    pub quantity: i32,
    pub unit_cost: Option<Decimal>,
    pub total_cost: Option<Decimal>,
}

impl RecordPurchaseRequest {
    /// Validates the payload. A missing total cost is derived from the unit cost.
    pub fn into_command(self) -> Result<PurchaseCommand, MovementRejection> {
        let (Some(asset_id), Some(base_id), Some(quantity)) =
            (self.asset_id, self.base_id, self.quantity)
        else {
            return Err(MovementRejection::MissingFields(
                "Asset ID, Base ID, and Quantity are required.",
            ));
        };
        let quantity = check_quantity(quantity)?;
        let unit_cost = check_cost(self.unit_cost)?;
        let total_cost = match (check_cost(self.total_cost)?, unit_cost) {
            (Some(total), _) => Some(total),
            (None, Some(unit)) => {
                let derived = unit
                    .checked_mul(Decimal::from(quantity))
                    .ok_or(MovementRejection::CostTooLarge)?;
                check_cost(Some(derived))?
            }
            (None, None) => None,
        };

        Ok(PurchaseCommand {
            asset_id,
            base_id,
            quantity,
            unit_cost,
            total_cost,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferCommand {
    pub asset_id: Uuid,
    pub from_base_id: Uuid,
    pub to_base_id: Uuid,
    pub quantity: i32,
}

impl RecordTransferRequest {
    pub fn into_command(self) -> Result<TransferCommand, MovementRejection> {
        let (Some(asset_id), Some(from_base_id), Some(to_base_id), Some(quantity)) =
            (self.asset_id, self.from_base_id, self.to_base_id, self.quantity)
        else {
            return Err(MovementRejection::MissingFields(
                "Asset ID, From Base ID, To Base ID, and Quantity are required.",
            ));
        };
        if from_base_id == to_base_id {
            return Err(MovementRejection::SameBase);
        }
        let quantity = check_quantity(quantity)?;

        Ok(TransferCommand {
            asset_id,
            from_base_id,
            to_base_id,
            quantity,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentCommand {
    pub asset_id: Uuid,
    pub assigned_to_user_id: Uuid,
}

impl AssignAssetRequest {
    pub fn into_command(self) -> Result<AssignmentCommand, MovementRejection> {
        match (self.asset_id, self.assigned_to_user_id) {
            (Some(asset_id), Some(assigned_to_user_id)) => Ok(AssignmentCommand {
                asset_id,
                assigned_to_user_id,
            }),
            _ => Err(MovementRejection::MissingFields(
                "Asset ID and Assigned To User ID are required.",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenditureCommand {
    pub asset_id: Uuid,
    pub quantity: i32,
    pub reason: Option<String>,
}

impl RecordExpenditureRequest {
    pub fn into_command(self) -> Result<ExpenditureCommand, MovementRejection> {
        let (Some(asset_id), Some(quantity)) = (self.asset_id, self.quantity) else {
            return Err(MovementRejection::MissingFields(
                "Asset ID and Quantity are required.",
            ));
        };
        let quantity = check_quantity(quantity)?;

        Ok(ExpenditureCommand {
            asset_id,
            quantity,
            reason: self.reason.filter(|r| !r.trim().is_empty()),
        })
    }
}

/// The asset must sit at the declared source base and must not be expended.
pub fn check_transfer_source(asset: &Asset, from_base_id: Uuid) -> Result<(), MovementRejection> {
    if asset.current_base_id != from_base_id {
        return Err(MovementRejection::AssetNotAtBase {
            expected: from_base_id,
            actual: asset.current_base_id,
        });
    }
    if asset.status == AssetStatus::Expended {
        return Err(MovementRejection::TransferOfExpended);
    }
    Ok(())
}

fn is_foreign_base(principal: &Principal, asset: &Asset) -> bool {
    principal.role == Role::BaseCommander && principal.base_id != Some(asset.current_base_id)
}

/// Status is checked before base ownership.
pub fn check_assignable(principal: &Principal, asset: &Asset) -> Result<(), MovementRejection> {
    if asset.status != AssetStatus::Available {
        return Err(MovementRejection::NotAvailable(asset.status));
    }
    if is_foreign_base(principal, asset) {
        return Err(MovementRejection::AssignOutsideBase);
    }
    Ok(())
}

pub fn check_expendable(principal: &Principal, asset: &Asset) -> Result<(), MovementRejection> {
    if asset.status == AssetStatus::Expended {
        return Err(MovementRejection::AlreadyExpended);
    }
    if is_foreign_base(principal, asset) {
        return Err(MovementRejection::ExpendOutsideBase);
    }
    Ok(())
}

/// One counter increment against the balance row for (today, base, asset type).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerPosting {
    pub base_id: Uuid,
    pub field: BalanceField,
    pub quantity: i32,
}

impl LedgerPosting {
    pub fn new(base_id: Uuid, field: BalanceField, quantity: i32) -> Self {
        Self {
            base_id,
            field,
            quantity,
        }
    }

    pub fn delta(&self) -> BalanceDelta {
        BalanceDelta::for_field(self.field, self.quantity)
    }
}

pub fn purchase_postings(command: &PurchaseCommand) -> Vec<LedgerPosting> {
    vec![LedgerPosting::new(
        command.base_id,
        BalanceField::Purchases,
        command.quantity,
    )]
}

/// Outbound posting first, then inbound.
pub fn transfer_postings(command: &TransferCommand) -> Vec<LedgerPosting> {
    vec![
        LedgerPosting::new(
            command.from_base_id,
            BalanceField::TransfersOut,
            command.quantity,
        ),
        LedgerPosting::new(
            command.to_base_id,
            BalanceField::TransfersIn,
            command.quantity,
        ),
    ]
}

/// Postings ordered by base id. Every movement takes its balance row locks
/// in this order, so two transfers between the same bases cannot deadlock.
pub fn lock_order(postings: &[LedgerPosting]) -> Vec<LedgerPosting> {
    let mut ordered = postings.to_vec();
    ordered.sort_by_key(|posting| posting.base_id);
    ordered
}

/// Assignment always counts one unit at the asset's current base.
pub fn assignment_postings(asset: &Asset) -> Vec<LedgerPosting> {
    vec![LedgerPosting::new(
        asset.current_base_id,
        BalanceField::Assigned,
        1,
    )]
}

pub fn expenditure_postings(asset: &Asset, command: &ExpenditureCommand) -> Vec<LedgerPosting> {
    vec![LedgerPosting::new(
        asset.current_base_id,
        BalanceField::Expended,
        command.quantity,
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;

    fn asset_at(base_id: Uuid, status: AssetStatus) -> Asset {
        Asset {
            id: Uuid::new_v4(),
            serial_number: "SN-1".to_string(),
            equipment_type_id: Uuid::new_v4(),
            model: None,
            manufacturer: None,
            current_base_id: base_id,
            status,
            created_at: Utc::now(),
            last_updated_at: Utc::now(),
        }
    }

    fn purchase_request(quantity: Option<i32>) -> RecordPurchaseRequest {
        RecordPurchaseRequest {
            asset_id: Some(Uuid::new_v4()),
            base_id: Some(Uuid::new_v4()),
            quantity,
            unit_cost: None,
            total_cost: None,
        }
    }

    #[test]
    fn test_purchase_missing_fields() {
        let err = purchase_request(None).into_command().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Asset ID, Base ID, and Quantity are required."
        );
        assert_eq!(err.kind(), RejectionKind::Validation);
    }

    #[test]
    fn test_purchase_rejects_non_positive_quantity() {
        for quantity in [0, -1] {
            assert_eq!(
                purchase_request(Some(quantity)).into_command(),
                Err(MovementRejection::InvalidQuantity)
            );
        }
    }

    #[test]
    fn test_purchase_derives_total_cost() {
        let mut request = purchase_request(Some(4));
        request.unit_cost = Some(Decimal::from_str("12.50").unwrap());
        let command = request.into_command().unwrap();
        assert_eq!(command.total_cost, Some(Decimal::from_str("50.00").unwrap()));
    }

    #[test]
    fn test_purchase_keeps_explicit_total_cost() {
        let mut request = purchase_request(Some(2));
        request.unit_cost = Some(Decimal::from(10));
        request.total_cost = Some(Decimal::from(15));
        let command = request.into_command().unwrap();
        assert_eq!(command.total_cost, Some(Decimal::from(15)));
    }

    #[test]
    fn test_purchase_rejects_negative_cost() {
        let mut request = purchase_request(Some(1));
        request.unit_cost = Some(Decimal::from(-1));
        assert_eq!(request.into_command(), Err(MovementRejection::NegativeCost));
    }

    #[test]
    fn test_purchase_rejects_quantity_over_cap() {
        let err = purchase_request(Some(MAX_MOVEMENT_QUANTITY + 1))
            .into_command()
            .unwrap_err();
        assert_eq!(err, MovementRejection::QuantityTooLarge);
        assert_eq!(err.to_string(), "Quantity cannot exceed 1000000.");
        assert_eq!(err.kind(), RejectionKind::Validation);
    }

    #[test]
    fn test_purchase_huge_unit_cost_is_rejected_not_overflowed() {
        let mut request = purchase_request(Some(2));
        request.unit_cost = Some(Decimal::MAX);
        assert_eq!(request.into_command(), Err(MovementRejection::CostTooLarge));
    }

    #[test]
    fn test_purchase_derived_total_must_fit_cost_column() {
        let mut request = purchase_request(Some(10));
        request.unit_cost = Some(Decimal::from_str("500000000000.00").unwrap());
        let err = request.into_command().unwrap_err();
        assert_eq!(err, MovementRejection::CostTooLarge);
        assert_eq!(err.to_string(), "Cost cannot exceed 999999999999.99.");
    }

    #[test]
    fn test_purchase_rejects_explicit_total_over_range() {
        let mut request = purchase_request(Some(1));
        request.total_cost = Some(Decimal::from_str("1000000000000").unwrap());
        assert_eq!(request.into_command(), Err(MovementRejection::CostTooLarge));
    }

    #[test]
    fn test_transfer_same_base_checked_before_quantity() {
        let base = Uuid::new_v4();
        let request = RecordTransferRequest {
            asset_id: Some(Uuid::new_v4()),
            from_base_id: Some(base),
            to_base_id: Some(base),
            quantity: Some(0),
        };
        assert_eq!(request.into_command(), Err(MovementRejection::SameBase));
    }

    #[test]
    fn test_transfer_missing_fields_message() {
        let err = RecordTransferRequest::default().into_command().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Asset ID, From Base ID, To Base ID, and Quantity are required."
        );
    }

    #[test]
    fn test_assignment_and_expenditure_missing_fields() {
        let err = AssignAssetRequest {
            asset_id: Some(Uuid::new_v4()),
            assigned_to_user_id: None,
        }
        .into_command()
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Asset ID and Assigned To User ID are required."
        );

        let err = RecordExpenditureRequest::default()
            .into_command()
            .unwrap_err();
        assert_eq!(err.to_string(), "Asset ID and Quantity are required.");
    }

    #[test]
    fn test_expenditure_blank_reason_dropped() {
        let command = RecordExpenditureRequest {
            asset_id: Some(Uuid::new_v4()),
            quantity: Some(1),
            reason: Some("   ".to_string()),
        }
        .into_command()
        .unwrap();
        assert_eq!(command.reason, None);
    }

    #[test]
    fn test_transfer_source_checks_location_before_status() {
        let here = Uuid::new_v4();
        let elsewhere = Uuid::new_v4();
        let expended = asset_at(elsewhere, AssetStatus::Expended);

        let err = check_transfer_source(&expended, here).unwrap_err();
        assert_eq!(
            err,
            MovementRejection::AssetNotAtBase {
                expected: here,
                actual: elsewhere
            }
        );
        assert!(err.to_string().contains(&elsewhere.to_string()));

        assert_eq!(
            check_transfer_source(&asset_at(here, AssetStatus::Expended), here),
            Err(MovementRejection::TransferOfExpended)
        );
        assert!(check_transfer_source(&asset_at(here, AssetStatus::Assigned), here).is_ok());
    }

    #[test]
    fn test_assignable_rules() {
        let own = Uuid::new_v4();
        let commander = Principal::new(Uuid::new_v4(), Role::BaseCommander, Some(own));

        let err = check_assignable(&commander, &asset_at(own, AssetStatus::Assigned)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Asset is not available for assignment. Current status: assigned."
        );

        let foreign = asset_at(Uuid::new_v4(), AssetStatus::Available);
        let err = check_assignable(&commander, &foreign).unwrap_err();
        assert_eq!(err, MovementRejection::AssignOutsideBase);
        assert_eq!(err.kind(), RejectionKind::Forbidden);

        let admin = Principal::new(Uuid::new_v4(), Role::Admin, None);
        assert!(check_assignable(&admin, &foreign).is_ok());
    }

    #[test]
    fn test_expendable_rules() {
        let own = Uuid::new_v4();
        let commander = Principal::new(Uuid::new_v4(), Role::BaseCommander, Some(own));

        assert_eq!(
            check_expendable(&commander, &asset_at(own, AssetStatus::Expended)),
            Err(MovementRejection::AlreadyExpended)
        );
        assert!(check_expendable(&commander, &asset_at(own, AssetStatus::Assigned)).is_ok());
        assert_eq!(
            check_expendable(
                &commander,
                &asset_at(Uuid::new_v4(), AssetStatus::Available)
            ),
            Err(MovementRejection::ExpendOutsideBase)
        );
    }

    #[test]
    fn test_transfer_postings_order_and_fields() {
        let command = TransferCommand {
            asset_id: Uuid::new_v4(),
            from_base_id: Uuid::new_v4(),
            to_base_id: Uuid::new_v4(),
            quantity: 3,
        };
        let postings = transfer_postings(&command);
        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].base_id, command.from_base_id);
        assert_eq!(postings[0].delta().closing_balance, -3);
        assert_eq!(postings[1].base_id, command.to_base_id);
        assert_eq!(postings[1].delta().transfers_in, 3);
    }

    #[test]
    fn test_opposite_transfers_post_in_the_same_order() {
        let (low, high) = {
            let a = Uuid::new_v4();
            let b = Uuid::new_v4();
            if a < b {
                (a, b)
            } else {
                (b, a)
            }
        };
        let outbound = transfer_postings(&TransferCommand {
            asset_id: Uuid::new_v4(),
            from_base_id: low,
            to_base_id: high,
            quantity: 1,
        });
        let inbound = transfer_postings(&TransferCommand {
            asset_id: Uuid::new_v4(),
            from_base_id: high,
            to_base_id: low,
            quantity: 1,
        });

        let first: Vec<Uuid> = lock_order(&outbound).iter().map(|p| p.base_id).collect();
        let second: Vec<Uuid> = lock_order(&inbound).iter().map(|p| p.base_id).collect();
        assert_eq!(first, vec![low, high]);
        assert_eq!(second, vec![low, high]);

        // Reordering keeps each base's own delta.
        let ordered = lock_order(&inbound);
        assert_eq!(ordered[0].field, BalanceField::TransfersIn);
        assert_eq!(ordered[1].field, BalanceField::TransfersOut);
    }

    #[test]
    fn test_assignment_posting_counts_one() {
        let asset = asset_at(Uuid::new_v4(), AssetStatus::Available);
        let postings = assignment_postings(&asset);
        assert_eq!(
            postings,
            vec![LedgerPosting::new(
                asset.current_base_id,
                BalanceField::Assigned,
                1
            )]
        );
        assert_eq!(postings[0].delta().closing_balance, 0);
    }

    #[test]
    fn test_not_found_kinds() {
        assert_eq!(MovementRejection::AssetNotFound.kind(), RejectionKind::NotFound);
        assert_eq!(MovementRejection::BaseNotFound.kind(), RejectionKind::NotFound);
        assert_eq!(
            MovementRejection::AssignedUserNotFound.kind(),
            RejectionKind::Validation
        );
    }
}
