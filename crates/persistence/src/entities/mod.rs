//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod asset;
pub mod assignment;
pub mod audit_log;
pub mod balance;
pub mod base;
pub mod expenditure;
pub mod purchase;
pub mod transfer;
pub mod user;

pub use asset::{AssetEntity, AssetStatusDb, AssetSummaryEntity};
pub use assignment::{AssignmentEntity, AssignmentHistoryEntity, AssignmentStatusDb};
pub use audit_log::AuditLogEntity;
pub use balance::{AssetBalanceEntity, DashboardTotalsEntity, NetMovementDetailEntity};
pub use base::{BaseEntity, EquipmentTypeEntity};
pub use expenditure::{ExpenditureEntity, ExpenditureHistoryEntity};
pub use purchase::{PurchaseEntity, PurchaseHistoryEntity};
pub use transfer::{TransferEntity, TransferHistoryEntity, TransferStatusDb};
pub use user::{UserEntity, UserRoleDb};
