//! Domain models for the asset ledger.

pub mod asset;
pub mod assignment;
pub mod audit_log;
pub mod balance;
pub mod base;
pub mod dashboard;
pub mod equipment_type;
pub mod expenditure;
pub mod purchase;
pub mod role;
pub mod transfer;
pub mod user;

pub use asset::{Asset, AssetDetails, AssetStatus, AssetSummary};
pub use assignment::{Assignment, AssignmentStatus};
pub use audit_log::{AuditAction, AuditEntityType, AuditLog, CreateAuditLogInput};
pub use balance::{AssetBalance, BalanceDelta, BalanceField};
pub use base::Base;
pub use dashboard::{DashboardMetrics, NetMovementDetail};
pub use equipment_type::EquipmentType;
pub use expenditure::Expenditure;
pub use purchase::Purchase;
pub use role::{Principal, Role};
pub use transfer::{Transfer, TransferStatus};
pub use user::User;
