//! Repository implementations for database operations.

pub(crate) mod filter;

pub mod asset;
pub mod assignment;
pub mod audit_log;
pub mod balance;
pub mod base;
pub mod dashboard;
pub mod equipment_type;
pub mod expenditure;
pub mod purchase;
pub mod transfer;
pub mod user;

pub use asset::{AssetInput, AssetPatch, AssetRepository};
pub use assignment::AssignmentRepository;
pub use audit_log::AuditLogRepository;
pub use balance::{BalanceRepository, RolloverOutcome};
pub use base::BaseRepository;
pub use dashboard::DashboardRepository;
pub use equipment_type::EquipmentTypeRepository;
pub use expenditure::ExpenditureRepository;
pub use purchase::PurchaseRepository;
pub use transfer::{TransferListFilter, TransferRepository};
pub use user::UserRepository;
