//! Domain services for the asset ledger.
//!
//! Services contain business logic that operates on domain models.

pub mod access_scope;
pub mod audit;
pub mod movement;

pub use access_scope::{
    require_base_access, require_role, resolve_scope, transfer_scope, BaseScope, ScopeError,
    TransferScope,
};

pub use audit::{audit_helpers, AuditLogBuilder};

pub use movement::{
    assignment_postings, check_assignable, check_expendable, check_transfer_source,
    expenditure_postings, lock_order, purchase_postings, transfer_postings, AssignmentCommand,
    ExpenditureCommand, LedgerPosting, MovementRejection, PurchaseCommand, RejectionKind,
    TransferCommand,
};
