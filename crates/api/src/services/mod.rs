//! Transactional services behind the write endpoints.

pub mod ledger;
pub mod movements;

pub use ledger::LedgerService;
pub use movements::{MovementError, MovementService, PROCUREMENT_ROLES};
