//! HTTP route handlers.

pub mod admin;
pub mod assets;
pub mod assignments;
pub mod bases;
pub mod dashboard;
pub mod equipment_types;
pub mod expenditures;
pub mod health;
pub mod purchases;
pub mod transfers;
pub mod users;

use domain::models::CreateAuditLogInput;
use persistence::repositories::AuditLogRepository;

use crate::app::AppState;

/// Hands a reference-data change to the audit sink without waiting on it.
pub(crate) fn record_audit(
    state: &AppState,
    mut event: CreateAuditLogInput,
    source_ip: Option<String>,
) {
    event.ip_address = source_ip;
    AuditLogRepository::new(state.pool.clone()).insert_async(event);
}
