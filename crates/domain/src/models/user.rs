//! User reference model.
//!
//! Credentials live with the identity service; this is the read-only view
//! used for assignment targets and display names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub base_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
