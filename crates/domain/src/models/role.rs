//! Roles and the authenticated principal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Role carried by every principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    BaseCommander,
    LogisticsOfficer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::BaseCommander => "base_commander",
            Role::LogisticsOfficer => "logistics_officer",
        }
    }

    /// Returns true if this role sees every base.
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Role::Admin | Role::LogisticsOfficer)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "base_commander" => Ok(Role::BaseCommander),
            "logistics_officer" => Ok(Role::LogisticsOfficer),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The caller of an operation, resolved from a validated bearer token.
///
/// Passed explicitly into every recorder and query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: Role,
    pub base_id: Option<Uuid>,
}

impl Principal {
    pub fn new(user_id: Uuid, role: Role, base_id: Option<Uuid>) -> Self {
        Self {
            user_id,
            role,
            base_id,
        }
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}
