//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Role;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for user_role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum UserRoleDb {
    Admin,
    BaseCommander,
    LogisticsOfficer,
}

impl From<UserRoleDb> for Role {
    fn from(db: UserRoleDb) -> Self {
        match db {
            UserRoleDb::Admin => Self::Admin,
            UserRoleDb::BaseCommander => Self::BaseCommander,
            UserRoleDb::LogisticsOfficer => Self::LogisticsOfficer,
        }
    }
}

impl From<Role> for UserRoleDb {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::BaseCommander => Self::BaseCommander,
            Role::LogisticsOfficer => Self::LogisticsOfficer,
        }
    }
}

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRoleDb,
    pub base_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            role: entity.role.into(),
            base_id: entity.base_id,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_conversion_both_ways() {
        for role in [Role::Admin, Role::BaseCommander, Role::LogisticsOfficer] {
            let db: UserRoleDb = role.into();
            assert_eq!(Role::from(db), role);
        }
    }
}
