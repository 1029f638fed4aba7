//! Base (organizational site) domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A site holding assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Base {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub commander_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a base.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBaseRequest {
    #[validate(
        length(min = 1, max = 255, message = "Base name must be 1-255 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: String,

    pub commander_user_id: Option<Uuid>,
}

/// Request payload for updating a base. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBaseRequest {
    #[validate(length(min = 1, max = 255, message = "Base name must be 1-255 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: Option<String>,

    pub commander_user_id: Option<Uuid>,
}
