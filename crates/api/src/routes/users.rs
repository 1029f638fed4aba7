//! User lookup routes used by assignment pickers.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::{Role, User};
use persistence::repositories::UserRepository;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::UserAuth;

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    _auth: UserAuth,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = UserRepository::new(state.pool.clone()).list().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/users/:user_id
///
/// Admins may read anyone; everyone else only themselves.
pub async fn get_user(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    let principal = auth.principal()?;
    if principal.role != Role::Admin && principal.user_id != user_id {
        return Err(ApiError::Forbidden(
            "Access denied. You can only view your own profile.".to_string(),
        ));
    }

    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".to_string()))?;
    Ok(Json(user.into()))
}
