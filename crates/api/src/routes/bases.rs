//! Base (site) routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::base::{CreateBaseRequest, UpdateBaseRequest};
use domain::models::{AuditAction, AuditEntityType, Base, Role};
use domain::services::{audit_helpers, require_role};
use persistence::repositories::{BaseRepository, UserRepository};
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::{ApiError, FOREIGN_KEY_VIOLATION, UNIQUE_VIOLATION};
use crate::extractors::ClientIp;
use crate::middleware::UserAuth;
use crate::routes::record_audit;

const DUPLICATE_NAME: &str = "Base with that name already exists.";

fn base_not_found() -> ApiError {
    ApiError::NotFound("Base not found.".to_string())
}

async fn ensure_commander_exists(state: &AppState, user_id: Option<Uuid>) -> Result<(), ApiError> {
    if let Some(id) = user_id {
        if UserRepository::new(state.pool.clone())
            .find_by_id(id)
            .await?
            .is_none()
        {
            return Err(ApiError::Validation("Commander user not found.".to_string()));
        }
    }
    Ok(())
}

/// GET /api/v1/bases
pub async fn list_bases(
    State(state): State<AppState>,
    _auth: UserAuth,
) -> Result<Json<Vec<Base>>, ApiError> {
    let bases = BaseRepository::new(state.pool.clone()).list().await?;
    Ok(Json(bases.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/bases/:base_id
pub async fn get_base(
    State(state): State<AppState>,
    _auth: UserAuth,
    Path(base_id): Path<Uuid>,
) -> Result<Json<Base>, ApiError> {
    let base = BaseRepository::new(state.pool.clone())
        .find_by_id(base_id)
        .await?
        .ok_or_else(base_not_found)?;
    Ok(Json(base.into()))
}

/// POST /api/v1/bases
pub async fn create_base(
    State(state): State<AppState>,
    auth: UserAuth,
    ClientIp(source_ip): ClientIp,
    Json(request): Json<CreateBaseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let principal = auth.principal()?;
    require_role(&principal, &[Role::Admin])?;
    request.validate()?;
    ensure_commander_exists(&state, request.commander_user_id).await?;

    let base: Base = BaseRepository::new(state.pool.clone())
        .create(
            request.name.trim(),
            request.location.trim(),
            request.commander_user_id,
        )
        .await
        .map_err(|e| ApiError::conflict_on(e, UNIQUE_VIOLATION, DUPLICATE_NAME))?
        .into();

    info!(base_id = %base.id, name = %base.name, user_id = %principal.user_id, "Base created");
    record_audit(
        &state,
        audit_helpers::reference_changed(
            principal.user_id,
            AuditAction::BaseCreated,
            AuditEntityType::Base,
            base.id,
            json!({ "name": base.name, "location": base.location }),
        ),
        source_ip,
    );

    Ok((StatusCode::CREATED, Json(base)))
}

/// PUT /api/v1/bases/:base_id
pub async fn update_base(
    State(state): State<AppState>,
    auth: UserAuth,
    ClientIp(source_ip): ClientIp,
    Path(base_id): Path<Uuid>,
    Json(request): Json<UpdateBaseRequest>,
) -> Result<Json<Base>, ApiError> {
    let principal = auth.principal()?;
    require_role(&principal, &[Role::Admin])?;
    request.validate()?;
    ensure_commander_exists(&state, request.commander_user_id).await?;

    let base: Base = BaseRepository::new(state.pool.clone())
        .update(
            base_id,
            request.name.as_deref().map(str::trim),
            request.location.as_deref().map(str::trim),
            request.commander_user_id,
        )
        .await
        .map_err(|e| ApiError::conflict_on(e, UNIQUE_VIOLATION, DUPLICATE_NAME))?
        .ok_or_else(base_not_found)?
        .into();

    record_audit(
        &state,
        audit_helpers::reference_changed(
            principal.user_id,
            AuditAction::BaseUpdated,
            AuditEntityType::Base,
            base.id,
            json!({
                "name": request.name,
                "location": request.location,
                "commander_user_id": request.commander_user_id,
            }),
        ),
        source_ip,
    );

    Ok(Json(base))
}

/// DELETE /api/v1/bases/:base_id
///
/// Refused while assets sit at the base or movement history points at it.
pub async fn delete_base(
    State(state): State<AppState>,
    auth: UserAuth,
    ClientIp(source_ip): ClientIp,
    Path(base_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let principal = auth.principal()?;
    require_role(&principal, &[Role::Admin])?;

    let repo = BaseRepository::new(state.pool.clone());
    if !repo.exists(base_id).await? {
        return Err(base_not_found());
    }
    if repo.count_assets(base_id).await? > 0 {
        return Err(ApiError::Conflict(
            "Cannot delete base: Assets are currently located at it.".to_string(),
        ));
    }

    let deleted = repo.delete(base_id).await.map_err(|e| {
        ApiError::conflict_on(
            e,
            FOREIGN_KEY_VIOLATION,
            "Cannot delete base: Movement or balance records reference it.",
        )
    })?;
    if !deleted {
        return Err(base_not_found());
    }

    info!(base_id = %base_id, user_id = %principal.user_id, "Base deleted");
    record_audit(
        &state,
        audit_helpers::reference_changed(
            principal.user_id,
            AuditAction::BaseDeleted,
            AuditEntityType::Base,
            base_id,
            json!({}),
        ),
        source_ip,
    );

    Ok(StatusCode::NO_CONTENT)
}
