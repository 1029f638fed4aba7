//! Equipment type routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::equipment_type::{CreateEquipmentTypeRequest, UpdateEquipmentTypeRequest};
use domain::models::{AuditAction, AuditEntityType, EquipmentType, Role};
use domain::services::{audit_helpers, require_role};
use persistence::repositories::EquipmentTypeRepository;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::{ApiError, FOREIGN_KEY_VIOLATION, UNIQUE_VIOLATION};
use crate::extractors::ClientIp;
use crate::middleware::UserAuth;
use crate::routes::record_audit;

const DUPLICATE_NAME: &str = "Equipment type with that name already exists.";

fn not_found() -> ApiError {
    ApiError::NotFound("Equipment type not found.".to_string())
}

/// GET /api/v1/equipment-types
pub async fn list_equipment_types(
    State(state): State<AppState>,
    _auth: UserAuth,
) -> Result<Json<Vec<EquipmentType>>, ApiError> {
    let types = EquipmentTypeRepository::new(state.pool.clone())
        .list()
        .await?;
    Ok(Json(types.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/equipment-types/:equipment_type_id
pub async fn get_equipment_type(
    State(state): State<AppState>,
    _auth: UserAuth,
    Path(equipment_type_id): Path<Uuid>,
) -> Result<Json<EquipmentType>, ApiError> {
    let equipment_type = EquipmentTypeRepository::new(state.pool.clone())
        .find_by_id(equipment_type_id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(equipment_type.into()))
}

/// POST /api/v1/equipment-types
pub async fn create_equipment_type(
    State(state): State<AppState>,
    auth: UserAuth,
    ClientIp(source_ip): ClientIp,
    Json(request): Json<CreateEquipmentTypeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let principal = auth.principal()?;
    require_role(&principal, &[Role::Admin])?;
    request.validate()?;

    let equipment_type: EquipmentType = EquipmentTypeRepository::new(state.pool.clone())
        .create(request.name.trim(), request.description.as_deref())
        .await
        .map_err(|e| ApiError::conflict_on(e, UNIQUE_VIOLATION, DUPLICATE_NAME))?
        .into();

    record_audit(
        &state,
        audit_helpers::reference_changed(
            principal.user_id,
            AuditAction::EquipmentTypeCreated,
            AuditEntityType::EquipmentType,
            equipment_type.id,
            json!({ "name": equipment_type.name }),
        ),
        source_ip,
    );

    Ok((StatusCode::CREATED, Json(equipment_type)))
}

/// PUT /api/v1/equipment-types/:equipment_type_id
pub async fn update_equipment_type(
    State(state): State<AppState>,
    auth: UserAuth,
    ClientIp(source_ip): ClientIp,
    Path(equipment_type_id): Path<Uuid>,
    Json(request): Json<UpdateEquipmentTypeRequest>,
) -> Result<Json<EquipmentType>, ApiError> {
    let principal = auth.principal()?;
    require_role(&principal, &[Role::Admin])?;
    request.validate()?;

    let equipment_type: EquipmentType = EquipmentTypeRepository::new(state.pool.clone())
        .update(
            equipment_type_id,
            request.name.as_deref().map(str::trim),
            request.description.as_deref(),
        )
        .await
        .map_err(|e| ApiError::conflict_on(e, UNIQUE_VIOLATION, DUPLICATE_NAME))?
        .ok_or_else(not_found)?
        .into();

    record_audit(
        &state,
        audit_helpers::reference_changed(
            principal.user_id,
            AuditAction::EquipmentTypeUpdated,
            AuditEntityType::EquipmentType,
            equipment_type.id,
            json!({ "name": request.name, "description": request.description }),
        ),
        source_ip,
    );

    Ok(Json(equipment_type))
}

/// DELETE /api/v1/equipment-types/:equipment_type_id
pub async fn delete_equipment_type(
    State(state): State<AppState>,
    auth: UserAuth,
    ClientIp(source_ip): ClientIp,
    Path(equipment_type_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let principal = auth.principal()?;
    require_role(&principal, &[Role::Admin])?;

    let repo = EquipmentTypeRepository::new(state.pool.clone());
    if !repo.exists(equipment_type_id).await? {
        return Err(not_found());
    }
    if repo.count_assets(equipment_type_id).await? > 0 {
        return Err(ApiError::Conflict(
            "Cannot delete equipment type: Assets are currently linked to it.".to_string(),
        ));
    }

    let deleted = repo.delete(equipment_type_id).await.map_err(|e| {
        ApiError::conflict_on(
            e,
            FOREIGN_KEY_VIOLATION,
            "Cannot delete equipment type: Balance records reference it.",
        )
    })?;
    if !deleted {
        return Err(not_found());
    }

    record_audit(
        &state,
        audit_helpers::reference_changed(
            principal.user_id,
            AuditAction::EquipmentTypeDeleted,
            AuditEntityType::EquipmentType,
            equipment_type_id,
            json!({}),
        ),
        source_ip,
    );

    Ok(StatusCode::NO_CONTENT)
}
