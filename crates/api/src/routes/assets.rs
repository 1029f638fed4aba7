//! Asset registry routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::asset::{CreateAssetRequest, ListAssetsQuery, UpdateAssetRequest};
use domain::models::{
    AssetDetails, AssetStatus, AssetSummary, AuditAction, AuditEntityType, Asset, Role,
};
use domain::services::{audit_helpers, require_base_access, require_role, resolve_scope};
use persistence::entities::AssetStatusDb;
use persistence::repositories::{
    AssetInput, AssetPatch, AssetRepository, AssignmentRepository, BaseRepository,
    EquipmentTypeRepository, ExpenditureRepository, PurchaseRepository, TransferRepository,
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::{ApiError, UNIQUE_VIOLATION};
use crate::extractors::ClientIp;
use crate::middleware::UserAuth;
use crate::routes::record_audit;
use crate::services::PROCUREMENT_ROLES;

const DUPLICATE_SERIAL: &str = "Asset with that serial number already exists.";

fn asset_not_found() -> ApiError {
    ApiError::NotFound("Asset not found.".to_string())
}

/// Referenced base and type must exist; reported as a bad request, not a 404.
async fn ensure_references(
    state: &AppState,
    base_id: Option<Uuid>,
    equipment_type_id: Option<Uuid>,
) -> Result<(), ApiError> {
    if let Some(id) = base_id {
        if !BaseRepository::new(state.pool.clone()).exists(id).await? {
            return Err(ApiError::Validation("Base not found.".to_string()));
        }
    }
    if let Some(id) = equipment_type_id {
        if !EquipmentTypeRepository::new(state.pool.clone())
            .exists(id)
            .await?
        {
            return Err(ApiError::Validation("Equipment type not found.".to_string()));
        }
    }
    Ok(())
}

/// GET /api/v1/assets
pub async fn list_assets(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<ListAssetsQuery>,
) -> Result<Json<Vec<AssetSummary>>, ApiError> {
    let principal = auth.principal()?;
    let scope = resolve_scope(&principal, query.base_id)?;

    let assets = AssetRepository::new(state.pool.clone())
        .list(
            scope.base_id(),
            query.equipment_type_id,
            query.status.map(AssetStatusDb::from),
        )
        .await?;

    Ok(Json(assets.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/assets/:asset_id
pub async fn get_asset(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(asset_id): Path<Uuid>,
) -> Result<Json<AssetSummary>, ApiError> {
    let principal = auth.principal()?;
    let summary: AssetSummary = AssetRepository::new(state.pool.clone())
        .find_summary_by_id(asset_id)
        .await?
        .ok_or_else(asset_not_found)?
        .into();

    require_base_access(&principal, summary.asset.current_base_id)?;
    Ok(Json(summary))
}

/// GET /api/v1/assets/:asset_id/details
///
/// The asset plus every recorded movement, newest first.
pub async fn get_asset_details(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(asset_id): Path<Uuid>,
) -> Result<Json<AssetDetails>, ApiError> {
    let principal = auth.principal()?;
    let summary: AssetSummary = AssetRepository::new(state.pool.clone())
        .find_summary_by_id(asset_id)
        .await?
        .ok_or_else(asset_not_found)?
        .into();
    require_base_access(&principal, summary.asset.current_base_id)?;

    let purchases = PurchaseRepository::new(state.pool.clone());
    let transfers = TransferRepository::new(state.pool.clone());
    let assignments = AssignmentRepository::new(state.pool.clone());
    let expenditures = ExpenditureRepository::new(state.pool.clone());

    let (purchases, transfers, assignments, expenditures) = tokio::try_join!(
        purchases.list_for_asset(asset_id),
        transfers.list_for_asset(asset_id),
        assignments.list_for_asset(asset_id),
        expenditures.list_for_asset(asset_id),
    )?;

    Ok(Json(AssetDetails {
        summary,
        purchases: purchases.into_iter().map(Into::into).collect(),
        transfers: transfers.into_iter().map(Into::into).collect(),
        assignments: assignments.into_iter().map(Into::into).collect(),
        expenditures: expenditures.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/v1/assets
pub async fn create_asset(
    State(state): State<AppState>,
    auth: UserAuth,
    ClientIp(source_ip): ClientIp,
    Json(request): Json<CreateAssetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let principal = auth.principal()?;
    require_role(&principal, PROCUREMENT_ROLES)?;
    request.validate()?;
    ensure_references(
        &state,
        Some(request.current_base_id),
        Some(request.equipment_type_id),
    )
    .await?;

    let status = request.status.unwrap_or(AssetStatus::Available);
    let asset: Asset = AssetRepository::new(state.pool.clone())
        .create(AssetInput {
            serial_number: &request.serial_number,
            equipment_type_id: request.equipment_type_id,
            model: request.model.as_deref(),
            manufacturer: request.manufacturer.as_deref(),
            current_base_id: request.current_base_id,
            status: status.into(),
        })
        .await
        .map_err(|e| ApiError::conflict_on(e, UNIQUE_VIOLATION, DUPLICATE_SERIAL))?
        .into();

    info!(
        asset_id = %asset.id,
        serial_number = %asset.serial_number,
        base_id = %asset.current_base_id,
        user_id = %principal.user_id,
        "Asset registered"
    );
    record_audit(
        &state,
        audit_helpers::reference_changed(
            principal.user_id,
            AuditAction::AssetCreated,
            AuditEntityType::Asset,
            asset.id,
            json!({
                "serial_number": asset.serial_number,
                "equipment_type_id": asset.equipment_type_id,
                "current_base_id": asset.current_base_id,
            }),
        ),
        source_ip,
    );

    Ok((StatusCode::CREATED, Json(asset)))
}

/// PUT /api/v1/assets/:asset_id
///
/// Partial: omitted fields keep their stored value.
pub async fn update_asset(
    State(state): State<AppState>,
    auth: UserAuth,
    ClientIp(source_ip): ClientIp,
    Path(asset_id): Path<Uuid>,
    Json(request): Json<UpdateAssetRequest>,
) -> Result<Json<Asset>, ApiError> {
    let principal = auth.principal()?;
    require_role(&principal, PROCUREMENT_ROLES)?;
    request.validate()?;
    ensure_references(&state, request.current_base_id, request.equipment_type_id).await?;

    let asset: Asset = AssetRepository::new(state.pool.clone())
        .update(
            asset_id,
            AssetPatch {
                serial_number: request.serial_number.as_deref(),
                equipment_type_id: request.equipment_type_id,
                model: request.model.as_deref(),
                manufacturer: request.manufacturer.as_deref(),
                current_base_id: request.current_base_id,
                status: request.status.map(AssetStatusDb::from),
            },
        )
        .await
        .map_err(|e| ApiError::conflict_on(e, UNIQUE_VIOLATION, DUPLICATE_SERIAL))?
        .ok_or_else(asset_not_found)?
        .into();

    record_audit(
        &state,
        audit_helpers::reference_changed(
            principal.user_id,
            AuditAction::AssetUpdated,
            AuditEntityType::Asset,
            asset.id,
            json!({
                "serial_number": request.serial_number,
                "equipment_type_id": request.equipment_type_id,
                "model": request.model,
                "manufacturer": request.manufacturer,
                "current_base_id": request.current_base_id,
                "status": request.status,
            }),
        ),
        source_ip,
    );

    Ok(Json(asset))
}

/// DELETE /api/v1/assets/:asset_id
///
/// Refused once any movement references the asset.
pub async fn delete_asset(
    State(state): State<AppState>,
    auth: UserAuth,
    ClientIp(source_ip): ClientIp,
    Path(asset_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let principal = auth.principal()?;
    require_role(&principal, &[Role::Admin])?;

    let repo = AssetRepository::new(state.pool.clone());
    if repo.find_by_id(asset_id).await?.is_none() {
        return Err(asset_not_found());
    }
    if repo.has_movements(asset_id).await? {
        return Err(ApiError::Conflict(
            "Cannot delete asset: Movement records reference it.".to_string(),
        ));
    }
    if !repo.delete(asset_id).await? {
        return Err(asset_not_found());
    }

    info!(asset_id = %asset_id, user_id = %principal.user_id, "Asset deleted");
    record_audit(
        &state,
        audit_helpers::reference_changed(
            principal.user_id,
            AuditAction::AssetDeleted,
            AuditEntityType::Asset,
            asset_id,
            json!({}),
        ),
        source_ip,
    );

    Ok(StatusCode::NO_CONTENT)
}
