//! Assignment routes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::assignment::{AssignAssetRequest, AssignmentHistoryItem, ListAssignmentsQuery};
use domain::services::resolve_scope;
use persistence::repositories::AssignmentRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ClientIp;
use crate::middleware::UserAuth;
use crate::services::MovementService;

/// POST /api/v1/assignments
pub async fn assign_asset(
    State(state): State<AppState>,
    auth: UserAuth,
    ClientIp(source_ip): ClientIp,
    Json(request): Json<AssignAssetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let principal = auth.principal()?;
    let assignment = MovementService::new(state.pool.clone())
        .assign_asset(&principal, request, source_ip)
        .await?;

    Ok((StatusCode::CREATED, Json(assignment)))
}

/// GET /api/v1/assignments
///
/// Filtered by the asset's current base.
pub async fn list_assignments(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<ListAssignmentsQuery>,
) -> Result<Json<Vec<AssignmentHistoryItem>>, ApiError> {
    let principal = auth.principal()?;
    let scope = resolve_scope(&principal, query.base_id)?;

    let rows = AssignmentRepository::new(state.pool.clone())
        .list(
            query.date,
            scope.base_id(),
            query.equipment_type_id,
            query.assigned_to_user_id,
        )
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
