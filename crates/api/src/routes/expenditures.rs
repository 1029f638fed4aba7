//! Expenditure routes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::expenditure::{
    ExpenditureHistoryItem, ListExpendituresQuery, RecordExpenditureRequest,
};
use domain::services::resolve_scope;
use persistence::repositories::ExpenditureRepository;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ClientIp;
use crate::middleware::UserAuth;
use crate::services::MovementService;

/// POST /api/v1/expenditures
pub async fn record_expenditure(
    State(state): State<AppState>,
    auth: UserAuth,
    ClientIp(source_ip): ClientIp,
    Json(request): Json<RecordExpenditureRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let principal = auth.principal()?;
    request.validate()?;

    let expenditure = MovementService::new(state.pool.clone())
        .record_expenditure(&principal, request, source_ip)
        .await?;

    Ok((StatusCode::CREATED, Json(expenditure)))
}

/// GET /api/v1/expenditures
pub async fn list_expenditures(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<ListExpendituresQuery>,
) -> Result<Json<Vec<ExpenditureHistoryItem>>, ApiError> {
    let principal = auth.principal()?;
    let scope = resolve_scope(&principal, query.base_id)?;

    let rows = ExpenditureRepository::new(state.pool.clone())
        .list(query.date, scope.base_id(), query.equipment_type_id)
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
