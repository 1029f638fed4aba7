//! Purchase routes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::purchase::{ListPurchasesQuery, PurchaseHistoryItem, RecordPurchaseRequest};
use domain::services::resolve_scope;
use persistence::repositories::PurchaseRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ClientIp;
use crate::middleware::UserAuth;
use crate::services::MovementService;

/// POST /api/v1/purchases
pub async fn record_purchase(
    State(state): State<AppState>,
    auth: UserAuth,
    ClientIp(source_ip): ClientIp,
    Json(request): Json<RecordPurchaseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let principal = auth.principal()?;
    let purchase = MovementService::new(state.pool.clone())
        .record_purchase(&principal, request, source_ip)
        .await?;

    Ok((StatusCode::CREATED, Json(purchase)))
}

/// GET /api/v1/purchases
pub async fn list_purchases(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<ListPurchasesQuery>,
) -> Result<Json<Vec<PurchaseHistoryItem>>, ApiError> {
    let principal = auth.principal()?;
    let scope = resolve_scope(&principal, query.base_id)?;

    let rows = PurchaseRepository::new(state.pool.clone())
        .list(query.date, scope.base_id(), query.equipment_type_id)
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
