//! Transfer routes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::transfer::{ListTransfersQuery, RecordTransferRequest, TransferHistoryItem};
use domain::services::transfer_scope;
use persistence::repositories::{TransferListFilter, TransferRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ClientIp;
use crate::middleware::UserAuth;
use crate::services::MovementService;

/// POST /api/v1/transfers
pub async fn record_transfer(
    State(state): State<AppState>,
    auth: UserAuth,
    ClientIp(source_ip): ClientIp,
    Json(request): Json<RecordTransferRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let principal = auth.principal()?;
    let transfer = MovementService::new(state.pool.clone())
        .record_transfer(&principal, request, source_ip)
        .await?;

    Ok((StatusCode::CREATED, Json(transfer)))
}

/// GET /api/v1/transfers
///
/// A base commander sees transfers into or out of their own base.
pub async fn list_transfers(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<ListTransfersQuery>,
) -> Result<Json<Vec<TransferHistoryItem>>, ApiError> {
    let principal = auth.principal()?;
    let scope = transfer_scope(&principal, query.from_base_id, query.to_base_id)?;

    let filter = TransferListFilter {
        date: query.date,
        from_base_id: scope.from_base_id,
        to_base_id: scope.to_base_id,
        either_base_id: scope.either_base_id,
        equipment_type_id: query.equipment_type_id,
    };
    let rows = TransferRepository::new(state.pool.clone())
        .list(filter)
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
