//! Dashboard routes over the daily balance ledger.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use domain::models::dashboard::DashboardQuery;
use domain::models::{DashboardMetrics, NetMovementDetail};
use domain::services::resolve_scope;
use persistence::repositories::DashboardRepository;
use tracing::debug;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::UserAuth;

/// GET /api/v1/dashboard/metrics
///
/// Summed opening/closing balances, net movement, assigned and expended
/// counts for one day (today, UTC, unless `date` is given).
pub async fn get_metrics(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardMetrics>, ApiError> {
    let principal = auth.principal()?;
    let scope = resolve_scope(&principal, query.base_id)?;
    let balance_date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    let totals = DashboardRepository::new(state.pool.clone())
        .totals(balance_date, scope.base_id(), query.equipment_type_id)
        .await?;

    debug!(
        balance_date = %balance_date,
        base_id = ?scope.base_id(),
        user_id = %principal.user_id,
        "Fetched dashboard metrics"
    );

    Ok(Json(totals.into()))
}

/// GET /api/v1/dashboard/net-movement-details
pub async fn get_net_movement_details(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Vec<NetMovementDetail>>, ApiError> {
    let principal = auth.principal()?;
    let scope = resolve_scope(&principal, query.base_id)?;
    let balance_date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    let rows = DashboardRepository::new(state.pool.clone())
        .net_movement_details(balance_date, scope.base_id(), query.equipment_type_id)
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
