//! Admin maintenance routes.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use domain::models::Role;
use domain::services::require_role;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::UserAuth;
use crate::services::LedgerService;

/// Query parameters for a manual rollover.
#[derive(Debug, Default, Deserialize)]
pub struct RolloverQuery {
    /// Day to roll into; today (UTC) when omitted.
    pub date: Option<NaiveDate>,
}

/// Response for a ledger rollover.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RolloverResponse {
    pub balance_date: NaiveDate,
    pub updated: u64,
    pub inserted: u64,
}

/// POST /api/v1/admin/ledger/rollover
///
/// Carries each (base, type) closing balance into the given day's opening
/// balance. Safe to repeat.
pub async fn roll_over_ledger(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<RolloverQuery>,
) -> Result<Json<RolloverResponse>, ApiError> {
    let principal = auth.principal()?;
    require_role(&principal, &[Role::Admin])?;

    let balance_date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let outcome = LedgerService::new(state.pool.clone())
        .roll_over(balance_date, Some(principal.user_id))
        .await?;

    Ok(Json(RolloverResponse {
        balance_date,
        updated: outcome.updated,
        inserted: outcome.inserted,
    }))
}
