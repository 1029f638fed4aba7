//! Dashboard aggregation over the balance ledger.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{DashboardTotalsEntity, NetMovementDetailEntity};
use crate::metrics::QueryTimer;
use crate::repositories::filter::{bind_filter_values, FilterBuilder};

/// Read-only queries behind the dashboard endpoints.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filter(
        balance_date: NaiveDate,
        base_id: Option<Uuid>,
        equipment_type_id: Option<Uuid>,
    ) -> FilterBuilder {
        FilterBuilder::new()
            .eq_date("ab.balance_date", balance_date)
            .eq_uuid("ab.base_id", base_id)
            .eq_uuid("ab.equipment_type_id", equipment_type_id)
    }

    /// Summed totals for one day. Zero across the board when nothing matches.
    pub async fn totals(
        &self,
        balance_date: NaiveDate,
        base_id: Option<Uuid>,
        equipment_type_id: Option<Uuid>,
    ) -> Result<DashboardTotalsEntity, sqlx::Error> {
        let filter = Self::filter(balance_date, base_id, equipment_type_id);
        let query = format!(
            r#"
            SELECT COALESCE(SUM(ab.opening_balance), 0)::BIGINT AS total_opening_balance,
                   COALESCE(SUM(ab.closing_balance), 0)::BIGINT AS total_closing_balance,
                   COALESCE(SUM(ab.net_movement), 0)::BIGINT AS total_net_movement,
                   COALESCE(SUM(ab.assigned), 0)::BIGINT AS total_assigned,
                   COALESCE(SUM(ab.expended), 0)::BIGINT AS total_expended
            FROM asset_balances ab
            {}
            "#,
            filter.where_clause()
        );

        let timer = QueryTimer::new("dashboard_totals");
        let builder = sqlx::query_as::<_, DashboardTotalsEntity>(&query);
        let result = bind_filter_values!(builder, filter)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Unaggregated rows with display names.
    pub async fn net_movement_details(
        &self,
        balance_date: NaiveDate,
        base_id: Option<Uuid>,
        equipment_type_id: Option<Uuid>,
    ) -> Result<Vec<NetMovementDetailEntity>, sqlx::Error> {
        let filter = Self::filter(balance_date, base_id, equipment_type_id);
        let query = format!(
            r#"
            SELECT ab.base_id, b.name AS base_name,
                   ab.equipment_type_id, et.name AS equipment_type_name,
                   ab.balance_date, ab.purchases, ab.transfers_in, ab.transfers_out
            FROM asset_balances ab
            JOIN bases b ON b.id = ab.base_id
            JOIN equipment_types et ON et.id = ab.equipment_type_id
            {}
            ORDER BY ab.balance_date DESC, b.name, et.name
            "#,
            filter.where_clause()
        );

        let timer = QueryTimer::new("dashboard_net_movement_details");
        let builder = sqlx::query_as::<_, NetMovementDetailEntity>(&query);
        let result = bind_filter_values!(builder, filter)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }
}
