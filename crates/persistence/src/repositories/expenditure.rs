//! Expenditure history repository.

use chrono::NaiveDate;
use domain::services::ExpenditureCommand;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::{ExpenditureEntity, ExpenditureHistoryEntity};
use crate::metrics::QueryTimer;
use crate::repositories::filter::{bind_filter_values, FilterBuilder};

/// Repository for expenditure records.
#[derive(Clone)]
pub struct ExpenditureRepository {
    pool: PgPool,
}

impl ExpenditureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// `base_id` is the asset's base at the time of expenditure.
    pub async fn insert_tx(
        &self,
        conn: &mut PgConnection,
        command: &ExpenditureCommand,
        base_id: Uuid,
        expended_by: Uuid,
    ) -> Result<ExpenditureEntity, sqlx::Error> {
        sqlx::query_as::<_, ExpenditureEntity>(
            r#"
            INSERT INTO expenditures (asset_id, base_id, quantity, reason, expended_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, asset_id, base_id, quantity, reason, expended_by, expenditure_date
            "#,
        )
        .bind(command.asset_id)
        .bind(base_id)
        .bind(command.quantity)
        .bind(command.reason.as_deref())
        .bind(expended_by)
        .fetch_one(conn)
        .await
    }

    pub async fn list(
        &self,
        date: Option<NaiveDate>,
        base_id: Option<Uuid>,
        equipment_type_id: Option<Uuid>,
    ) -> Result<Vec<ExpenditureHistoryEntity>, sqlx::Error> {
        let filter = FilterBuilder::new()
            .on_utc_day("e.expenditure_date", date)
            .eq_uuid("e.base_id", base_id)
            .eq_uuid("a.equipment_type_id", equipment_type_id);

        let query = format!(
            r#"
            SELECT e.id, e.expenditure_date, e.asset_id, a.serial_number AS asset_serial_number,
                   et.name AS equipment_type_name, e.base_id, b.name AS base_name,
                   e.quantity, e.reason, u.username AS expended_by_username
            FROM expenditures e
            JOIN assets a ON a.id = e.asset_id
            JOIN equipment_types et ON et.id = a.equipment_type_id
            JOIN bases b ON b.id = e.base_id
            LEFT JOIN users u ON u.id = e.expended_by
            {}
            ORDER BY e.expenditure_date DESC
            "#,
            filter.where_clause()
        );

        let timer = QueryTimer::new("list_expenditures");
        let builder = sqlx::query_as::<_, ExpenditureHistoryEntity>(&query);
        let result = bind_filter_values!(builder, filter)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn list_for_asset(
        &self,
        asset_id: Uuid,
    ) -> Result<Vec<ExpenditureEntity>, sqlx::Error> {
        sqlx::query_as::<_, ExpenditureEntity>(
            r#"
            SELECT id, asset_id, base_id, quantity, reason, expended_by, expenditure_date
            FROM expenditures
            WHERE asset_id = $1
            ORDER BY expenditure_date DESC
            "#,
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await
    }
}
