//! Assignment history repository.

use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::{AssignmentEntity, AssignmentHistoryEntity, AssignmentStatusDb};
use crate::metrics::QueryTimer;
use crate::repositories::filter::{bind_filter_values, FilterBuilder};

/// Repository for assignment records.
#[derive(Clone)]
pub struct AssignmentRepository {
    pool: PgPool,
}

impl AssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts an active assignment on the caller's transaction.
    pub async fn insert_active_tx(
        &self,
        conn: &mut PgConnection,
        asset_id: Uuid,
        assigned_to_user_id: Uuid,
        assigned_by: Uuid,
    ) -> Result<AssignmentEntity, sqlx::Error> {
        sqlx::query_as::<_, AssignmentEntity>(
            r#"
            INSERT INTO assignments (asset_id, assigned_to_user_id, assigned_by, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, asset_id, assigned_to_user_id, assigned_by, status,
                      assigned_date, return_date
            "#,
        )
        .bind(asset_id)
        .bind(assigned_to_user_id)
        .bind(assigned_by)
        .bind(AssignmentStatusDb::Active)
        .fetch_one(conn)
        .await
    }

    /// Assignment history filtered by the asset's current base.
    pub async fn list(
        &self,
        date: Option<NaiveDate>,
        base_id: Option<Uuid>,
        equipment_type_id: Option<Uuid>,
        assigned_to_user_id: Option<Uuid>,
    ) -> Result<Vec<AssignmentHistoryEntity>, sqlx::Error> {
        let filter = FilterBuilder::new()
            .on_utc_day("asg.assigned_date", date)
            .eq_uuid("a.current_base_id", base_id)
            .eq_uuid("a.equipment_type_id", equipment_type_id)
            .eq_uuid("asg.assigned_to_user_id", assigned_to_user_id);

        let query = format!(
            r#"
            SELECT asg.id, asg.assigned_date, asg.asset_id,
                   a.serial_number AS asset_serial_number,
                   et.name AS equipment_type_name,
                   a.current_base_id, b.name AS current_base_name,
                   asg.assigned_to_user_id, target.username AS assigned_to_username,
                   actor.username AS assigned_by_username,
                   asg.status, asg.return_date
            FROM assignments asg
            JOIN assets a ON a.id = asg.asset_id
            JOIN equipment_types et ON et.id = a.equipment_type_id
            JOIN bases b ON b.id = a.current_base_id
            LEFT JOIN users target ON target.id = asg.assigned_to_user_id
            LEFT JOIN users actor ON actor.id = asg.assigned_by
            {}
            ORDER BY asg.assigned_date DESC
            "#,
            filter.where_clause()
        );

        let timer = QueryTimer::new("list_assignments");
        let builder = sqlx::query_as::<_, AssignmentHistoryEntity>(&query);
        let result = bind_filter_values!(builder, filter)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn list_for_asset(
        &self,
        asset_id: Uuid,
    ) -> Result<Vec<AssignmentEntity>, sqlx::Error> {
        sqlx::query_as::<_, AssignmentEntity>(
            r#"
            SELECT id, asset_id, assigned_to_user_id, assigned_by, status,
                   assigned_date, return_date
            FROM assignments
            WHERE asset_id = $1
            ORDER BY assigned_date DESC
            "#,
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await
    }
}
