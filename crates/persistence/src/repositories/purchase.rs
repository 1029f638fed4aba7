//! Purchase history repository.

use chrono::NaiveDate;
use domain::services::PurchaseCommand;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::{PurchaseEntity, PurchaseHistoryEntity};
use crate::metrics::QueryTimer;
use crate::repositories::filter::{bind_filter_values, FilterBuilder};

/// Repository for purchase records.
#[derive(Clone)]
pub struct PurchaseRepository {
    pool: PgPool,
}

impl PurchaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a purchase on the caller's transaction.
    pub async fn insert_tx(
        &self,
        conn: &mut PgConnection,
        command: &PurchaseCommand,
        purchased_by: Uuid,
    ) -> Result<PurchaseEntity, sqlx::Error> {
        sqlx::query_as::<_, PurchaseEntity>(
            r#"
            INSERT INTO purchases (asset_id, base_id, quantity, unit_cost, total_cost, purchased_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, asset_id, base_id, quantity, unit_cost, total_cost,
                      purchased_by, purchase_date
            "#,
        )
        .bind(command.asset_id)
        .bind(command.base_id)
        .bind(command.quantity)
        .bind(command.unit_cost)
        .bind(command.total_cost)
        .bind(purchased_by)
        .fetch_one(conn)
        .await
    }

    /// Purchase history, newest first. `base_id` is the already-scoped base.
    pub async fn list(
        &self,
        date: Option<NaiveDate>,
        base_id: Option<Uuid>,
        equipment_type_id: Option<Uuid>,
    ) -> Result<Vec<PurchaseHistoryEntity>, sqlx::Error> {
        let filter = FilterBuilder::new()
            .on_utc_day("p.purchase_date", date)
            .eq_uuid("p.base_id", base_id)
            .eq_uuid("a.equipment_type_id", equipment_type_id);

        let query = format!(
            r#"
            SELECT p.id, p.purchase_date, p.asset_id, a.serial_number AS asset_serial_number,
                   et.name AS equipment_type_name, p.base_id, b.name AS base_name,
                   p.quantity, p.unit_cost, p.total_cost, u.username AS purchased_by_username
            FROM purchases p
            JOIN assets a ON a.id = p.asset_id
            JOIN equipment_types et ON et.id = a.equipment_type_id
            JOIN bases b ON b.id = p.base_id
            LEFT JOIN users u ON u.id = p.purchased_by
            {}
            ORDER BY p.purchase_date DESC
            "#,
            filter.where_clause()
        );

        let timer = QueryTimer::new("list_purchases");
        let builder = sqlx::query_as::<_, PurchaseHistoryEntity>(&query);
        let result = bind_filter_values!(builder, filter)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn list_for_asset(&self, asset_id: Uuid) -> Result<Vec<PurchaseEntity>, sqlx::Error> {
        sqlx::query_as::<_, PurchaseEntity>(
            r#"
            SELECT id, asset_id, base_id, quantity, unit_cost, total_cost,
                   purchased_by, purchase_date
            FROM purchases
            WHERE asset_id = $1
            ORDER BY purchase_date DESC
            "#,
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await
    }
}
