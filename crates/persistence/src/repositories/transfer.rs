//! Transfer history repository.

use chrono::NaiveDate;
use domain::services::TransferCommand;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::{TransferEntity, TransferHistoryEntity, TransferStatusDb};
use crate::metrics::QueryTimer;
use crate::repositories::filter::{bind_filter_values, FilterBuilder};

/// Filters for transfer listings, after scope resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferListFilter {
    pub date: Option<NaiveDate>,
    pub from_base_id: Option<Uuid>,
    pub to_base_id: Option<Uuid>,
    /// Matches either side.
    pub either_base_id: Option<Uuid>,
    pub equipment_type_id: Option<Uuid>,
}

/// Repository for transfer records.
#[derive(Clone)]
pub struct TransferRepository {
    pool: PgPool,
}

impl TransferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a completed transfer on the caller's transaction.
    pub async fn insert_completed_tx(
        &self,
        conn: &mut PgConnection,
        command: &TransferCommand,
        transferred_by: Uuid,
    ) -> Result<TransferEntity, sqlx::Error> {
        sqlx::query_as::<_, TransferEntity>(
            r#"
            INSERT INTO transfers (asset_id, from_base_id, to_base_id, quantity, status,
                                   transferred_by, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING id, asset_id, from_base_id, to_base_id, quantity, status,
                      transferred_by, transfer_date, completed_at
            "#,
        )
        .bind(command.asset_id)
        .bind(command.from_base_id)
        .bind(command.to_base_id)
        .bind(command.quantity)
        .bind(TransferStatusDb::Completed)
        .bind(transferred_by)
        .fetch_one(conn)
        .await
    }

    pub async fn list(
        &self,
        filter: TransferListFilter,
    ) -> Result<Vec<TransferHistoryEntity>, sqlx::Error> {
        let conditions = FilterBuilder::new()
            .on_utc_day("t.transfer_date", filter.date)
            .eq_uuid("t.from_base_id", filter.from_base_id)
            .eq_uuid("t.to_base_id", filter.to_base_id)
            .either_uuid("t.from_base_id", "t.to_base_id", filter.either_base_id)
            .eq_uuid("a.equipment_type_id", filter.equipment_type_id);

        let query = format!(
            r#"
            SELECT t.id, t.transfer_date, t.asset_id, a.serial_number AS asset_serial_number,
                   et.name AS equipment_type_name,
                   t.from_base_id, fb.name AS from_base_name,
                   t.to_base_id, tb.name AS to_base_name,
                   t.quantity, t.status, t.completed_at,
                   u.username AS transferred_by_username
            FROM transfers t
            JOIN assets a ON a.id = t.asset_id
            JOIN equipment_types et ON et.id = a.equipment_type_id
            JOIN bases fb ON fb.id = t.from_base_id
            JOIN bases tb ON tb.id = t.to_base_id
            LEFT JOIN users u ON u.id = t.transferred_by
            {}
            ORDER BY t.transfer_date DESC
            "#,
            conditions.where_clause()
        );

        let timer = QueryTimer::new("list_transfers");
        let builder = sqlx::query_as::<_, TransferHistoryEntity>(&query);
        let result = bind_filter_values!(builder, conditions)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn list_for_asset(&self, asset_id: Uuid) -> Result<Vec<TransferEntity>, sqlx::Error> {
        sqlx::query_as::<_, TransferEntity>(
            r#"
            SELECT id, asset_id, from_base_id, to_base_id, quantity, status,
                   transferred_by, transfer_date, completed_at
            FROM transfers
            WHERE asset_id = $1
            ORDER BY transfer_date DESC
            "#,
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await
    }
}
