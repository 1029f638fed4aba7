//! Asset repository for database operations.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::{AssetEntity, AssetStatusDb, AssetSummaryEntity};
use crate::metrics::QueryTimer;
use crate::repositories::filter::{bind_filter_values, FilterBuilder};

const ASSET_COLUMNS: &str = "a.id, a.serial_number, a.equipment_type_id, a.model, a.manufacturer, \
     a.current_base_id, a.status, a.created_at, a.last_updated_at";

const RETURNING_COLUMNS: &str = "id, serial_number, equipment_type_id, model, manufacturer, \
     current_base_id, status, created_at, last_updated_at";

/// Field values for inserting an asset.
#[derive(Debug, Clone)]
pub struct AssetInput<'a> {
    pub serial_number: &'a str,
    pub equipment_type_id: Uuid,
    pub model: Option<&'a str>,
    pub manufacturer: Option<&'a str>,
    pub current_base_id: Uuid,
    pub status: AssetStatusDb,
}

/// Partial update; every `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct AssetPatch<'a> {
    pub serial_number: Option<&'a str>,
    pub equipment_type_id: Option<Uuid>,
    pub model: Option<&'a str>,
    pub manufacturer: Option<&'a str>,
    pub current_base_id: Option<Uuid>,
    pub status: Option<AssetStatusDb>,
}

/// Repository for asset operations, including the row lock used by movements.
#[derive(Clone)]
pub struct AssetRepository {
    pool: PgPool,
}

impl AssetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Assets with type and base names, optionally filtered.
    pub async fn list(
        &self,
        base_id: Option<Uuid>,
        equipment_type_id: Option<Uuid>,
        status: Option<AssetStatusDb>,
    ) -> Result<Vec<AssetSummaryEntity>, sqlx::Error> {
        let filter = FilterBuilder::new()
            .eq_uuid("a.current_base_id", base_id)
            .eq_uuid("a.equipment_type_id", equipment_type_id)
            .eq_asset_status("a.status", status);

        let query = format!(
            r#"
            SELECT {}, et.name AS equipment_type_name, b.name AS base_name
            FROM assets a
            JOIN equipment_types et ON et.id = a.equipment_type_id
            JOIN bases b ON b.id = a.current_base_id
            {}
            ORDER BY a.serial_number
            "#,
            ASSET_COLUMNS,
            filter.where_clause()
        );

        let timer = QueryTimer::new("list_assets");
        let builder = sqlx::query_as::<_, AssetSummaryEntity>(&query);
        let builder = bind_filter_values!(builder, filter);
        let result = builder.fetch_all(&self.pool).await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AssetEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_asset_by_id");
        let result = sqlx::query_as::<_, AssetEntity>(&format!(
            "SELECT {} FROM assets a WHERE a.id = $1",
            ASSET_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_summary_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<AssetSummaryEntity>, sqlx::Error> {
        sqlx::query_as::<_, AssetSummaryEntity>(&format!(
            r#"
            SELECT {}, et.name AS equipment_type_name, b.name AS base_name
            FROM assets a
            JOIN equipment_types et ON et.id = a.equipment_type_id
            JOIN bases b ON b.id = a.current_base_id
            WHERE a.id = $1
            "#,
            ASSET_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn create(&self, input: AssetInput<'_>) -> Result<AssetEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_asset");
        let result = sqlx::query_as::<_, AssetEntity>(&format!(
            r#"
            INSERT INTO assets (serial_number, equipment_type_id, model, manufacturer,
                                current_base_id, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        ))
        .bind(input.serial_number)
        .bind(input.equipment_type_id)
        .bind(input.model)
        .bind(input.manufacturer)
        .bind(input.current_base_id)
        .bind(input.status)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn update(
        &self,
        id: Uuid,
        patch: AssetPatch<'_>,
    ) -> Result<Option<AssetEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_asset");
        let result = sqlx::query_as::<_, AssetEntity>(&format!(
            r#"
            UPDATE assets SET
                serial_number = COALESCE($2, serial_number),
                equipment_type_id = COALESCE($3, equipment_type_id),
                model = COALESCE($4, model),
                manufacturer = COALESCE($5, manufacturer),
                current_base_id = COALESCE($6, current_base_id),
                status = COALESCE($7, status),
                last_updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        ))
        .bind(id)
        .bind(patch.serial_number)
        .bind(patch.equipment_type_id)
        .bind(patch.model)
        .bind(patch.manufacturer)
        .bind(patch.current_base_id)
        .bind(patch.status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// True if any purchase, transfer, assignment or expenditure references the asset.
    pub async fn has_movements(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM purchases WHERE asset_id = $1)
                OR EXISTS(SELECT 1 FROM transfers WHERE asset_id = $1)
                OR EXISTS(SELECT 1 FROM assignments WHERE asset_id = $1)
                OR EXISTS(SELECT 1 FROM expenditures WHERE asset_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
    }

    /// Reads the asset and holds a row lock until the caller's transaction ends.
    pub async fn lock_for_update(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<AssetEntity>, sqlx::Error> {
        let timer = QueryTimer::new("lock_asset_for_update");
        let result = sqlx::query_as::<_, AssetEntity>(&format!(
            "SELECT {} FROM assets a WHERE a.id = $1 FOR UPDATE",
            ASSET_COLUMNS
        ))
        .bind(id)
        .fetch_optional(conn)
        .await;
        timer.record();
        result
    }

    /// Moves and/or re-statuses the asset on the caller's transaction.
    pub async fn relocate_tx(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        base_id: Uuid,
        status: AssetStatusDb,
    ) -> Result<AssetEntity, sqlx::Error> {
        sqlx::query_as::<_, AssetEntity>(&format!(
            r#"
            UPDATE assets
            SET current_base_id = $2, status = $3, last_updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        ))
        .bind(id)
        .bind(base_id)
        .bind(status)
        .fetch_one(conn)
        .await
    }

    pub async fn set_status_tx(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        status: AssetStatusDb,
    ) -> Result<AssetEntity, sqlx::Error> {
        sqlx::query_as::<_, AssetEntity>(&format!(
            r#"
            UPDATE assets
            SET status = $2, last_updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        ))
        .bind(id)
        .bind(status)
        .fetch_one(conn)
        .await
    }
}
