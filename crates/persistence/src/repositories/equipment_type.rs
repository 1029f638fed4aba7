//! Equipment type repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EquipmentTypeEntity;
use crate::metrics::QueryTimer;

/// Repository for equipment type operations.
#[derive(Clone)]
pub struct EquipmentTypeRepository {
    pool: PgPool,
}

impl EquipmentTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<EquipmentTypeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_equipment_types");
        let result = sqlx::query_as::<_, EquipmentTypeEntity>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM equipment_types
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EquipmentTypeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_equipment_type_by_id");
        let result = sqlx::query_as::<_, EquipmentTypeEntity>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM equipment_types
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM equipment_types WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<EquipmentTypeEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_equipment_type");
        let result = sqlx::query_as::<_, EquipmentTypeEntity>(
            r#"
            INSERT INTO equipment_types (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<EquipmentTypeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_equipment_type");
        let result = sqlx::query_as::<_, EquipmentTypeEntity>(
            r#"
            UPDATE equipment_types SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM equipment_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of assets of this type, wherever they are.
    pub async fn count_assets(&self, id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM assets WHERE equipment_type_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }
}
