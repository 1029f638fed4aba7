//! Base repository for database operations.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::BaseEntity;
use crate::metrics::QueryTimer;

const BASE_COLUMNS: &str = "id, name, location, commander_user_id, created_at, updated_at";

/// Repository for base (site) operations.
#[derive(Clone)]
pub struct BaseRepository {
    pool: PgPool,
}

impl BaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All bases ordered by name.
    pub async fn list(&self) -> Result<Vec<BaseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_bases");
        let result = sqlx::query_as::<_, BaseEntity>(&format!(
            "SELECT {} FROM bases ORDER BY name",
            BASE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<BaseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_base_by_id");
        let result = sqlx::query_as::<_, BaseEntity>(&format!(
            "SELECT {} FROM bases WHERE id = $1",
            BASE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM bases WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }

    /// Existence check on the caller's transaction.
    pub async fn exists_tx(&self, conn: &mut PgConnection, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM bases WHERE id = $1)")
            .bind(id)
            .fetch_one(conn)
            .await
    }

    pub async fn create(
        &self,
        name: &str,
        location: &str,
        commander_user_id: Option<Uuid>,
    ) -> Result<BaseEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_base");
        let result = sqlx::query_as::<_, BaseEntity>(&format!(
            r#"
            INSERT INTO bases (name, location, commander_user_id)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            BASE_COLUMNS
        ))
        .bind(name)
        .bind(location)
        .bind(commander_user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Partial update; `None` keeps the stored value.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        location: Option<&str>,
        commander_user_id: Option<Uuid>,
    ) -> Result<Option<BaseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_base");
        let result = sqlx::query_as::<_, BaseEntity>(&format!(
            r#"
            UPDATE bases SET
                name = COALESCE($2, name),
                location = COALESCE($3, location),
                commander_user_id = COALESCE($4, commander_user_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            BASE_COLUMNS
        ))
        .bind(id)
        .bind(name)
        .bind(location)
        .bind(commander_user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Returns false when no base had the id.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_base");
        let result = sqlx::query("DELETE FROM bases WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    /// Number of assets currently located at the base.
    pub async fn count_assets(&self, id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM assets WHERE current_base_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }
}
