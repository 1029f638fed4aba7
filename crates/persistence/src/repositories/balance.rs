//! Daily balance ledger repository.
//!
//! Movements add to a row with a single `INSERT ... ON CONFLICT DO UPDATE`,
//! so concurrent writers to the same (date, base, type) never lose an
//! increment. The day rollover sets opening balances from the previous
//! closing balance and is safe to re-run.
//!
//! Movements hold the ledger advisory lock in shared mode and the rollover
//! holds it exclusively, so the two never interleave row locks.

use chrono::NaiveDate;
use domain::models::BalanceDelta;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::AssetBalanceEntity;
use crate::metrics::{record_rollover_rows, QueryTimer};

const BALANCE_COLUMNS: &str = "id, balance_date, base_id, equipment_type_id, opening_balance, \
     purchases, transfers_in, transfers_out, assigned, expended, closing_balance, \
     net_movement, last_calculated_at";

/// Transaction-scoped advisory lock key guarding the ledger.
pub const LEDGER_LOCK_KEY: i64 = 0x4153_5345_544c_4447;

/// Rows changed by one rollover run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RolloverOutcome {
    /// Existing rows whose opening balance was re-based.
    pub updated: u64,
    /// Rows created to carry a non-zero balance into the day.
    pub inserted: u64,
}

impl RolloverOutcome {
    pub fn total(&self) -> u64 {
        self.updated + self.inserted
    }
}

/// Repository for the asset_balances ledger.
#[derive(Clone)]
pub struct BalanceRepository {
    pool: PgPool,
}

impl BalanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Adds `delta` to the row for (date, base, type), creating it if needed.
    ///
    /// Runs on the caller's transaction and never commits.
    pub async fn upsert_tx(
        &self,
        conn: &mut PgConnection,
        balance_date: NaiveDate,
        base_id: Uuid,
        equipment_type_id: Uuid,
        delta: &BalanceDelta,
    ) -> Result<AssetBalanceEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_asset_balance");
        let result = sqlx::query_as::<_, AssetBalanceEntity>(&format!(
            r#"
            INSERT INTO asset_balances (
                balance_date, base_id, equipment_type_id, opening_balance,
                purchases, transfers_in, transfers_out, assigned, expended,
                closing_balance, net_movement, last_calculated_at
            )
            VALUES ($1, $2, $3, 0, $4, $5, $6, $7, $8, $9, $10, NOW())
            ON CONFLICT (balance_date, base_id, equipment_type_id) DO UPDATE SET
                purchases = asset_balances.purchases + EXCLUDED.purchases,
                transfers_in = asset_balances.transfers_in + EXCLUDED.transfers_in,
                transfers_out = asset_balances.transfers_out + EXCLUDED.transfers_out,
                assigned = asset_balances.assigned + EXCLUDED.assigned,
                expended = asset_balances.expended + EXCLUDED.expended,
                closing_balance = asset_balances.closing_balance + EXCLUDED.closing_balance,
                net_movement = asset_balances.net_movement + EXCLUDED.net_movement,
                last_calculated_at = NOW()
            RETURNING {}
            "#,
            BALANCE_COLUMNS
        ))
        .bind(balance_date)
        .bind(base_id)
        .bind(equipment_type_id)
        .bind(delta.purchases)
        .bind(delta.transfers_in)
        .bind(delta.transfers_out)
        .bind(delta.assigned)
        .bind(delta.expended)
        .bind(delta.closing_balance)
        .bind(delta.net_movement)
        .fetch_one(conn)
        .await;
        timer.record();
        result
    }

    /// Takes the ledger lock in shared mode until the caller's transaction ends.
    pub async fn share_ledger_lock_tx(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock_shared($1)")
            .bind(LEDGER_LOCK_KEY)
            .execute(conn)
            .await?;
        Ok(())
    }

    pub async fn find(
        &self,
        balance_date: NaiveDate,
        base_id: Uuid,
        equipment_type_id: Uuid,
    ) -> Result<Option<AssetBalanceEntity>, sqlx::Error> {
        sqlx::query_as::<_, AssetBalanceEntity>(&format!(
            r#"
            SELECT {}
            FROM asset_balances
            WHERE balance_date = $1 AND base_id = $2 AND equipment_type_id = $3
            "#,
            BALANCE_COLUMNS
        ))
        .bind(balance_date)
        .bind(base_id)
        .bind(equipment_type_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Carries each (base, type)'s latest closing balance before `balance_date`
    /// into that day's opening balance.
    pub async fn rollover(&self, balance_date: NaiveDate) -> Result<RolloverOutcome, sqlx::Error> {
        let timer = QueryTimer::new("rollover_asset_balances");
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(LEDGER_LOCK_KEY)
            .execute(&mut *tx)
            .await?;

        let updated = sqlx::query(
            r#"
            WITH prev AS (
                SELECT DISTINCT ON (base_id, equipment_type_id)
                       base_id, equipment_type_id, closing_balance
                FROM asset_balances
                WHERE balance_date < $1
                ORDER BY base_id, equipment_type_id, balance_date DESC
            )
            UPDATE asset_balances ab SET
                opening_balance = prev.closing_balance,
                closing_balance = prev.closing_balance + ab.net_movement,
                last_calculated_at = NOW()
            FROM prev
            WHERE ab.balance_date = $1
              AND ab.base_id = prev.base_id
              AND ab.equipment_type_id = prev.equipment_type_id
              AND ab.opening_balance <> prev.closing_balance
            "#,
        )
        .bind(balance_date)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let inserted = sqlx::query(
            r#"
            INSERT INTO asset_balances (
                balance_date, base_id, equipment_type_id,
                opening_balance, closing_balance, last_calculated_at
            )
            SELECT $1, prev.base_id, prev.equipment_type_id,
                   prev.closing_balance, prev.closing_balance, NOW()
            FROM (
                SELECT DISTINCT ON (base_id, equipment_type_id)
                       base_id, equipment_type_id, closing_balance
                FROM asset_balances
                WHERE balance_date < $1
                ORDER BY base_id, equipment_type_id, balance_date DESC
            ) prev
            WHERE prev.closing_balance <> 0
            ON CONFLICT (balance_date, base_id, equipment_type_id) DO NOTHING
            "#,
        )
        .bind(balance_date)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        timer.record();

        let outcome = RolloverOutcome { updated, inserted };
        record_rollover_rows(outcome.total());
        Ok(outcome)
    }
}
