//! Day rollover of the balance ledger.

use chrono::NaiveDate;
use domain::services::audit_helpers;
use persistence::repositories::{AuditLogRepository, BalanceRepository, RolloverOutcome};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Carries closing balances into the next day's opening balances.
#[derive(Clone)]
pub struct LedgerService {
    balances: BalanceRepository,
    audit: AuditLogRepository,
}

impl LedgerService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            balances: BalanceRepository::new(pool.clone()),
            audit: AuditLogRepository::new(pool),
        }
    }

    /// Rolls `balance_date` forward. `actor` is `None` when the scheduler runs it.
    ///
    /// A scheduled run that changes nothing writes no audit event.
    pub async fn roll_over(
        &self,
        balance_date: NaiveDate,
        actor: Option<Uuid>,
    ) -> Result<RolloverOutcome, sqlx::Error> {
        let outcome = self.balances.rollover(balance_date).await?;

        info!(
            balance_date = %balance_date,
            updated = outcome.updated,
            inserted = outcome.inserted,
            "Ledger rollover finished"
        );

        if outcome.total() > 0 || actor.is_some() {
            self.audit.insert_async(audit_helpers::ledger_rolled_over(
                actor,
                balance_date,
                outcome.total(),
            ));
        }

        Ok(outcome)
    }
}
