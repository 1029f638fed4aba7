//! Carries each day's closing balances into the next day's opening balances.

use chrono::Utc;
use sqlx::PgPool;

use super::scheduler::{Job, JobFrequency};
use crate::services::LedgerService;

/// Rolls the ledger into the current UTC day.
///
/// Runs at startup and then every `interval_minutes`; repeated runs on the same
/// day leave the ledger unchanged.
pub struct DayRolloverJob {
    ledger: LedgerService,
    interval_minutes: u64,
}

impl DayRolloverJob {
    pub fn new(pool: PgPool, interval_minutes: u64) -> Self {
        Self {
            ledger: LedgerService::new(pool),
            interval_minutes: interval_minutes.max(1),
        }
    }
}

#[async_trait::async_trait]
impl Job for DayRolloverJob {
    fn name(&self) -> &'static str {
        "day_rollover"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Minutes(self.interval_minutes)
    }

    fn run_on_start(&self) -> bool {
        true
    }

    async fn execute(&self) -> anyhow::Result<()> {
        let today = Utc::now().date_naive();
        self.ledger.roll_over(today, None).await?;
        Ok(())
    }
}
