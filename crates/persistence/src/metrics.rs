//! Database and ledger metrics.

use metrics::{counter, gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Record database query duration.
pub fn record_query_duration(query_name: &str, duration_secs: f64) {
    histogram!(
        "database_query_duration_seconds",
        "query" => query_name.to_string()
    )
    .record(duration_secs);
}

/// Record database connection pool gauges. Called periodically by a job.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();
    let active = size.saturating_sub(idle);

    gauge!("database_connections_active").set(active as f64);
    gauge!("database_connections_idle").set(idle as f64);
    gauge!("database_connections_total").set(size as f64);
}

/// Count one balance upsert against the named ledger column.
pub fn record_balance_upsert(field: &str) {
    counter!("ledger_balance_upserts_total", "field" => field.to_string()).increment(1);
}

/// Count balance rows touched by a day rollover.
pub fn record_rollover_rows(rows: u64) {
    counter!("ledger_rollover_rows_total").increment(rows);
}

/// Times a database operation and records it on [`QueryTimer::record`].
///
/// ```ignore
/// let timer = QueryTimer::new("find_asset_by_id");
/// let result = sqlx::query_as::<_, AssetEntity>(...).fetch_optional(&pool).await;
/// timer.record();
/// result
/// ```
pub struct QueryTimer {
    query_name: String,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: impl Into<String>) -> Self {
        Self {
            query_name: query_name.into(),
            start: Instant::now(),
        }
    }

    pub fn record(self) {
        let duration = self.start.elapsed().as_secs_f64();
        record_query_duration(&self.query_name, duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_timer_keeps_name() {
        let timer = QueryTimer::new(String::from("upsert_asset_balance"));
        assert_eq!(timer.query_name, "upsert_asset_balance");
    }

    #[test]
    fn test_recording_without_exporter_is_noop() {
        // No global recorder is installed in unit tests.
        record_balance_upsert("purchases");
        record_rollover_rows(3);
        QueryTimer::new("noop").record();
    }
}
