//! Background job scheduler and job implementations.

mod day_rollover;
mod pool_metrics;
mod scheduler;

pub use day_rollover::DayRolloverJob;
pub use pool_metrics::PoolMetricsJob;
pub use scheduler::{Job, JobFrequency, JobScheduler};
