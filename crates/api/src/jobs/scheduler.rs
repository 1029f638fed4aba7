//! Periodic background jobs with cooperative shutdown.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

/// How often a job runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobFrequency {
    Seconds(u64),
    Minutes(u64),
}

impl JobFrequency {
    pub fn duration(&self) -> Duration {
        match self {
            JobFrequency::Seconds(secs) => Duration::from_secs(*secs),
            JobFrequency::Minutes(mins) => Duration::from_secs(*mins * 60),
        }
    }
}

/// A unit of background work.
#[async_trait::async_trait]
pub trait Job: Send + Sync {
    /// Name used in logs and metrics.
    fn name(&self) -> &'static str;

    fn frequency(&self) -> JobFrequency;

    /// Whether the first run happens at startup instead of one period later.
    fn run_on_start(&self) -> bool {
        false
    }

    async fn execute(&self) -> anyhow::Result<()>;
}

/// Runs every registered job on its own interval until shutdown is signalled.
pub struct JobScheduler {
    jobs: Vec<Arc<dyn Job>>,
    shutdown_tx: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl JobScheduler {
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            jobs: Vec::new(),
            shutdown_tx,
            handles: Vec::new(),
        }
    }

    pub fn register<J: Job + 'static>(&mut self, job: J) {
        self.jobs.push(Arc::new(job));
    }

    pub fn start(&mut self) {
        info!(jobs = self.jobs.len(), "Starting job scheduler");

        for job in &self.jobs {
            let job = Arc::clone(job);
            let shutdown_rx = self.shutdown_tx.subscribe();
            self.handles.push(tokio::spawn(run_job(job, shutdown_rx)));
        }
    }

    /// Signals every job to stop after its current run.
    pub fn shutdown(&self) {
        info!("Initiating job scheduler shutdown");
        let _ = self.shutdown_tx.send(true);
    }

    /// Waits for job tasks to finish, giving up after `timeout`.
    pub async fn wait_for_shutdown(self, timeout: Duration) {
        let handles = self.handles;
        let all_done = async {
            for handle in handles {
                if let Err(e) = handle.await {
                    warn!(error = %e, "Job task panicked");
                }
            }
        };

        match tokio::time::timeout(timeout, all_done).await {
            Ok(()) => info!("All jobs stopped"),
            Err(_) => warn!(timeout_secs = timeout.as_secs(), "Job shutdown timed out"),
        }
    }
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_job(job: Arc<dyn Job>, mut shutdown_rx: watch::Receiver<bool>) {
    let name = job.name();
    let frequency = job.frequency();
    let mut interval = tokio::time::interval(frequency.duration());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The first tick completes immediately.
    if !job.run_on_start() {
        interval.tick().await;
    }

    info!(job = name, frequency = ?frequency, "Job scheduled");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let start = Instant::now();
                let result = job.execute().await;
                let elapsed_ms = start.elapsed().as_millis() as u64;
                let outcome = if result.is_ok() { "success" } else { "failure" };
                metrics::counter!("background_job_runs_total", "job" => name, "outcome" => outcome)
                    .increment(1);

                match result {
                    Ok(()) => info!(job = name, elapsed_ms, "Job completed"),
                    Err(e) => error!(job = name, elapsed_ms, error = %e, "Job failed"),
                }
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    info!(job = name, "Job shutting down");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingJob {
        runs: Arc<AtomicUsize>,
        on_start: bool,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl Job for CountingJob {
        fn name(&self) -> &'static str {
            "counting_job"
        }

        fn frequency(&self) -> JobFrequency {
            JobFrequency::Minutes(60)
        }

        fn run_on_start(&self) -> bool {
            self.on_start
        }

        async fn execute(&self) -> anyhow::Result<()> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("boom");
            }
            Ok(())
        }
    }

    #[test]
    fn test_job_frequency_duration() {
        assert_eq!(JobFrequency::Seconds(30).duration(), Duration::from_secs(30));
        assert_eq!(JobFrequency::Minutes(15).duration(), Duration::from_secs(900));
    }

    #[test]
    fn test_register() {
        let mut scheduler = JobScheduler::default();
        scheduler.register(CountingJob {
            runs: Arc::new(AtomicUsize::new(0)),
            on_start: false,
            fail: false,
        });
        assert_eq!(scheduler.jobs.len(), 1);
        assert!(scheduler.handles.is_empty());
    }

    #[tokio::test]
    async fn test_run_on_start_executes_immediately() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = JobScheduler::new();
        scheduler.register(CountingJob {
            runs: Arc::clone(&runs),
            on_start: true,
            fail: false,
        });
        scheduler.start();

        tokio::time::sleep(Duration::from_millis(100)).await;
        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(2)).await;

        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_delayed_job_does_not_run_before_first_period() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = JobScheduler::new();
        scheduler.register(CountingJob {
            runs: Arc::clone(&runs),
            on_start: false,
            fail: false,
        });
        scheduler.start();

        tokio::time::sleep(Duration::from_millis(100)).await;
        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(2)).await;

        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failing_job_keeps_scheduler_alive() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = JobScheduler::new();
        scheduler.register(CountingJob {
            runs: Arc::clone(&runs),
            on_start: true,
            fail: true,
        });
        scheduler.start();

        tokio::time::sleep(Duration::from_millis(100)).await;
        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(2)).await;

        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }
}
