//! Orchestrator execution logic

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::config::LoadConfig;
use crate::error::{BenchError, BenchResult};
use crate::job::JobSource;
use crate::metrics::StatsAccumulator;
use crate::request::RequestTemplate;
use crate::traits::RequestSender;
use crate::worker::{RequestRateLimiter, WorkerBuilder};

use super::aggregator::{aggregate_worker_stats, total_processed, RunReport, WorkerSummary};

/// Lifecycle of the worker pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolPhase {
    /// Built, workers not yet spawned
    Starting,
    /// Workers are pulling tokens
    Running,
    /// Job source exhausted or closed, workers finishing in-flight requests
    Draining,
    /// Every worker has terminated; final stats are safe to read
    Joined,
}

const PHASE_STARTING: u8 = 0;
const PHASE_RUNNING: u8 = 1;
const PHASE_JOINED: u8 = 2;

/// Orchestrator manages the run lifecycle
///
/// Owns the shared components, spawns one tokio task per worker, blocks
/// until every task has joined and then assembles the [`RunReport`]. The
/// job source is consumed by a run, so each orchestrator runs once.
pub struct Orchestrator {
    /// Normalized load configuration
    pub(crate) config: LoadConfig,

    /// Request shape (shared, read-only)
    pub(crate) template: Arc<RequestTemplate>,

    /// Request sender (shared across workers)
    pub(crate) sender: Arc<dyn RequestSender>,

    /// Token supply
    pub(crate) jobs: Arc<JobSource>,

    /// Shared statistics
    pub(crate) stats: Arc<StatsAccumulator>,

    /// Global rate limiter
    pub(crate) rate_limiter: Arc<RequestRateLimiter>,

    phase: AtomicU8,
}

impl Orchestrator {
    /// Create a new orchestrator
    ///
    /// Use `OrchestratorBuilder` for validated construction.
    pub fn new(
        config: LoadConfig,
        template: Arc<RequestTemplate>,
        sender: Arc<dyn RequestSender>,
    ) -> BenchResult<Self> {
        let config = config.normalized();
        config.validate()?;

        let jobs = Arc::new(JobSource::new(config.total_requests)?);
        let rate_limiter = Arc::new(RequestRateLimiter::new(config.rate_limit));

        Ok(Self {
            config,
            template,
            sender,
            jobs,
            stats: Arc::new(StatsAccumulator::new()),
            rate_limiter,
            phase: AtomicU8::new(PHASE_STARTING),
        })
    }

    /// Shared stats handle for live progress reporting
    pub fn stats(&self) -> Arc<StatsAccumulator> {
        Arc::clone(&self.stats)
    }

    /// Get the load configuration
    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    /// Current pool phase
    pub fn phase(&self) -> PoolPhase {
        match self.phase.load(Ordering::Acquire) {
            PHASE_STARTING => PoolPhase::Starting,
            PHASE_RUNNING if self.jobs.is_exhausted() => PoolPhase::Draining,
            PHASE_RUNNING => PoolPhase::Running,
            _ => PoolPhase::Joined,
        }
    }

    /// Stop dispensing tokens; workers finish their in-flight request and exit
    pub fn shutdown(&self) {
        self.jobs.close();
    }

    /// Run the pool to completion
    ///
    /// Spawns `concurrency` workers, waits for all of them and returns the
    /// report. Per-request failures are recorded, never returned; only a
    /// pool in which every worker died is an error.
    ///
    /// # Errors
    /// Returns an orchestration error if this orchestrator has already run.
    pub async fn run(&self) -> BenchResult<RunReport> {
        if self
            .phase
            .compare_exchange(
                PHASE_STARTING,
                PHASE_RUNNING,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return Err(BenchError::orchestration("orchestrator already ran"));
        }

        let start = Instant::now();
        let started_at = chrono::Utc::now();

        tracing::info!(
            target_url = %self.template.url(),
            method = %self.template.method(),
            concurrency = self.config.concurrency,
            total_requests = self.config.total_requests,
            rate_limit = self.config.rate_limit,
            timeout_ms = self.config.timeout.as_millis() as u64,
            "Starting run"
        );

        let workers = (0..self.config.concurrency)
            .map(|worker_id| {
                WorkerBuilder::new(worker_id)
                    .sender(Arc::clone(&self.sender))
                    .template(Arc::clone(&self.template))
                    .jobs(Arc::clone(&self.jobs))
                    .stats(Arc::clone(&self.stats))
                    .rate_limiter(Arc::clone(&self.rate_limiter))
                    .build()
            })
            .collect::<BenchResult<Vec<_>>>();
        let workers = match workers {
            Ok(workers) => workers,
            Err(e) => {
                self.phase.store(PHASE_JOINED, Ordering::Release);
                return Err(e);
            }
        };

        let handles: Vec<_> = workers
            .into_iter()
            .map(|worker| (worker.id(), tokio::spawn(worker.run())))
            .collect();

        // Wait for all workers to complete
        let mut results = Vec::with_capacity(handles.len());
        let mut worker_failures = 0;
        for (worker_id, handle) in handles {
            match handle.await {
                Ok(Ok(stats)) => results.push(WorkerSummary::from_stats(worker_id, &stats)),
                Ok(Err(e)) => {
                    worker_failures += 1;
                    tracing::error!(worker_id, error = %e, "Worker returned error");
                }
                Err(e) => {
                    worker_failures += 1;
                    tracing::error!(worker_id, error = %e, "Worker task panicked");
                }
            }
        }
        self.phase.store(PHASE_JOINED, Ordering::Release);

        if results.is_empty() && worker_failures > 0 {
            return Err(BenchError::orchestration(format!(
                "All {} workers failed to complete",
                worker_failures
            )));
        }

        let elapsed = start.elapsed();
        let summary = self.stats.summary();
        let processed = total_processed(&results);
        let mut report = aggregate_worker_stats(results, summary, elapsed, started_at);
        report.interrupted = self.jobs.is_closed() && self.jobs.dispensed() < self.jobs.total();

        tracing::info!(
            elapsed_secs = elapsed.as_secs_f64(),
            processed,
            sent = summary.total_sent,
            success = summary.total_success,
            fail = summary.total_fail,
            rps = report.requests_per_second,
            interrupted = report.interrupted,
            "Run completed"
        );

        Ok(report)
    }

    /// Run with Ctrl+C handling
    ///
    /// Ctrl+C closes the job source: in-flight requests complete and are
    /// recorded, remaining tokens are abandoned.
    pub async fn run_with_signal_handling(&self) -> BenchResult<RunReport> {
        let jobs = Arc::clone(&self.jobs);

        let signal_handle = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Received Ctrl+C, draining in-flight requests...");
                    jobs.close();
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                }
            }
        });

        let result = self.run().await;

        signal_handle.abort();

        result
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("sender", &self.sender.name())
            .field("phase", &self.phase())
            .finish()
    }
}
