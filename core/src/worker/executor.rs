//! Worker execution loop

use crate::error::BenchResult;
use crate::job::{JobSource, JobToken};
use crate::metrics::StatsAccumulator;
use crate::request::RequestTemplate;
use crate::traits::RequestSender;

use super::rate_limiter::RequestRateLimiter;
use super::stats::WorkerStats;

use std::sync::Arc;

/// Worker executes requests in a loop: take token -> wait permit -> send -> record
///
/// Workers are tokio tasks spawned by the Orchestrator. Everything they
/// touch is shared through `Arc`: the job source, the read-only template,
/// the sender and its connection pool, the global rate limiter and the
/// lock-free stats accumulator.
pub struct Worker {
    /// Unique worker identifier
    id: usize,

    /// Request sender (shared across workers)
    sender: Arc<dyn RequestSender>,

    /// Request shape (shared, read-only)
    template: Arc<RequestTemplate>,

    /// Token supply (shared)
    jobs: Arc<JobSource>,

    /// Run-wide statistics (shared)
    stats: Arc<StatsAccumulator>,

    /// Global rate limiter (shared)
    rate_limiter: Arc<RequestRateLimiter>,
}

impl Worker {
    /// Create a new worker
    ///
    /// Use `WorkerBuilder` for a validated construction.
    pub fn new(
        id: usize,
        sender: Arc<dyn RequestSender>,
        template: Arc<RequestTemplate>,
        jobs: Arc<JobSource>,
        stats: Arc<StatsAccumulator>,
        rate_limiter: Arc<RequestRateLimiter>,
    ) -> Self {
        Self {
            id,
            sender,
            template,
            jobs,
            stats,
            rate_limiter,
        }
    }

    /// Run the worker loop until the job source is exhausted or closed
    pub async fn run(self) -> BenchResult<WorkerStats> {
        let mut stats = WorkerStats::new();
        stats.start();

        tracing::debug!(worker_id = self.id, "Worker started");

        while let Some(token) = self.jobs.next() {
            self.rate_limiter.wait().await;
            let success = self.execute_one(token).await;
            stats.record(success);
        }

        stats.stop();
        tracing::debug!(
            worker_id = self.id,
            processed = stats.processed,
            failed = stats.failed,
            elapsed_ms = ?stats.elapsed().map(|d| d.as_millis()),
            "Worker finished"
        );

        Ok(stats)
    }

    /// Execute a single request and record it; returns whether it succeeded
    async fn execute_one(&self, token: JobToken) -> bool {
        // 1. Visible as in-flight before any network I/O
        self.stats.record_sent();

        // 2. Send and classify
        let outcome = self.sender.send(&self.template).await;

        // 3. Record latency (if the request reached the network) and outcome
        if let Some(latency) = outcome.latency {
            self.stats.record_latency(latency);
        }
        let success = outcome.is_success();
        self.stats.record_outcome(success);

        if success {
            tracing::trace!(
                worker_id = self.id,
                job = token.index(),
                latency_us = ?outcome.latency.map(|d| d.as_micros()),
                "Request completed"
            );
        } else {
            tracing::debug!(
                worker_id = self.id,
                job = token.index(),
                status = ?outcome.status,
                "Request failed"
            );
        }

        success
    }

    /// Get the worker ID
    pub fn id(&self) -> usize {
        self.id
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("id", &self.id)
            .field("sender", &self.sender.name())
            .field("rate_limiter", &self.rate_limiter)
            .field("remaining", &self.jobs.remaining())
            .finish()
    }
}
