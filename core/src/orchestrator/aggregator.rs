//! Result aggregation from multiple workers

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::metrics::RunSummary;
use crate::worker::WorkerStats;

/// Per-worker counts carried in the final report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerSummary {
    /// Worker index, `0..concurrency`
    pub worker_id: usize,

    /// Tokens this worker executed
    pub processed: usize,

    /// Requests that succeeded
    pub succeeded: usize,

    /// Requests that failed
    pub failed: usize,

    /// Time from the worker's first token claim to its exit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<Duration>,
}

impl WorkerSummary {
    /// Snapshot a joined worker's stats
    pub fn from_stats(worker_id: usize, stats: &WorkerStats) -> Self {
        Self {
            worker_id,
            processed: stats.processed,
            succeeded: stats.succeeded,
            failed: stats.failed,
            elapsed: stats.elapsed(),
        }
    }

    /// Success ratio in `0.0..=1.0`
    pub fn success_rate(&self) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            self.succeeded as f64 / self.processed as f64
        }
    }
}

/// Final report of one run, assembled after every worker has joined
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Totals and latency extrema from the shared accumulator
    pub summary: RunSummary,

    /// One entry per worker that joined successfully, ordered by id
    pub workers: Vec<WorkerSummary>,

    /// Wall-clock time from first spawn to last join
    pub elapsed: Duration,

    /// Completed requests per second over `elapsed`
    pub requests_per_second: f64,

    /// When the run started
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// True when the job source was closed with tokens still undispensed
    #[serde(default)]
    pub interrupted: bool,
}

impl RunReport {
    /// Success ratio in `0.0..=1.0`
    pub fn success_rate(&self) -> f64 {
        self.summary.success_rate()
    }

    /// Number of workers that joined successfully
    pub fn total_workers(&self) -> usize {
        self.workers.len()
    }
}

/// Combine worker results with the shared summary
pub fn aggregate_worker_stats(
    mut workers: Vec<WorkerSummary>,
    summary: RunSummary,
    elapsed: Duration,
    started_at: chrono::DateTime<chrono::Utc>,
) -> RunReport {
    let secs = elapsed.as_secs_f64();
    let requests_per_second = if secs > 0.0 {
        summary.total_completed() as f64 / secs
    } else {
        0.0
    };
    workers.sort_by_key(|w| w.worker_id);

    RunReport {
        summary,
        workers,
        elapsed,
        requests_per_second,
        started_at,
        interrupted: false,
    }
}

/// Sum of tokens processed across workers
pub fn total_processed(workers: &[WorkerSummary]) -> usize {
    workers.iter().map(|w| w.processed).sum()
}
