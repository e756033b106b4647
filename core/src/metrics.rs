//! Shared run statistics
//!
//! [`StatsAccumulator`] is the only contended mutable state in a run. Every
//! field is an independent atomic: counters use `fetch_add`, min/max use a
//! compare-and-retry loop so concurrent samples are never lost. Readers of
//! several fields during a run may observe a mix of old and new values; the
//! final [`RunSummary`] is only meaningful after the pool has joined.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

// Every field is updated independently and readers need no cross-field
// ordering; the pool join provides happens-before for the final summary.
const ORDER: Ordering = Ordering::Relaxed;

/// Lock-free aggregate of sent/success/fail counts and latency extrema
#[derive(Debug)]
pub struct StatsAccumulator {
    total_sent: AtomicU64,
    total_success: AtomicU64,
    total_fail: AtomicU64,
    min_latency_ns: AtomicU64,
    max_latency_ns: AtomicU64,
    sum_latency_ns: AtomicU64,
}

impl Default for StatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsAccumulator {
    /// Create an empty accumulator; min starts at `u64::MAX` so the first sample wins
    pub fn new() -> Self {
        Self {
            total_sent: AtomicU64::new(0),
            total_success: AtomicU64::new(0),
            total_fail: AtomicU64::new(0),
            min_latency_ns: AtomicU64::new(u64::MAX),
            max_latency_ns: AtomicU64::new(0),
            sum_latency_ns: AtomicU64::new(0),
        }
    }

    /// Count a request as sent; called before any network I/O
    pub fn record_sent(&self) {
        self.total_sent.fetch_add(1, ORDER);
    }

    /// Count a completed request as success or failure
    pub fn record_outcome(&self, success: bool) {
        if success {
            self.total_success.fetch_add(1, ORDER);
        } else {
            self.total_fail.fetch_add(1, ORDER);
        }
    }

    /// Add one latency sample in nanoseconds
    pub fn record_latency_ns(&self, ns: u64) {
        self.sum_latency_ns.fetch_add(ns, ORDER);
        update_extremum(&self.min_latency_ns, ns, |candidate, current| {
            candidate < current
        });
        update_extremum(&self.max_latency_ns, ns, |candidate, current| {
            candidate > current
        });
    }

    /// Add one latency sample
    pub fn record_latency(&self, latency: Duration) {
        let ns = u64::try_from(latency.as_nanos()).unwrap_or(u64::MAX);
        self.record_latency_ns(ns);
    }

    /// Live counts, safe to call while workers are running
    pub fn progress(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            sent: self.total_sent.load(ORDER),
            success: self.total_success.load(ORDER),
            fail: self.total_fail.load(ORDER),
        }
    }

    /// Final statistics; only consistent once every worker has joined
    pub fn summary(&self) -> RunSummary {
        let total_sent = self.total_sent.load(ORDER);
        let total_success = self.total_success.load(ORDER);
        let total_fail = self.total_fail.load(ORDER);
        let min = self.min_latency_ns.load(ORDER);
        let max = self.max_latency_ns.load(ORDER);
        let sum_latency_ns = self.sum_latency_ns.load(ORDER);

        let sampled = min != u64::MAX;
        RunSummary {
            total_sent,
            total_success,
            total_fail,
            min_latency_ns: sampled.then_some(min),
            max_latency_ns: sampled.then_some(max),
            sum_latency_ns,
            average_latency_ns: sum_latency_ns.checked_div(total_success),
        }
    }
}

/// Replace `slot` with `candidate` while `better(candidate, current)` holds
///
/// Re-reads and retries whenever another thread changed the slot between the
/// load and the exchange.
fn update_extremum(slot: &AtomicU64, candidate: u64, better: impl Fn(u64, u64) -> bool) {
    let mut current = slot.load(ORDER);
    while better(candidate, current) {
        match slot.compare_exchange_weak(current, candidate, ORDER, ORDER) {
            Ok(_) => break,
            Err(observed) => current = observed,
        }
    }
}

/// Live view for progress display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Requests started
    pub sent: u64,
    /// Requests completed successfully
    pub success: u64,
    /// Requests completed with a failure
    pub fail: u64,
}

impl ProgressSnapshot {
    /// Requests started but not yet completed
    pub fn in_flight(&self) -> u64 {
        self.sent.saturating_sub(self.success + self.fail)
    }
}

/// Final run statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Requests started
    pub total_sent: u64,
    /// Requests with a status in `[200, 400)`
    pub total_success: u64,
    /// Requests with any other status or a transport error
    pub total_fail: u64,
    /// Smallest latency sample, `None` if no sample was recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_latency_ns: Option<u64>,
    /// Largest latency sample, `None` if no sample was recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_latency_ns: Option<u64>,
    /// Sum of all latency samples, failures included
    pub sum_latency_ns: u64,
    /// `sum_latency_ns / total_success`; `None` when nothing succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_latency_ns: Option<u64>,
}

impl RunSummary {
    /// Completed requests (success + fail)
    pub fn total_completed(&self) -> u64 {
        self.total_success + self.total_fail
    }

    /// Success ratio in `0.0..=1.0`
    pub fn success_rate(&self) -> f64 {
        let completed = self.total_completed();
        if completed == 0 {
            0.0
        } else {
            self.total_success as f64 / completed as f64
        }
    }

    /// Minimum latency as a `Duration`
    pub fn min_latency(&self) -> Option<Duration> {
        self.min_latency_ns.map(Duration::from_nanos)
    }

    /// Maximum latency as a `Duration`
    pub fn max_latency(&self) -> Option<Duration> {
        self.max_latency_ns.map(Duration::from_nanos)
    }

    /// Success-weighted average latency as a `Duration`
    pub fn average_latency(&self) -> Option<Duration> {
        self.average_latency_ns.map(Duration::from_nanos)
    }
}
