//! Periodic progress display driven by the shared accumulator

use std::sync::Arc;
use std::time::Duration;

use http_bench_core::{ProgressSnapshot, StatsAccumulator};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinHandle;

/// Background task that samples the accumulator on a fixed interval
pub struct ProgressReporter {
    bar: ProgressBar,
    stats: Arc<StatsAccumulator>,
    total: u64,
    handle: JoinHandle<()>,
}

impl ProgressReporter {
    /// Start reporting; the first sample is taken immediately
    pub fn spawn(stats: Arc<StatsAccumulator>, total: u64, interval: Duration) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {msg}")
                .map(|style| style.progress_chars("#>-"))
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let handle = {
            let bar = bar.clone();
            let stats = Arc::clone(&stats);
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                loop {
                    ticker.tick().await;
                    update(&bar, stats.progress(), total);
                }
            })
        };

        Self {
            bar,
            stats,
            total,
            handle,
        }
    }

    /// Stop the task and leave the final counts on screen
    pub fn finish(self) {
        self.handle.abort();
        update(&self.bar, self.stats.progress(), self.total);
        self.bar.finish();
    }
}

fn update(bar: &ProgressBar, snapshot: ProgressSnapshot, total: u64) {
    bar.set_position(snapshot.sent.min(total));
    bar.set_message(progress_line(snapshot, total));
}

/// One-line progress text
pub fn progress_line(snapshot: ProgressSnapshot, total: u64) -> String {
    format!(
        "Sent: {}/{} | Success: {} | Fail: {}",
        snapshot.sent, total, snapshot.success, snapshot.fail
    )
}
