//! Builder pattern for Worker construction

use crate::error::{BenchError, BenchResult};
use crate::job::JobSource;
use crate::metrics::StatsAccumulator;
use crate::request::RequestTemplate;
use crate::traits::RequestSender;

use super::executor::Worker;
use super::rate_limiter::RequestRateLimiter;

use std::sync::Arc;

/// Builder for creating Worker instances
///
/// Every shared component except the rate limiter is required. When no
/// limiter is supplied the worker runs unlimited.
///
/// # Example
/// ```ignore
/// let worker = WorkerBuilder::new(0)
///     .sender(sender)
///     .template(template)
///     .jobs(jobs)
///     .stats(stats)
///     .rate_limiter(limiter)
///     .build()?;
/// ```
pub struct WorkerBuilder {
    id: usize,
    sender: Option<Arc<dyn RequestSender>>,
    template: Option<Arc<RequestTemplate>>,
    jobs: Option<Arc<JobSource>>,
    stats: Option<Arc<StatsAccumulator>>,
    rate_limiter: Option<Arc<RequestRateLimiter>>,
}

impl WorkerBuilder {
    /// Create a new builder with the given worker ID
    pub fn new(id: usize) -> Self {
        Self {
            id,
            sender: None,
            template: None,
            jobs: None,
            stats: None,
            rate_limiter: None,
        }
    }

    /// Set the request sender
    pub fn sender(mut self, sender: Arc<dyn RequestSender>) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Set the request template
    pub fn template(mut self, template: Arc<RequestTemplate>) -> Self {
        self.template = Some(template);
        self
    }

    /// Set the shared job source
    pub fn jobs(mut self, jobs: Arc<JobSource>) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Set the shared stats accumulator
    pub fn stats(mut self, stats: Arc<StatsAccumulator>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Set the shared rate limiter
    pub fn rate_limiter(mut self, limiter: Arc<RequestRateLimiter>) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    /// Build the Worker
    ///
    /// # Errors
    /// Returns an error if any required field is missing.
    pub fn build(self) -> BenchResult<Worker> {
        let sender = self.sender.ok_or(BenchError::missing_config("sender"))?;
        let template = self
            .template
            .ok_or(BenchError::missing_config("template"))?;
        let jobs = self.jobs.ok_or(BenchError::missing_config("jobs"))?;
        let stats = self.stats.ok_or(BenchError::missing_config("stats"))?;
        let rate_limiter = self
            .rate_limiter
            .unwrap_or_else(|| Arc::new(RequestRateLimiter::unlimited()));

        Ok(Worker::new(
            self.id,
            sender,
            template,
            jobs,
            stats,
            rate_limiter,
        ))
    }
}
