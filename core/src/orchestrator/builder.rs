//! Builder pattern for Orchestrator construction

use std::sync::Arc;
use std::time::Duration;

use crate::config::LoadConfig;
use crate::error::{BenchError, BenchResult};
use crate::http::HttpSender;
use crate::request::RequestTemplate;
use crate::traits::RequestSender;

use super::executor::Orchestrator;

/// Builder for creating an Orchestrator with proper configuration
///
/// When no sender is supplied, an [`HttpSender`] is built from the load
/// configuration so every worker shares one connection pool.
///
/// # Example
///
/// ```ignore
/// let orchestrator = OrchestratorBuilder::new()
///     .concurrency(100)
///     .total_requests(10_000)
///     .rate_limit(500)
///     .template(RequestTemplate::new("GET", "http://localhost:8000/")?)
///     .build()?;
///
/// let report = orchestrator.run().await?;
/// ```
pub struct OrchestratorBuilder {
    config: LoadConfig,
    template: Option<RequestTemplate>,
    sender: Option<Arc<dyn RequestSender>>,
}

impl OrchestratorBuilder {
    /// Create a new orchestrator builder with default configuration
    pub fn new() -> Self {
        Self {
            config: LoadConfig::default(),
            template: None,
            sender: None,
        }
    }

    /// Set the full load configuration
    pub fn config(mut self, config: LoadConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the number of workers
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.config.concurrency = concurrency;
        self
    }

    /// Set the total number of requests
    pub fn total_requests(mut self, total: usize) -> Self {
        self.config.total_requests = total;
        self
    }

    /// Set the global rate limit (requests per second, 0 = unlimited)
    pub fn rate_limit(mut self, rps: u32) -> Self {
        self.config.rate_limit = rps;
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the request template
    pub fn template(mut self, template: RequestTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// Set a custom request sender
    pub fn sender(mut self, sender: Arc<dyn RequestSender>) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Build the orchestrator
    ///
    /// # Errors
    ///
    /// Returns an error if the template is missing, the configuration is
    /// invalid (e.g. zero requests) or the HTTP client cannot be built.
    pub fn build(self) -> BenchResult<Orchestrator> {
        let template = self
            .template
            .ok_or_else(|| BenchError::missing_config("template"))?;

        let config = self.config.normalized();
        config.validate()?;

        let sender = match self.sender {
            Some(sender) => sender,
            None => Arc::new(HttpSender::new(&config)?),
        };

        Orchestrator::new(config, Arc::new(template), sender)
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
