//! Load configuration types

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-request timeout applied when none (or zero) is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Idle connections kept per host for reuse
pub const DEFAULT_MAX_IDLE_PER_HOST: usize = 1000;

/// How long an idle pooled connection is kept
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// TCP keep-alive interval for pooled connections
pub const DEFAULT_TCP_KEEPALIVE: Duration = Duration::from_secs(30);

/// Load configuration
///
/// Resolved, already-parsed values that drive one run: how many requests,
/// how many concurrent workers, optional global rate limit and the
/// transport settings shared by every worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Number of concurrent workers (0 is coerced to 1)
    pub concurrency: usize,

    /// Total number of requests to send (must be > 0)
    pub total_requests: usize,

    /// Global requests per second ceiling, 0 = unlimited
    #[serde(default)]
    pub rate_limit: u32,

    /// Per-request timeout (zero means [`DEFAULT_TIMEOUT`])
    pub timeout: Duration,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub insecure: bool,

    /// Idle connections kept per host
    pub max_idle_per_host: usize,

    /// Idle connection lifetime
    pub idle_timeout: Duration,

    /// TCP keep-alive interval
    pub tcp_keepalive: Duration,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            concurrency: 50,
            total_requests: 1000,
            rate_limit: 0,
            timeout: DEFAULT_TIMEOUT,
            insecure: false,
            max_idle_per_host: DEFAULT_MAX_IDLE_PER_HOST,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            tcp_keepalive: DEFAULT_TCP_KEEPALIVE,
        }
    }
}

impl LoadConfig {
    /// Create a config for `total_requests` requests over `concurrency` workers
    pub fn new(concurrency: usize, total_requests: usize) -> Self {
        Self {
            concurrency,
            total_requests,
            ..Default::default()
        }
    }

    /// Set the global rate limit (requests per second, 0 = unlimited)
    pub fn with_rate_limit(mut self, rps: u32) -> Self {
        self.rate_limit = rps;
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Skip TLS certificate verification
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Set the number of idle connections kept per host
    pub fn with_max_idle_per_host(mut self, max_idle: usize) -> Self {
        self.max_idle_per_host = max_idle;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_requests == 0 {
            return Err(ConfigError::InvalidRequestCount);
        }
        Ok(())
    }

    /// Apply coercions: zero workers becomes one, zero timeout becomes the default
    pub fn normalized(mut self) -> Self {
        if self.concurrency == 0 {
            tracing::debug!("concurrency 0 coerced to 1");
            self.concurrency = 1;
        }
        if self.timeout.is_zero() {
            self.timeout = DEFAULT_TIMEOUT;
        }
        self
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Request count was zero or negative
    #[error("n must be > 0")]
    InvalidRequestCount,

    /// HTTP method token is not valid
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// Target is not an absolute http(s) URL
    #[error("invalid target URL: {0}")]
    InvalidUrl(String),

    /// Header name or value is not valid
    #[error("invalid header: {0}")]
    InvalidHeader(String),
}
