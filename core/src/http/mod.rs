//! reqwest-backed request executor
//!
//! One [`HttpSender`] (and therefore one connection pool) is shared by every
//! worker. Each call:
//!
//! 1. builds a request from the template with the per-request timeout,
//! 2. times the exchange from dispatch until response headers or error,
//! 3. drains and discards the body so the connection goes back to the pool,
//! 4. classifies the status (`[200, 400)` succeeds).

use async_trait::async_trait;
use std::time::{Duration, Instant};

use crate::config::LoadConfig;
use crate::error::{BenchError, BenchResult, ErrorKind};
use crate::request::RequestTemplate;
use crate::response::RequestOutcome;
use crate::traits::RequestSender;

/// HTTP sender over a shared, keep-alive connection pool
#[derive(Debug, Clone)]
pub struct HttpSender {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpSender {
    /// Build the shared client from the load configuration
    ///
    /// # Errors
    /// Returns a transport error if the TLS backend or client cannot be
    /// initialised.
    pub fn new(config: &LoadConfig) -> BenchResult<Self> {
        let config = config.clone().normalized();
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .pool_idle_timeout(config.idle_timeout)
            .tcp_keepalive(config.tcp_keepalive)
            .danger_accept_invalid_certs(config.insecure)
            .build()
            .map_err(|e| BenchError::transport(e.to_string()))?;

        Ok(Self::with_client(client, config.timeout))
    }

    /// Use an existing client
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl RequestSender for HttpSender {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, template: &RequestTemplate) -> RequestOutcome {
        let request = match template.build_request(&self.client, self.timeout) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "Failed to build request");
                return RequestOutcome::build_failure();
            }
        };

        let start = Instant::now();
        let result = self.client.execute(request).await;
        let latency = start.elapsed();

        let mut response = match result {
            Ok(response) => response,
            Err(e) => {
                let kind = ErrorKind::from_reqwest(&e);
                tracing::trace!(error = %e, kind = %kind, "Transport error");
                return RequestOutcome::transport(kind, latency);
            }
        };

        let status = response.status().as_u16();
        if let Err(e) = drain_body(&mut response).await {
            tracing::trace!(status, error = %e, "Failed to drain response body");
        }

        RequestOutcome::from_status(status, latency)
    }
}

/// Read the body to completion and discard it
async fn drain_body(response: &mut reqwest::Response) -> reqwest::Result<u64> {
    let mut drained = 0u64;
    while let Some(chunk) = response.chunk().await? {
        drained += chunk.len() as u64;
    }
    Ok(drained)
}
