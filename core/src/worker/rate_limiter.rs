//! Global rate limiting for request dispatch

use governor::{clock::DefaultClock, state::InMemoryState, state::NotKeyed, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::time::Duration;

/// Evenly spaced permit source shared by every worker
///
/// Backed by a governor GCRA limiter with a period of `1/R` seconds and a
/// burst of one, so permits are spaced evenly and an unused permit is not
/// banked beyond a single slot. Share one instance via `Arc`; cloning the
/// configuration into each worker would multiply the rate.
pub struct RequestRateLimiter {
    limiter: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    rate_limit: u32,
}

impl RequestRateLimiter {
    /// Create a new rate limiter
    ///
    /// # Arguments
    /// * `rate_limit` - Requests per second across all callers. 0 disables limiting.
    ///
    /// # Examples
    /// ```
    /// use http_bench_core::worker::RequestRateLimiter;
    ///
    /// let limiter = RequestRateLimiter::new(100);
    /// assert!(limiter.is_enabled());
    ///
    /// let unlimited = RequestRateLimiter::new(0);
    /// assert!(!unlimited.is_enabled());
    /// ```
    pub fn new(rate_limit: u32) -> Self {
        let limiter = permit_interval(rate_limit)
            .and_then(Quota::with_period)
            .map(|quota| RateLimiter::direct(quota.allow_burst(NonZeroU32::MIN)));

        if rate_limit > 0 && limiter.is_none() {
            tracing::debug!(rate_limit, "Permit interval rounds to zero, running unlimited");
        }

        Self {
            limiter,
            rate_limit,
        }
    }

    /// Create an unlimited rate limiter (no rate limiting)
    pub fn unlimited() -> Self {
        Self::new(0)
    }

    /// Wait until a permit is available
    ///
    /// Returns immediately if limiting is disabled.
    pub async fn wait(&self) {
        if let Some(ref limiter) = self.limiter {
            limiter.until_ready().await;
        }
    }

    /// Try to take a permit without waiting
    ///
    /// Always returns `true` if limiting is disabled.
    pub fn try_acquire(&self) -> bool {
        match &self.limiter {
            Some(limiter) => limiter.check().is_ok(),
            None => true,
        }
    }

    /// Check if rate limiting is enabled
    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Configured requests per second (0 = unlimited)
    pub fn rate_limit(&self) -> u32 {
        self.rate_limit
    }
}

/// Spacing between permits, `None` when the limiter should be disabled
///
/// Integer nanosecond division: rates above one billion per second round to a
/// zero interval and are treated as unlimited.
pub fn permit_interval(rate_limit: u32) -> Option<Duration> {
    if rate_limit == 0 {
        return None;
    }
    let nanos = 1_000_000_000u64 / u64::from(rate_limit);
    (nanos > 0).then(|| Duration::from_nanos(nanos))
}

impl Default for RequestRateLimiter {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl std::fmt::Debug for RequestRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestRateLimiter")
            .field("rate_limit", &self.rate_limit)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
