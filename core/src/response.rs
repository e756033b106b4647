//! Per-request outcome and status classification

use std::time::Duration;

use crate::error::ErrorKind;

/// Whether an HTTP status code counts as a successful request
///
/// Anything in `[200, 400)` succeeds; 1xx, 4xx and 5xx fail.
pub fn is_success_status(code: u16) -> bool {
    (200..400).contains(&code)
}

/// How a single request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// Response received with a status in `[200, 400)`
    Success(u16),
    /// Response received with any other status
    HttpError(u16),
    /// The request failed at the transport layer
    Transport(ErrorKind),
    /// The request could not be constructed and never reached the network
    Build,
}

impl OutcomeStatus {
    /// Check if this status indicates success
    pub fn is_success(&self) -> bool {
        matches!(self, OutcomeStatus::Success(_))
    }
}

/// Result of executing one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOutcome {
    /// Classification
    pub status: OutcomeStatus,

    /// Measured latency; `None` for requests that never reached the network
    pub latency: Option<Duration>,
}

impl RequestOutcome {
    /// Outcome for a received response
    pub fn from_status(code: u16, latency: Duration) -> Self {
        let status = if is_success_status(code) {
            OutcomeStatus::Success(code)
        } else {
            OutcomeStatus::HttpError(code)
        };
        Self {
            status,
            latency: Some(latency),
        }
    }

    /// Outcome for a transport failure
    pub fn transport(kind: ErrorKind, latency: Duration) -> Self {
        Self {
            status: OutcomeStatus::Transport(kind),
            latency: Some(latency),
        }
    }

    /// Outcome for a request that failed before dispatch
    pub fn build_failure() -> Self {
        Self {
            status: OutcomeStatus::Build,
            latency: None,
        }
    }

    /// Check if the request succeeded
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_boundaries() {
        assert!(!is_success_status(199));
        assert!(is_success_status(200));
        assert!(is_success_status(204));
        assert!(is_success_status(302));
        assert!(is_success_status(399));
        assert!(!is_success_status(400));
        assert!(!is_success_status(404));
        assert!(!is_success_status(500));
    }

    #[test]
    fn test_from_status() {
        let ok = RequestOutcome::from_status(200, Duration::from_millis(5));
        assert!(ok.is_success());
        assert_eq!(ok.status, OutcomeStatus::Success(200));
        assert_eq!(ok.latency, Some(Duration::from_millis(5)));

        let not_found = RequestOutcome::from_status(404, Duration::from_millis(5));
        assert!(!not_found.is_success());
        assert_eq!(not_found.status, OutcomeStatus::HttpError(404));
    }

    #[test]
    fn test_transport_failure_keeps_latency() {
        let outcome = RequestOutcome::transport(ErrorKind::Timeout, Duration::from_secs(1));
        assert!(!outcome.is_success());
        assert_eq!(outcome.latency, Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_build_failure_has_no_latency() {
        let outcome = RequestOutcome::build_failure();
        assert!(!outcome.is_success());
        assert_eq!(outcome.status, OutcomeStatus::Build);
        assert!(outcome.latency.is_none());
    }
}
