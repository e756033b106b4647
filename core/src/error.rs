//! Error types for http-bench-core

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Classification of a failed request that reached the transport layer
///
/// These never surface as `Err` from the pool; they are recorded as failed
/// outcomes and used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The per-request timeout elapsed
    Timeout,
    /// DNS, connect, refused or TLS handshake failure
    Connection,
    /// The request could not be written to the wire
    Request,
    /// Reading the response body failed
    Body,
    /// Anything reqwest does not classify further
    Unknown,
}

impl ErrorKind {
    /// Classify a transport error reported by reqwest
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection
        } else if err.is_body() || err.is_decode() {
            ErrorKind::Body
        } else if err.is_request() {
            ErrorKind::Request
        } else {
            ErrorKind::Unknown
        }
    }

    /// Short lowercase label used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::Connection => "connection",
            ErrorKind::Request => "request",
            ErrorKind::Body => "body",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a [`BenchError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchErrorKind {
    /// Invalid configuration value
    Config,
    /// A required component was not supplied to a builder
    MissingConfig,
    /// The HTTP transport could not be constructed
    Transport,
    /// The worker pool failed as a whole
    Orchestration,
}

impl fmt::Display for BenchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BenchErrorKind::Config => "configuration error",
            BenchErrorKind::MissingConfig => "missing configuration",
            BenchErrorKind::Transport => "transport error",
            BenchErrorKind::Orchestration => "orchestration error",
        };
        f.write_str(label)
    }
}

/// Core error type
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct BenchError {
    /// Error category
    pub kind: BenchErrorKind,
    /// Human-readable detail
    pub message: String,
}

impl BenchError {
    fn new(kind: BenchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Invalid configuration
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(BenchErrorKind::Config, message)
    }

    /// A builder was missing a required field
    pub fn missing_config(field: &str) -> Self {
        Self::new(
            BenchErrorKind::MissingConfig,
            format!("missing required field `{field}`"),
        )
    }

    /// The HTTP client could not be built
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(BenchErrorKind::Transport, message)
    }

    /// The pool could not complete
    pub fn orchestration(message: impl Into<String>) -> Self {
        Self::new(BenchErrorKind::Orchestration, message)
    }
}

impl From<crate::config::ConfigError> for BenchError {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::config(err.to_string())
    }
}

/// Result type alias
pub type BenchResult<T> = std::result::Result<T, BenchError>;
