//! http-bench-core: concurrency core of a fixed-count HTTP load generator
//!
//! This crate provides everything between resolved configuration and the
//! final report:
//!
//! - Job source handing out exactly N tokens to concurrent workers
//! - Global rate limiter shared by all workers
//! - Request template and reqwest-backed request executor
//! - Lock-free statistics accumulator
//! - Worker loop and the orchestrator that runs the pool to completion

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod http;
pub mod job;
pub mod metrics;
pub mod orchestrator;
pub mod request;
pub mod response;
pub mod traits;
pub mod worker;

pub use config::{ConfigError, LoadConfig};
pub use error::*;
pub use http::HttpSender;
pub use job::{JobSource, JobToken};
pub use metrics::{ProgressSnapshot, RunSummary, StatsAccumulator};
pub use orchestrator::{Orchestrator, OrchestratorBuilder, PoolPhase, RunReport, WorkerSummary};
pub use request::RequestTemplate;
pub use response::{is_success_status, OutcomeStatus, RequestOutcome};
pub use traits::RequestSender;
pub use worker::{RequestRateLimiter, Worker, WorkerBuilder, WorkerStats};
