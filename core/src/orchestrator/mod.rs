//! Orchestrator for the worker pool lifecycle
//!
//! The Orchestrator coordinates a complete run:
//! - Building the shared job source, accumulator and rate limiter
//! - Spawning a fixed number of worker tasks
//! - Blocking until every worker has joined
//! - Assembling the final report
//!
//! # Example
//!
//! ```ignore
//! use http_bench_core::{OrchestratorBuilder, RequestTemplate};
//!
//! let orchestrator = OrchestratorBuilder::new()
//!     .concurrency(50)
//!     .total_requests(1000)
//!     .template(RequestTemplate::new("GET", "http://localhost:8000/")?)
//!     .build()?;
//!
//! let report = orchestrator.run_with_signal_handling().await?;
//! ```

mod aggregator;
mod builder;
mod executor;

pub use aggregator::{aggregate_worker_stats, total_processed, RunReport, WorkerSummary};
pub use builder::OrchestratorBuilder;
pub use executor::{Orchestrator, PoolPhase};
