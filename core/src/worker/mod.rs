//! Worker module for executing load requests
//!
//! The Worker is the execution unit of the pool, responsible for one tight
//! loop: **take token -> wait for permit -> send -> record -> repeat**.
//!
//! Each Worker is a tokio task that:
//!
//! 1. Claims the next token from the shared [`JobSource`](crate::job::JobSource)
//! 2. Waits on the shared [`RequestRateLimiter`] when limiting is enabled
//! 3. Sends one request through a [`RequestSender`](crate::traits::RequestSender)
//! 4. Records sent/outcome/latency into the shared accumulator
//! 5. Stops once the job source reports exhaustion
//!
//! # Example
//!
//! ```ignore
//! use http_bench_core::worker::WorkerBuilder;
//!
//! let worker = WorkerBuilder::new(0)
//!     .sender(sender)
//!     .template(template)
//!     .jobs(jobs)
//!     .stats(stats)
//!     .rate_limiter(limiter)
//!     .build()?;
//!
//! let stats = worker.run().await?;
//! println!("Processed: {}", stats.processed);
//! ```

mod builder;
mod executor;
mod rate_limiter;
mod stats;

pub use builder::WorkerBuilder;
pub use executor::Worker;
pub use rate_limiter::{permit_interval, RequestRateLimiter};
pub use stats::WorkerStats;
