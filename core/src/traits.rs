//! Core traits
//!
//! The worker only depends on [`RequestSender`]; the reqwest-backed
//! implementation lives in [`crate::http`] and tests plug in mocks.

use async_trait::async_trait;

use crate::request::RequestTemplate;
use crate::response::RequestOutcome;

/// Executes one request from a template and reports how it went
///
/// Implementations must be safe to share across all workers and must not
/// return errors: every failure is folded into the returned
/// [`RequestOutcome`].
#[async_trait]
pub trait RequestSender: Send + Sync {
    /// Sender identifier used in logs (e.g. "http")
    fn name(&self) -> &str;

    /// Send one request and classify the result
    async fn send(&self, template: &RequestTemplate) -> RequestOutcome;
}
