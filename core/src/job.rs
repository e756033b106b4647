//! Job source: a fixed, finite supply of request tokens
//!
//! The source is created holding exactly `total` tokens and is closed for
//! production from the start. Any number of workers may call
//! [`JobSource::next`] concurrently; each token is handed to exactly one
//! caller and `None` is returned once the supply is exhausted or the source
//! has been closed early.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::config::ConfigError;

/// One request to send
///
/// Identity is irrelevant beyond the count; the index is kept for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobToken(usize);

impl JobToken {
    /// Position of this token in dispatch order
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Lock-free, multi-consumer supply of [`JobToken`]s
#[derive(Debug)]
pub struct JobSource {
    total: usize,
    claimed: AtomicUsize,
    closed: AtomicBool,
}

impl JobSource {
    /// Create a source holding exactly `total` tokens
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidRequestCount`] when `total` is zero.
    pub fn new(total: usize) -> Result<Self, ConfigError> {
        if total == 0 {
            return Err(ConfigError::InvalidRequestCount);
        }
        Ok(Self {
            total,
            claimed: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        })
    }

    /// Take the next token, or `None` if the source is exhausted or closed
    ///
    /// Never blocks. The claim only advances while tokens remain, so the
    /// counter never overshoots `total`.
    pub fn next(&self) -> Option<JobToken> {
        if self.closed.load(Ordering::Acquire) {
            return None;
        }
        self.claimed
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |claimed| {
                (claimed < self.total).then_some(claimed + 1)
            })
            .ok()
            .map(JobToken)
    }

    /// Stop handing out tokens; in-flight work is unaffected
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Total number of tokens the source was created with
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of tokens handed out so far
    pub fn dispensed(&self) -> usize {
        self.claimed.load(Ordering::Acquire)
    }

    /// Tokens still available (0 once closed)
    pub fn remaining(&self) -> usize {
        if self.is_closed() {
            0
        } else {
            self.total - self.dispensed()
        }
    }

    /// True once no further token will be handed out
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}
