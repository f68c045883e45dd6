//! The execution context threaded through every call.
//!
//! Every producer, comparator and algorithm in this crate receives an
//! [`ExecutionContext`] explicitly. It carries:
//!
//! - a [`CancellationToken`] polled at each yield point and heap comparison;
//! - an optional deadline, turned into [`CancelReason::DeadlineExceeded`];
//! - an optional [`Metrics`] handle, incremented for observation only.
//!
//! The context is single-threaded by construction (`Rc` inside), matching
//! the cooperative pull model of the crate.
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use ixseq::context::{CancellationToken, ExecutionContext, Metrics};
//!
//! let token = CancellationToken::new();
//! let context = ExecutionContext::new()
//!     .with_cancellation(token.clone())
//!     .with_timeout(Duration::from_secs(60))
//!     .with_metrics(Metrics::new());
//!
//! assert!(context.check().is_ok());
//! token.cancel();
//! assert!(context.check().unwrap_err().is_cancellation());
//! ```

mod cancellation;
mod metrics;

pub use cancellation::CancellationToken;
pub use metrics::{COMPARISONS, Metrics};

use std::time::{Duration, Instant};

use crate::error::{CancelReason, Error};

/// Cancellation, deadline and metrics for one logical operation.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    cancellation: CancellationToken,
    deadline: Option<Instant>,
    metrics: Option<Metrics>,
}

static_assertions::assert_not_impl_any!(ExecutionContext: Send, Sync);

impl ExecutionContext {
    /// A context that is never cancelled and records nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Sets an absolute deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets a deadline relative to now.
    ///
    /// A timeout too large to be represented as an [`Instant`] leaves the
    /// context without a deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    /// Attaches a metrics handle.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// The cancellation token of this context.
    #[must_use]
    pub const fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// The deadline, if one was set.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The attached metrics, if any.
    #[must_use]
    pub const fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    /// Returns the cancellation error if the token was tripped or the
    /// deadline has passed.
    ///
    /// # Errors
    ///
    /// [`Error::Cancelled`] with the matching [`CancelReason`].
    pub fn check(&self) -> Result<(), Error> {
        if self.cancellation.is_cancelled() {
            return Err(Error::Cancelled(CancelReason::Cancelled));
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                Err(Error::Cancelled(CancelReason::DeadlineExceeded))
            }
            _ => Ok(()),
        }
    }

    /// Increments a named counter when metrics are attached.
    pub fn increment(&self, name: &'static str) {
        if let Some(metrics) = &self.metrics {
            metrics.increment(name);
        }
    }
}
