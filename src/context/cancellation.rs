//! Cooperative cancellation.

use std::cell::Cell;
use std::rc::Rc;

/// A shared, single-threaded cancellation flag.
///
/// Clones observe the same flag: tripping any clone cancels every context
/// holding one of them. Producers poll the flag at each yield point and at
/// each heap comparison; nothing is interrupted preemptively.
///
/// # Examples
///
/// ```rust
/// use ixseq::context::CancellationToken;
///
/// let token = CancellationToken::new();
/// let observer = token.clone();
///
/// assert!(!observer.is_cancelled());
/// token.cancel();
/// assert!(observer.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Trips the token. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Returns `true` once [`cancel`](Self::cancel) was called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}
