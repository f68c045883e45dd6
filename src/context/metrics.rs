//! Caller-owned counters for observability.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Name of the counter incremented by every heap comparison.
pub const COMPARISONS: &str = "comparisons";

/// A set of named counters shared by reference with an
/// [`ExecutionContext`](super::ExecutionContext).
///
/// Counters are observation only: no algorithm reads them back to make a
/// decision. Cloning a `Metrics` yields a handle onto the same counters.
///
/// # Examples
///
/// ```rust
/// use ixseq::context::{Metrics, COMPARISONS};
///
/// let metrics = Metrics::new();
/// metrics.increment(COMPARISONS);
/// metrics.add(COMPARISONS, 2);
/// assert_eq!(metrics.get(COMPARISONS), 3);
/// assert_eq!(metrics.get("unknown"), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    counters: Rc<RefCell<BTreeMap<&'static str, u64>>>,
}

impl Metrics {
    /// Creates an empty set of counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one to the named counter.
    pub fn increment(&self, name: &'static str) {
        self.add(name, 1);
    }

    /// Adds `amount` to the named counter.
    pub fn add(&self, name: &'static str, amount: u64) {
        let mut counters = self.counters.borrow_mut();
        let counter = counters.entry(name).or_insert(0);
        *counter = counter.saturating_add(amount);
    }

    /// Current value of the named counter; `0` if it was never touched.
    #[must_use]
    pub fn get(&self, name: &str) -> u64 {
        self.counters.borrow().get(name).copied().unwrap_or(0)
    }

    /// Resets every counter to zero.
    pub fn reset(&self) {
        self.counters.borrow_mut().clear();
    }

    /// Copies all counters out, in name order.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<&'static str, u64> {
        self.counters.borrow().clone()
    }
}
