//! Partial heap sort.
//!
//! The input is drained into a buffer and turned into a binary min-heap in
//! O(n) with bottom-up sift-down. Each pull then pops the root, so asking
//! for the first `k` elements costs O(n + k log n) comparisons instead of a
//! full O(n log n) sort.

use std::ops::ControlFlow;

use tracing::debug;

use super::Less;
use crate::context::{COMPARISONS, ExecutionContext};
use crate::error::Error;
use crate::sequence::{LazySequence, Visitor, emit};

/// Initial capacity of the buffer the input is drained into.
pub const DEFAULT_CAPACITY_HINT: usize = 1000;

/// An element together with its position in the input, used to break ties.
struct Entry<T> {
    arrival: usize,
    value: T,
}

/// A call-scoped binary min-heap over a `Vec`.
///
/// Children of `i` live at `2i + 1` and `2i + 2`.
struct Heap<'h, T, L> {
    entries: Vec<Entry<T>>,
    less: &'h L,
    context: &'h ExecutionContext,
    comparisons: u64,
}

impl<'h, T, L: Less<T>> Heap<'h, T, L> {
    const fn new(entries: Vec<Entry<T>>, less: &'h L, context: &'h ExecutionContext) -> Self {
        Self {
            entries,
            less,
            context,
            comparisons: 0,
        }
    }

    const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Strict order on entries: the comparator first, arrival order for
    /// elements it considers equivalent. Counts as one comparison.
    fn entry_less(&mut self, left: usize, right: usize) -> Result<bool, Error> {
        self.comparisons += 1;
        self.context.increment(COMPARISONS);
        let left = &self.entries[left];
        let right = &self.entries[right];
        if self.less.less(self.context, &left.value, &right.value)? {
            return Ok(true);
        }
        if self.less.less(self.context, &right.value, &left.value)? {
            return Ok(false);
        }
        Ok(left.arrival < right.arrival)
    }

    fn heapify(&mut self) -> Result<(), Error> {
        let length = self.len();
        for index in (0..length / 2).rev() {
            self.sift_down(index)?;
        }
        Ok(())
    }

    fn sift_down(&mut self, mut index: usize) -> Result<(), Error> {
        let length = self.len();
        loop {
            self.context.check()?;
            let left = 2 * index + 1;
            if left >= length {
                return Ok(());
            }
            let right = left + 1;
            let mut child = left;
            if right < length && self.entry_less(right, left)? {
                child = right;
            }
            if !self.entry_less(child, index)? {
                return Ok(());
            }
            self.entries.swap(index, child);
            index = child;
        }
    }

    /// Removes the root, moving the last entry into its place without
    /// restoring the heap property. Call [`Self::sift_down`] on `0` before
    /// the next pop.
    fn take_root(&mut self) -> Option<T> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.swap_remove(0).value)
        }
    }
}

/// A lazy sequence yielding the items of `source` in ascending order.
///
/// Each visit drains `source` into a fresh buffer, heapifies it and pops
/// one element per item handed to the visitor. Sorting stops as soon as the
/// visitor stops, so the first `k` items cost `O(n + k log n)` comparisons.
///
/// Ties under the comparator are broken by arrival order, which makes the
/// output deterministic even for partial orders.
///
/// Failure handling:
///
/// - an error item in `source` is emitted as the terminal item before any
///   sorting happens;
/// - a comparator error is emitted as the terminal item;
/// - cancellation is polled before every sift-down step and at every yield.
///
/// Every heap comparison increments the
/// [`COMPARISONS`](crate::context::COMPARISONS) counter of the context
/// metrics, when attached.
///
/// # Examples
///
/// ```rust
/// use ixseq::context::{COMPARISONS, ExecutionContext, Metrics};
/// use ixseq::ordering::{NaturalOrder, PartialHeapSort};
/// use ixseq::sequence::{LazySequenceExt, from_values};
///
/// let metrics = Metrics::new();
/// let context = ExecutionContext::new().with_metrics(metrics.clone());
///
/// let sorted = PartialHeapSort::new(from_values(vec![5, 3, 9, 1, 7]), NaturalOrder);
/// assert_eq!(sorted.take(2).try_collect(&context), Ok(vec![1, 3]));
/// assert!(metrics.get(COMPARISONS) > 0);
/// ```
#[derive(Debug, Clone)]
pub struct PartialHeapSort<S, L> {
    source: S,
    less: L,
    capacity_hint: usize,
}

impl<S, L> PartialHeapSort<S, L> {
    /// Sorts `source` by `less`.
    pub const fn new(source: S, less: L) -> Self {
        Self {
            source,
            less,
            capacity_hint: DEFAULT_CAPACITY_HINT,
        }
    }

    /// Overrides the initial buffer capacity. The buffer still grows past
    /// it when needed.
    #[must_use]
    pub const fn with_capacity_hint(mut self, capacity_hint: usize) -> Self {
        self.capacity_hint = capacity_hint;
        self
    }
}

impl<T, S, L> LazySequence for PartialHeapSort<S, L>
where
    S: LazySequence<Item = Result<T, Error>>,
    L: Less<T>,
{
    type Item = Result<T, Error>;

    fn visit(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Self::Item>,
    ) -> ControlFlow<()> {
        let mut entries = Vec::with_capacity(self.capacity_hint);
        let mut failure = None;
        let _ = self.source.visit(context, &mut |item| match item {
            Ok(value) => {
                entries.push(Entry {
                    arrival: entries.len(),
                    value,
                });
                ControlFlow::Continue(())
            }
            Err(error) => {
                failure = Some(error);
                ControlFlow::Break(())
            }
        });
        if let Some(error) = failure {
            let _ = visitor(Err(error));
            return ControlFlow::Break(());
        }

        let mut heap = Heap::new(entries, &self.less, context);
        if let Err(error) = heap.heapify() {
            let _ = visitor(Err(error));
            return ControlFlow::Break(());
        }
        debug!(
            elements = heap.len(),
            comparisons = heap.comparisons,
            "heap constructed"
        );

        let mut yielded = 0_usize;
        let flow = loop {
            let Some(value) = heap.take_root() else {
                break ControlFlow::Continue(());
            };
            yielded += 1;
            if emit(context, visitor, Ok(value)).is_break() {
                break ControlFlow::Break(());
            }
            if heap.len() > 1
                && let Err(error) = heap.sift_down(0)
            {
                let _ = visitor(Err(error));
                break ControlFlow::Break(());
            }
        };
        debug!(
            yielded,
            remaining = heap.len(),
            comparisons = heap.comparisons,
            "partial heap sort finished"
        );
        flow
    }
}

/// Returns the `count` smallest items of `source` in ascending order.
///
/// # Errors
///
/// The first error emitted while draining `source`, comparing, or polling
/// the context.
///
/// # Examples
///
/// ```rust
/// use ixseq::context::ExecutionContext;
/// use ixseq::ordering::{Reverse, NaturalOrder, top_k};
/// use ixseq::sequence::from_values;
///
/// let context = ExecutionContext::new();
/// let largest = top_k(&context, from_values(vec![4, 8, 1, 9]), Reverse::new(NaturalOrder), 2);
/// assert_eq!(largest, Ok(vec![9, 8]));
/// ```
pub fn top_k<T, S, L>(
    context: &ExecutionContext,
    source: S,
    less: L,
    count: usize,
) -> Result<Vec<T>, Error>
where
    S: LazySequence<Item = Result<T, Error>>,
    L: Less<T>,
{
    use crate::sequence::LazySequenceExt;

    PartialHeapSort::new(source, less)
        .take(count)
        .try_collect(context)
}
