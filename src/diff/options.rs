//! Diff configuration and the distance seam.

use std::fmt;
use std::rc::Rc;

use super::DiffType;
use crate::context::ExecutionContext;
use crate::error::Error;
use crate::sequence::IndexedValue;

/// Initial capacity of the buffers the diff inputs are drained into.
pub const DEFAULT_DIFF_CAPACITY: usize = 10;

/// How far apart a before and an after element are.
///
/// The engine only looks at the absolute value. `0.0` means identical.
/// Closures of type `Fn(&IndexedValue<I, A>, &IndexedValue<I, A>) ->
/// Result<f64, Error>` implement `Distance` directly.
pub trait Distance<I, A> {
    /// Distance between `before` and `after`.
    ///
    /// # Errors
    ///
    /// Any error aborts the diff.
    fn distance(
        &self,
        context: &ExecutionContext,
        before: &IndexedValue<I, A>,
        after: &IndexedValue<I, A>,
    ) -> Result<f64, Error>;
}

impl<I, A, F> Distance<I, A> for F
where
    F: Fn(&IndexedValue<I, A>, &IndexedValue<I, A>) -> Result<f64, Error>,
{
    #[inline]
    fn distance(
        &self,
        _context: &ExecutionContext,
        before: &IndexedValue<I, A>,
        after: &IndexedValue<I, A>,
    ) -> Result<f64, Error> {
        self(before, after)
    }
}

type IndexMatch<I> = Rc<dyn Fn(&I, &I) -> bool>;

/// Parameters of a diff.
///
/// # Examples
///
/// ```rust
/// use ixseq::diff::{DiffOptions, DiffType};
///
/// let options = DiffOptions::<usize>::any_index(2.0)
///     .detect_position_change(true)
///     .filter(DiffType::NONE);
///
/// assert!((options.threshold() - 2.0).abs() < f64::EPSILON);
/// assert!(options.is_detecting_position_change());
/// assert!(options.indices_match(&1, &7));
/// ```
pub struct DiffOptions<I> {
    threshold: f64,
    ix_match: Option<IndexMatch<I>>,
    detect_position_change: bool,
    filter: DiffType,
    capacity_hint: usize,
}

impl<I> DiffOptions<I> {
    /// Matches pairs up to `threshold` whose indices satisfy `ix_match`.
    ///
    /// Position changes are not reported, the filter passes every category
    /// through and the capacity hint is [`DEFAULT_DIFF_CAPACITY`].
    pub fn new<M>(threshold: f64, ix_match: M) -> Self
    where
        M: Fn(&I, &I) -> bool + 'static,
    {
        Self {
            ix_match: Some(Rc::new(ix_match)),
            ..Self::any_index(threshold)
        }
    }

    /// Matches any before index with any after index.
    pub const fn any_index(threshold: f64) -> Self {
        Self {
            threshold,
            ix_match: None,
            detect_position_change: false,
            filter: DiffType::ALL,
            capacity_hint: DEFAULT_DIFF_CAPACITY,
        }
    }

    /// Reports identical values at different positions as
    /// [`MODIFY`](DiffType::MODIFY).
    #[must_use]
    pub const fn detect_position_change(mut self, enabled: bool) -> Self {
        self.detect_position_change = enabled;
        self
    }

    /// Categories passed through [`rewrite`](super::DiffCollection::rewrite)
    /// untouched.
    #[must_use]
    pub const fn filter(mut self, filter: DiffType) -> Self {
        self.filter = filter;
        self
    }

    /// Initial capacity of the materialized inputs. Not a limit.
    #[must_use]
    pub const fn capacity_hint(mut self, capacity_hint: usize) -> Self {
        self.capacity_hint = capacity_hint;
        self
    }

    /// Largest distance still considered a match.
    #[inline]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether identical values that moved count as modified.
    #[inline]
    pub const fn is_detecting_position_change(&self) -> bool {
        self.detect_position_change
    }

    /// The pass-through mask.
    #[inline]
    pub const fn filter_mask(&self) -> DiffType {
        self.filter
    }

    /// The capacity hint.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity_hint
    }

    /// Whether a before index may be paired with an after index.
    #[inline]
    pub fn indices_match(&self, before: &I, after: &I) -> bool {
        self.ix_match
            .as_ref()
            .is_none_or(|ix_match| ix_match(before, after))
    }
}

impl<I> Clone for DiffOptions<I> {
    fn clone(&self) -> Self {
        Self {
            threshold: self.threshold,
            ix_match: self.ix_match.clone(),
            detect_position_change: self.detect_position_change,
            filter: self.filter,
            capacity_hint: self.capacity_hint,
        }
    }
}

impl<I> fmt::Debug for DiffOptions<I> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("DiffOptions")
            .field("threshold", &self.threshold)
            .field("detect_position_change", &self.detect_position_change)
            .field("filter", &self.filter)
            .field("capacity_hint", &self.capacity_hint)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_defaults() {
        let options = DiffOptions::<u8>::new(1.5, |before, after| before == after);
        assert!((options.threshold() - 1.5).abs() < f64::EPSILON);
        assert!(!options.is_detecting_position_change());
        assert_eq!(options.filter_mask(), DiffType::ALL);
        assert_eq!(options.capacity(), DEFAULT_DIFF_CAPACITY);
        assert!(options.indices_match(&3, &3));
        assert!(!options.indices_match(&3, &4));
    }

    #[rstest]
    fn test_closure_distance() {
        let context = ExecutionContext::new();
        let by_value = |before: &IndexedValue<usize, i32>,
                        after: &IndexedValue<usize, i32>|
         -> Result<f64, Error> { Ok(f64::from(after.value - before.value)) };
        let distance = by_value.distance(
            &context,
            &IndexedValue::new(0, 10),
            &IndexedValue::new(0, 7),
        );
        assert_eq!(distance, Ok(-3.0));
    }

    #[rstest]
    fn test_debug_omits_predicate() {
        let rendered = format!("{:?}", DiffOptions::<u8>::any_index(0.0));
        assert!(rendered.starts_with("DiffOptions { threshold: 0.0"));
    }
}
