//! The result of a diff, as a collection indexed by change.

use std::ops::ControlFlow;

use tracing::debug;

use super::{Diff, DiffOptions, DiffType};
use crate::collection::{Collection, Materialized};
use crate::context::ExecutionContext;
use crate::error::Error;
use crate::sequence::{Element, IndexedValue, Visitor, emit};

/// The changes between two collections, in positional order.
///
/// Each element is indexed by its [`Diff`] record and holds the after-side
/// value, `None` for removals. Two records are the same index when they have
/// the same kind, their indices match under the diff's index predicate on the
/// sides the kind has, their distances are equal to each other and, when
/// position changes are detected, their positions are equal too. Distances
/// are compared with [`f64::total_cmp`]; two modifications at the same
/// non-zero distance are the same index. This lets the results of two diff
/// runs be correlated with [`index_get`](Collection::index_get).
#[derive(Debug, Clone)]
pub struct DiffCollection<I, A> {
    records: Vec<IndexedValue<Diff<I, A>, Option<A>>>,
    options: DiffOptions<I>,
}

impl<I, A> DiffCollection<I, A> {
    pub(super) const fn new(
        records: Vec<IndexedValue<Diff<I, A>, Option<A>>>,
        options: DiffOptions<I>,
    ) -> Self {
        Self { records, options }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the inputs were both empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records with their after-side values.
    pub fn records(&self) -> &[IndexedValue<Diff<I, A>, Option<A>>] {
        &self.records
    }

    /// Iterates over the records with their after-side values.
    pub fn iter(&self) -> std::slice::Iter<'_, IndexedValue<Diff<I, A>, Option<A>>> {
        self.records.iter()
    }

    /// Iterates over the records alone.
    pub fn changes(&self) -> impl Iterator<Item = &Diff<I, A>> {
        self.records.iter().map(|record| &record.index)
    }

    /// Number of records whose kind is in `mask`.
    pub fn count(&self, mask: DiffType) -> usize {
        self.changes()
            .filter(|change| mask.contains(change.kind()))
            .count()
    }

    /// The options the diff ran with.
    pub const fn options(&self) -> &DiffOptions<I> {
        &self.options
    }

    fn sides_match(&self, left: Option<&I>, right: Option<&I>) -> bool {
        match (left, right) {
            (Some(left), Some(right)) => self.options.indices_match(left, right),
            (None, None) => true,
            _ => false,
        }
    }

    /// Applies the after-side values to a new collection.
    ///
    /// Records whose kind is in the options' filter mask keep their value.
    /// Every other record goes through `modify`, which receives the record
    /// and its value and returns the value to keep, or `None` to drop the
    /// element. Removals never produce an element and are not passed to
    /// `modify`.
    ///
    /// The result is indexed by the after-side indices, in positional order.
    ///
    /// # Errors
    ///
    /// The first error returned by `modify`, or a cancellation error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ixseq::context::ExecutionContext;
    /// use ixseq::diff::{DiffOptions, DiffType, diff};
    /// use ixseq::error::Error;
    /// use ixseq::sequence::IndexedValue;
    ///
    /// let context = ExecutionContext::new();
    /// let gap = |left: &IndexedValue<usize, i32>, right: &IndexedValue<usize, i32>| -> Result<f64, Error> {
    ///     Ok(f64::from(right.value - left.value))
    /// };
    /// let options = DiffOptions::any_index(1.0).filter(DiffType::NONE | DiffType::ADD);
    /// let changes = diff(&context, &vec![1, 5], &vec![1, 6, 40], &options, gap).unwrap();
    ///
    /// // Only the modified element reaches the callback.
    /// let rewritten = changes
    ///     .rewrite(&context, |_, value| Ok(value.map(|value| value * 100)))
    ///     .unwrap();
    /// let values: Vec<i32> = rewritten.iter().map(|element| element.value).collect();
    /// assert_eq!(values, vec![1, 600, 40]);
    /// ```
    pub fn rewrite<F>(
        &self,
        context: &ExecutionContext,
        mut modify: F,
    ) -> Result<Materialized<I, A>, Error>
    where
        I: Clone,
        A: Clone,
        F: FnMut(&Diff<I, A>, Option<A>) -> Result<Option<A>, Error>,
    {
        let mask = self.options.filter_mask();
        let mut kept = Vec::with_capacity(self.records.len());
        let mut dropped = 0_usize;
        for record in &self.records {
            context.check()?;
            let change = &record.index;
            let Some(after_index) = change.after_index() else {
                continue;
            };
            let value = if mask.contains(change.kind()) {
                record.value.clone()
            } else {
                modify(change, record.value.clone())?
            };
            match value {
                Some(value) => kept.push(IndexedValue::new(after_index.clone(), value)),
                None => dropped += 1,
            }
        }
        debug!(kept = kept.len(), dropped, "diff rewritten");
        Ok(Materialized::from_vec(kept))
    }
}

impl<I, A> Collection for DiffCollection<I, A>
where
    I: Clone,
    A: Clone,
{
    type Index = Diff<I, A>;
    type Value = Option<A>;

    fn iterate(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Element<Diff<I, A>, Option<A>>>,
    ) -> ControlFlow<()> {
        for record in &self.records {
            emit(context, visitor, Ok(record.clone()))?;
        }
        ControlFlow::Continue(())
    }

    fn ix_equals(&self, left: &Diff<I, A>, right: &Diff<I, A>) -> bool {
        if left.kind() != right.kind() {
            return false;
        }
        if left.has_before() && !self.sides_match(left.before_index(), right.before_index()) {
            return false;
        }
        if left.has_after() && !self.sides_match(left.after_index(), right.after_index()) {
            return false;
        }
        if !left.distance().total_cmp(&right.distance()).is_eq() {
            return false;
        }
        !self.options.is_detecting_position_change()
            || (left.before_position() == right.before_position()
                && left.after_position() == right.after_position())
    }

    fn length(&self, _context: &ExecutionContext) -> Result<usize, Error> {
        Ok(self.records.len())
    }
}

impl<'a, I, A> IntoIterator for &'a DiffCollection<I, A> {
    type Item = &'a IndexedValue<Diff<I, A>, Option<A>>;
    type IntoIter = std::slice::Iter<'a, IndexedValue<Diff<I, A>, Option<A>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
