//! A single change between two collections.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::DiffType;
use crate::sequence::IndexedValue;

/// One change between a before and an after collection.
///
/// The side fields follow the kind: a [`REMOVE`](DiffType::REMOVE) record
/// only has before-side fields, an [`ADD`](DiffType::ADD) record only
/// after-side ones, and [`MODIFY`](DiffType::MODIFY) and
/// [`NONE`](DiffType::NONE) records have both. The constructors are the only
/// way to build a record, so the accessors can be trusted.
///
/// Positions are offsets in the materialized inputs; indices are whatever
/// the source collections use. `distance` is the absolute distance of the
/// matched pair and `0.0` for unmatched records.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diff<I, A> {
    before_index: Option<I>,
    after_index: Option<I>,
    before_position: Option<usize>,
    after_position: Option<usize>,
    before_value: Option<A>,
    kind: DiffType,
    distance: f64,
}

impl<I, A> Diff<I, A> {
    /// An element present only after the change.
    pub const fn added(after_index: I, after_position: usize) -> Self {
        Self {
            before_index: None,
            after_index: Some(after_index),
            before_position: None,
            after_position: Some(after_position),
            before_value: None,
            kind: DiffType::ADD,
            distance: 0.0,
        }
    }

    /// An element present only before the change.
    pub fn removed(before: IndexedValue<I, A>, before_position: usize) -> Self {
        Self {
            before_index: Some(before.index),
            after_index: None,
            before_position: Some(before_position),
            after_position: None,
            before_value: Some(before.value),
            kind: DiffType::REMOVE,
            distance: 0.0,
        }
    }

    /// A matched pair whose value or position differs.
    pub fn modified(
        before: IndexedValue<I, A>,
        before_position: usize,
        after_index: I,
        after_position: usize,
        distance: f64,
    ) -> Self {
        Self::matched(
            DiffType::MODIFY,
            before,
            before_position,
            after_index,
            after_position,
            distance,
        )
    }

    /// A matched pair that did not change.
    pub fn unchanged(
        before: IndexedValue<I, A>,
        before_position: usize,
        after_index: I,
        after_position: usize,
    ) -> Self {
        Self::matched(
            DiffType::NONE,
            before,
            before_position,
            after_index,
            after_position,
            0.0,
        )
    }

    fn matched(
        kind: DiffType,
        before: IndexedValue<I, A>,
        before_position: usize,
        after_index: I,
        after_position: usize,
        distance: f64,
    ) -> Self {
        Self {
            before_index: Some(before.index),
            after_index: Some(after_index),
            before_position: Some(before_position),
            after_position: Some(after_position),
            before_value: Some(before.value),
            kind,
            distance,
        }
    }

    /// The change category. Always a single flag.
    #[inline]
    pub const fn kind(&self) -> DiffType {
        self.kind
    }

    /// Index in the before collection, absent for additions.
    #[inline]
    pub const fn before_index(&self) -> Option<&I> {
        self.before_index.as_ref()
    }

    /// Index in the after collection, absent for removals.
    #[inline]
    pub const fn after_index(&self) -> Option<&I> {
        self.after_index.as_ref()
    }

    /// Position in the materialized before collection.
    #[inline]
    pub const fn before_position(&self) -> Option<usize> {
        self.before_position
    }

    /// Position in the materialized after collection.
    #[inline]
    pub const fn after_position(&self) -> Option<usize> {
        self.after_position
    }

    /// The value before the change, absent for additions.
    #[inline]
    pub const fn before_value(&self) -> Option<&A> {
        self.before_value.as_ref()
    }

    /// Distance between the matched values.
    #[inline]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// Whether the record has a before side.
    #[inline]
    pub const fn has_before(&self) -> bool {
        self.kind.intersects(DiffType::REMOVE.union(DiffType::MODIFY).union(DiffType::NONE))
    }

    /// Whether the record has an after side.
    #[inline]
    pub const fn has_after(&self) -> bool {
        self.kind.intersects(DiffType::ADD.union(DiffType::MODIFY).union(DiffType::NONE))
    }
}
