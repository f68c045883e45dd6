//! The atomic unit flowing through every sequence.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A value together with the index it was found at.
///
/// Every producer creates new instances; transforms re-wrap rather than
/// mutate them.
///
/// # Examples
///
/// ```rust
/// use ixseq::sequence::IndexedValue;
///
/// let element = IndexedValue::new(3, "gamma");
/// let lengths = element.clone().map_value(str::len);
///
/// assert_eq!(lengths, IndexedValue::new(3, 5));
/// assert_eq!(element.into_pair(), (3, "gamma"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedValue<I, A> {
    /// Where the value lives in its collection.
    pub index: I,
    /// The value itself.
    pub value: A,
}

impl<I, A> IndexedValue<I, A> {
    /// Pairs an index with a value.
    #[inline]
    pub const fn new(index: I, value: A) -> Self {
        Self { index, value }
    }

    /// Transforms the value, keeping the index.
    #[inline]
    pub fn map_value<B, F>(self, function: F) -> IndexedValue<I, B>
    where
        F: FnOnce(A) -> B,
    {
        IndexedValue::new(self.index, function(self.value))
    }

    /// Transforms the index, keeping the value.
    #[inline]
    pub fn map_index<J, F>(self, function: F) -> IndexedValue<J, A>
    where
        F: FnOnce(I) -> J,
    {
        IndexedValue::new(function(self.index), self.value)
    }

    /// Replaces the index, keeping the value.
    #[inline]
    pub fn with_index<J>(self, index: J) -> IndexedValue<J, A> {
        IndexedValue::new(index, self.value)
    }

    /// Borrows both halves.
    #[inline]
    pub const fn as_ref(&self) -> IndexedValue<&I, &A> {
        IndexedValue::new(&self.index, &self.value)
    }

    /// Splits into `(index, value)`.
    #[inline]
    pub fn into_pair(self) -> (I, A) {
        (self.index, self.value)
    }
}

impl<I, A> From<(I, A)> for IndexedValue<I, A> {
    fn from((index, value): (I, A)) -> Self {
        Self::new(index, value)
    }
}

/// One item of a collection traversal: either a value at an index or the
/// error that prevented producing it.
pub type Element<I, A> = Result<IndexedValue<I, A>, Error>;
