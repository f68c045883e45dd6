//! Lazy views returning new collections.

use std::ops::ControlFlow;

use super::{Collection, Elements};
use crate::context::ExecutionContext;
use crate::error::Error;
use crate::ordering::{Less, PartialHeapSort};
use crate::sequence::{Element, IndexedValue, LazySequence, LazySequenceExt, Visitor};

/// Transforms values, keeping indices and lookup paths.
#[derive(Debug, Clone)]
pub struct MapValues<C, F> {
    source: C,
    function: F,
}

impl<C, F> MapValues<C, F> {
    pub(super) const fn new(source: C, function: F) -> Self {
        Self { source, function }
    }
}

impl<C, F, B> Collection for MapValues<C, F>
where
    C: Collection,
    F: Fn(C::Value) -> B,
{
    type Index = C::Index;
    type Value = B;

    fn iterate(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Element<C::Index, B>>,
    ) -> ControlFlow<()> {
        self.source.iterate(context, &mut |element| {
            visitor(element.map(|found| found.map_value(&self.function)))
        })
    }

    fn index_get(
        &self,
        context: &ExecutionContext,
        index: &C::Index,
        visitor: &mut Visitor<'_, Element<C::Index, B>>,
    ) -> ControlFlow<()> {
        self.source.index_get(context, index, &mut |element| {
            visitor(element.map(|found| found.map_value(&self.function)))
        })
    }

    fn ix_equals(&self, left: &C::Index, right: &C::Index) -> bool {
        self.source.ix_equals(left, right)
    }

    fn length(&self, context: &ExecutionContext) -> Result<usize, Error> {
        self.source.length(context)
    }
}

/// Keeps the elements matching a predicate. Errors always pass through.
#[derive(Debug, Clone)]
pub struct Filter<C, P> {
    source: C,
    predicate: P,
}

impl<C, P> Filter<C, P> {
    pub(super) const fn new(source: C, predicate: P) -> Self {
        Self { source, predicate }
    }
}

impl<C, P> Collection for Filter<C, P>
where
    C: Collection,
    P: Fn(&IndexedValue<C::Index, C::Value>) -> bool,
{
    type Index = C::Index;
    type Value = C::Value;

    fn iterate(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Element<C::Index, C::Value>>,
    ) -> ControlFlow<()> {
        self.source.iterate(context, &mut |element| match element {
            Ok(found) if !(self.predicate)(&found) => ControlFlow::Continue(()),
            other => visitor(other),
        })
    }

    fn index_get(
        &self,
        context: &ExecutionContext,
        index: &C::Index,
        visitor: &mut Visitor<'_, Element<C::Index, C::Value>>,
    ) -> ControlFlow<()> {
        self.source.index_get(context, index, &mut |element| match element {
            Ok(found) if !(self.predicate)(&found) => ControlFlow::Continue(()),
            other => visitor(other),
        })
    }

    fn ix_equals(&self, left: &C::Index, right: &C::Index) -> bool {
        self.source.ix_equals(left, right)
    }
}

/// The first `count` elements of a collection.
#[derive(Debug, Clone)]
pub struct Taking<C> {
    source: C,
    count: usize,
}

impl<C> Taking<C> {
    pub(super) const fn new(source: C, count: usize) -> Self {
        Self { source, count }
    }
}

impl<C: Collection> Collection for Taking<C> {
    type Index = C::Index;
    type Value = C::Value;

    fn iterate(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Element<C::Index, C::Value>>,
    ) -> ControlFlow<()> {
        Elements {
            collection: &self.source,
        }
        .take(self.count)
        .visit(context, visitor)
    }

    fn ix_equals(&self, left: &C::Index, right: &C::Index) -> bool {
        self.source.ix_equals(left, right)
    }
}

/// Adapts a comparator on values into one on whole elements.
#[derive(Debug, Clone, Copy)]
pub struct OnValue<L> {
    inner: L,
}

impl<L> OnValue<L> {
    /// Compares elements by their values with `inner`.
    pub const fn new(inner: L) -> Self {
        Self { inner }
    }
}

impl<I, A, L: Less<A>> Less<IndexedValue<I, A>> for OnValue<L> {
    #[inline]
    fn less(
        &self,
        context: &ExecutionContext,
        left: &IndexedValue<I, A>,
        right: &IndexedValue<I, A>,
    ) -> Result<bool, Error> {
        self.inner.less(context, &left.value, &right.value)
    }
}

/// A collection iterated in ascending comparator order.
///
/// Each traversal runs a fresh [`PartialHeapSort`] over the source, so a
/// consumer that stops after `k` elements only pays for `k` pops. Elements
/// the comparator considers equal keep their source order.
#[derive(Debug, Clone)]
pub struct Ordered<C, L> {
    source: C,
    less: L,
}

impl<C, L> Ordered<C, L> {
    pub(super) const fn new(source: C, less: L) -> Self {
        Self { source, less }
    }
}

impl<C, L> Collection for Ordered<C, L>
where
    C: Collection,
    L: Less<IndexedValue<C::Index, C::Value>>,
{
    type Index = C::Index;
    type Value = C::Value;

    fn iterate(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Element<C::Index, C::Value>>,
    ) -> ControlFlow<()> {
        let elements = Elements {
            collection: &self.source,
        };
        PartialHeapSort::new(elements, Borrowed(&self.less)).visit(context, visitor)
    }

    fn ix_equals(&self, left: &C::Index, right: &C::Index) -> bool {
        self.source.ix_equals(left, right)
    }

    fn length(&self, context: &ExecutionContext) -> Result<usize, Error> {
        self.source.length(context)
    }
}

struct Borrowed<'l, L>(&'l L);

impl<T: ?Sized, L: Less<T>> Less<T> for Borrowed<'_, L> {
    #[inline]
    fn less(&self, context: &ExecutionContext, left: &T, right: &T) -> Result<bool, Error> {
        self.0.less(context, left, right)
    }
}
