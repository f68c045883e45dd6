//! The lazy, index-aware collection contract.
//!
//! A [`Collection`] is a logically immutable view over some backing store
//! (an array, a map, a string, or nothing at all for generated data) built
//! from four capabilities:
//!
//! | Capability   | Method                      | Default                          |
//! |--------------|-----------------------------|----------------------------------|
//! | traversal    | [`Collection::iterate`]     | required                         |
//! | lookup       | [`Collection::index_get`]   | filters `iterate` by `ix_equals` |
//! | index match  | [`Collection::ix_equals`]   | required                         |
//! | size         | [`Collection::length`]      | drains `iterate`                 |
//!
//! Transformations never mutate a collection: [`CollectionExt`] builds new
//! lazy views ([`MapValues`], [`Filter`], [`Taking`], [`Ordered`]) and
//! [`materialize`] drains one into a positional [`Materialized`] list.
//!
//! # Examples
//!
//! ```rust
//! use ixseq::collection::{Collection, CollectionExt};
//! use ixseq::context::ExecutionContext;
//! use ixseq::ordering::NaturalOrder;
//! use ixseq::sequence::IndexedValue;
//!
//! let context = ExecutionContext::new();
//! let scores = vec![40, 10, 30, 20];
//!
//! let top_two = (&scores).ordered_by(NaturalOrder).taking(2);
//! assert_eq!(
//!     top_two.to_vec(&context),
//!     Ok(vec![IndexedValue::new(1, 10), IndexedValue::new(3, 20)])
//! );
//! assert_eq!(scores.length(&context), Ok(4));
//! ```

mod combinator;
mod materialize;

pub use combinator::{Filter, MapValues, OnValue, Ordered, Taking};
pub use materialize::{
    DEFAULT_MATERIALIZE_CAPACITY, Materialized, materialize, materialize_first,
    materialize_with_capacity,
};

use std::marker::PhantomData;
use std::ops::ControlFlow;
use std::rc::Rc;

use crate::context::ExecutionContext;
use crate::error::Error;
use crate::ordering::Less;
use crate::sequence::{Element, IndexedValue, LazySequence, Visitor};

/// A lazy, restartable, index-aware view over a backing store.
///
/// # Contract
///
/// - [`iterate`](Self::iterate) starts from scratch on every call and yields
///   equivalent sequences each time. It polls the context before every
///   yield and emits the cancellation error as its final item instead of
///   silently truncating.
/// - Element-level failures are yielded as `Err` items; the producer decides
///   whether to continue past them.
/// - [`index_get`](Self::index_get) yields exactly the elements of `iterate`
///   whose index satisfies `ix_equals(index, ·)`.
/// - [`length`](Self::length) returns the first element error rather than a
///   count when traversal fails.
/// - Associative backing stores iterate in a deterministic order derived
///   from the key, never in hash order.
pub trait Collection {
    /// The index type.
    type Index;
    /// The element type.
    type Value;

    /// Feeds every element to `visitor` until it returns `Break`.
    fn iterate(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Element<Self::Index, Self::Value>>,
    ) -> ControlFlow<()>;

    /// Feeds the elements at `index` to `visitor`.
    ///
    /// The default scans [`iterate`](Self::iterate); stores with a faster
    /// lookup override it.
    fn index_get(
        &self,
        context: &ExecutionContext,
        index: &Self::Index,
        visitor: &mut Visitor<'_, Element<Self::Index, Self::Value>>,
    ) -> ControlFlow<()> {
        self.iterate(context, &mut |element| match element {
            Ok(found) if !self.ix_equals(index, &found.index) => ControlFlow::Continue(()),
            other => visitor(other),
        })
    }

    /// Index equivalence. Need not be structural equality.
    fn ix_equals(&self, left: &Self::Index, right: &Self::Index) -> bool;

    /// Number of elements.
    ///
    /// # Errors
    ///
    /// The first error yielded by [`iterate`](Self::iterate) when the default
    /// implementation has to count by draining.
    fn length(&self, context: &ExecutionContext) -> Result<usize, Error> {
        let mut count = 0;
        let mut failure = None;
        let _ = self.iterate(context, &mut |element| match element {
            Ok(_) => {
                count += 1;
                ControlFlow::Continue(())
            }
            Err(error) => {
                failure = Some(error);
                ControlFlow::Break(())
            }
        });
        failure.map_or(Ok(count), Err)
    }
}

macro_rules! forward_collection {
    ($($pointer:ty),* $(,)?) => {
        $(
            impl<C: Collection + ?Sized> Collection for $pointer {
                type Index = C::Index;
                type Value = C::Value;

                fn iterate(
                    &self,
                    context: &ExecutionContext,
                    visitor: &mut Visitor<'_, Element<Self::Index, Self::Value>>,
                ) -> ControlFlow<()> {
                    (**self).iterate(context, visitor)
                }

                fn index_get(
                    &self,
                    context: &ExecutionContext,
                    index: &Self::Index,
                    visitor: &mut Visitor<'_, Element<Self::Index, Self::Value>>,
                ) -> ControlFlow<()> {
                    (**self).index_get(context, index, visitor)
                }

                fn ix_equals(&self, left: &Self::Index, right: &Self::Index) -> bool {
                    (**self).ix_equals(left, right)
                }

                fn length(&self, context: &ExecutionContext) -> Result<usize, Error> {
                    (**self).length(context)
                }
            }
        )*
    };
}

forward_collection!(&C, Box<C>, Rc<C>);

/// A collection viewed as a [`LazySequence`] of its elements.
///
/// Created by [`CollectionExt::elements`].
#[derive(Debug, Clone, Copy)]
pub struct Elements<C> {
    collection: C,
}

impl<C: Collection> LazySequence for Elements<C> {
    type Item = Element<C::Index, C::Value>;

    fn visit(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Self::Item>,
    ) -> ControlFlow<()> {
        self.collection.iterate(context, visitor)
    }
}

/// A collection whose elements are computed by a closure on every
/// traversal. Indices are compared with `PartialEq`.
///
/// Created by [`generate`].
pub struct Generated<I, A, F> {
    producer: F,
    _marker: PhantomData<fn() -> (I, A)>,
}

impl<I, A, F> Collection for Generated<I, A, F>
where
    I: PartialEq,
    F: Fn(&ExecutionContext, &mut Visitor<'_, Element<I, A>>) -> ControlFlow<()>,
{
    type Index = I;
    type Value = A;

    fn iterate(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Element<I, A>>,
    ) -> ControlFlow<()> {
        (self.producer)(context, visitor)
    }

    fn ix_equals(&self, left: &I, right: &I) -> bool {
        left == right
    }
}

/// Builds a purely generative collection.
///
/// The producer is responsible for polling the context, typically through
/// [`emit`](crate::sequence::emit).
///
/// # Examples
///
/// ```rust
/// use std::ops::ControlFlow;
/// use ixseq::collection::{Collection, CollectionExt, generate};
/// use ixseq::context::ExecutionContext;
/// use ixseq::sequence::{IndexedValue, emit};
///
/// let squares = generate(|context, visitor| {
///     for index in 0_u32..5 {
///         emit(context, visitor, Ok(IndexedValue::new(index, index * index)))?;
///     }
///     ControlFlow::Continue(())
/// });
///
/// let context = ExecutionContext::new();
/// assert_eq!(squares.length(&context), Ok(5));
/// assert_eq!(squares.first(&context), Ok(Some(IndexedValue::new(0, 0))));
/// ```
pub const fn generate<I, A, F>(producer: F) -> Generated<I, A, F>
where
    I: PartialEq,
    F: Fn(&ExecutionContext, &mut Visitor<'_, Element<I, A>>) -> ControlFlow<()>,
{
    Generated {
        producer,
        _marker: PhantomData,
    }
}

/// Combinators available on every [`Collection`].
pub trait CollectionExt: Collection + Sized {
    /// Views the collection as a [`LazySequence`].
    fn elements(&self) -> Elements<&Self> {
        Elements { collection: self }
    }

    /// Transforms every value, keeping indices.
    fn map_values<B, F>(self, function: F) -> MapValues<Self, F>
    where
        F: Fn(Self::Value) -> B,
    {
        MapValues::new(self, function)
    }

    /// Keeps the elements matching `predicate`.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: Fn(&IndexedValue<Self::Index, Self::Value>) -> bool,
    {
        Filter::new(self, predicate)
    }

    /// Keeps at most the first `count` elements.
    fn taking(self, count: usize) -> Taking<Self> {
        Taking::new(self, count)
    }

    /// Orders elements by value using `less`, lazily.
    fn ordered_by<L>(self, less: L) -> Ordered<Self, OnValue<L>>
    where
        L: Less<Self::Value>,
    {
        Ordered::new(self, OnValue::new(less))
    }

    /// Orders whole elements (index and value) using `less`, lazily.
    fn ordered_by_element<L>(self, less: L) -> Ordered<Self, L>
    where
        L: Less<IndexedValue<Self::Index, Self::Value>>,
    {
        Ordered::new(self, less)
    }

    /// The first element, if any.
    ///
    /// # Errors
    ///
    /// The error yielded in place of the first element.
    fn first(
        &self,
        context: &ExecutionContext,
    ) -> Result<Option<IndexedValue<Self::Index, Self::Value>>, Error> {
        let mut first = None;
        let _ = self.iterate(context, &mut |element| {
            first = Some(element);
            ControlFlow::Break(())
        });
        first.transpose()
    }

    /// Drains the collection into a list of elements.
    ///
    /// # Errors
    ///
    /// The first element error.
    fn to_vec(
        &self,
        context: &ExecutionContext,
    ) -> Result<Vec<IndexedValue<Self::Index, Self::Value>>, Error> {
        materialize(context, self).map(Materialized::into_vec)
    }
}

impl<C: Collection> CollectionExt for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CancellationToken;
    use crate::sequence::{LazySequenceExt, emit};
    use rstest::rstest;

    fn letters() -> impl Collection<Index = u8, Value = char> {
        generate(|context, visitor| {
            for (index, letter) in ['a', 'b', 'c', 'b'].into_iter().enumerate() {
                let index = u8::try_from(index).unwrap_or(u8::MAX);
                emit(context, visitor, Ok(IndexedValue::new(index, letter)))?;
            }
            ControlFlow::Continue(())
        })
    }

    fn nothing() -> impl Collection<Index = u8, Value = u8> {
        generate(|_, _| ControlFlow::Continue(()))
    }

    fn broken_after_two() -> impl Collection<Index = usize, Value = i32> {
        generate(|context, visitor| {
            emit(context, visitor, Ok(IndexedValue::new(0, 10)))?;
            emit(context, visitor, Ok(IndexedValue::new(1, 11)))?;
            emit(context, visitor, Err(Error::element("disk")))?;
            emit(context, visitor, Ok(IndexedValue::new(3, 13)))
        })
    }

    #[rstest]
    fn test_default_index_get_filters_by_ix_equals() {
        let context = ExecutionContext::new();
        let collection = letters();
        let mut found = Vec::new();
        let _ = collection.index_get(&context, &1, &mut |element| {
            found.push(element);
            ControlFlow::Continue(())
        });
        assert_eq!(found, vec![Ok(IndexedValue::new(1, 'b'))]);
    }

    #[rstest]
    fn test_default_length_counts_elements() {
        assert_eq!(letters().length(&ExecutionContext::new()), Ok(4));
    }

    #[rstest]
    fn test_default_length_reports_first_error() {
        assert_eq!(
            broken_after_two().length(&ExecutionContext::new()),
            Err(Error::element("disk"))
        );
    }

    #[rstest]
    fn test_elements_sequence_sees_errors() {
        let collection = broken_after_two();
        let items = collection.elements().collect_vec(&ExecutionContext::new());
        assert_eq!(items.len(), 4);
        assert_eq!(items[2], Err(Error::element("disk")));
    }

    #[rstest]
    fn test_first_stops_after_one_element() {
        let context = ExecutionContext::new();
        assert_eq!(letters().first(&context), Ok(Some(IndexedValue::new(0, 'a'))));
        assert_eq!(nothing().first(&context), Ok(None));
    }

    #[rstest]
    fn test_cancelled_context_surfaces_error_from_length() {
        let token = CancellationToken::new();
        token.cancel();
        let context = ExecutionContext::new().with_cancellation(token);
        assert!(letters().length(&context).unwrap_err().is_cancellation());
    }

    #[rstest]
    fn test_forwarding_through_pointers() {
        let context = ExecutionContext::new();
        let boxed: Box<dyn Collection<Index = u8, Value = char>> = Box::new(letters());
        assert_eq!(boxed.length(&context), Ok(4));
        let shared = Rc::new(letters());
        assert!(shared.ix_equals(&2, &2));
        assert_eq!((&shared).length(&context), Ok(4));
    }
}
