//! Draining collections into positional lists.

use std::ops::ControlFlow;

use tracing::debug;

use super::Collection;
use crate::context::ExecutionContext;
use crate::error::Error;
use crate::sequence::{Element, IndexedValue, Visitor, emit};

/// Initial capacity used by [`materialize`]. A hint only: the buffer grows
/// as needed.
pub const DEFAULT_MATERIALIZE_CAPACITY: usize = 10;

/// A fully drained collection with positional access.
///
/// `Materialized` is itself a [`Collection`] over the same indices, so
/// re-wrapping a drained collection yields the same traversal.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeMap;
/// use ixseq::collection::{Collection, materialize};
/// use ixseq::context::ExecutionContext;
///
/// let context = ExecutionContext::new();
/// let stock = BTreeMap::from([("pears", 3), ("apples", 7)]);
///
/// let drained = materialize(&context, &stock).unwrap();
/// assert_eq!(drained.len(), 2);
/// assert_eq!(drained.get(0).map(|element| element.index), Some("apples"));
/// assert_eq!(drained.length(&context), Ok(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Materialized<I, A> {
    elements: Vec<IndexedValue<I, A>>,
}

impl<I, A> Materialized<I, A> {
    /// Wraps already drained elements.
    pub const fn from_vec(elements: Vec<IndexedValue<I, A>>) -> Self {
        Self { elements }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing was drained.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The element at `position`.
    pub fn get(&self, position: usize) -> Option<&IndexedValue<I, A>> {
        self.elements.get(position)
    }

    /// The drained elements in traversal order.
    pub fn as_slice(&self) -> &[IndexedValue<I, A>] {
        &self.elements
    }

    /// Iterates over the drained elements.
    pub fn iter(&self) -> std::slice::Iter<'_, IndexedValue<I, A>> {
        self.elements.iter()
    }

    /// Unwraps into the list of elements.
    pub fn into_vec(self) -> Vec<IndexedValue<I, A>> {
        self.elements
    }
}

impl<I, A> Collection for Materialized<I, A>
where
    I: Clone + PartialEq,
    A: Clone,
{
    type Index = I;
    type Value = A;

    fn iterate(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Element<I, A>>,
    ) -> ControlFlow<()> {
        for element in &self.elements {
            emit(context, visitor, Ok(element.clone()))?;
        }
        ControlFlow::Continue(())
    }

    fn ix_equals(&self, left: &I, right: &I) -> bool {
        left == right
    }

    fn length(&self, _context: &ExecutionContext) -> Result<usize, Error> {
        Ok(self.elements.len())
    }
}

impl<'a, I, A> IntoIterator for &'a Materialized<I, A> {
    type Item = &'a IndexedValue<I, A>;
    type IntoIter = std::slice::Iter<'a, IndexedValue<I, A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Drains `collection` into a [`Materialized`] list.
///
/// # Errors
///
/// The first element error; the partially drained list is discarded.
pub fn materialize<C>(
    context: &ExecutionContext,
    collection: &C,
) -> Result<Materialized<C::Index, C::Value>, Error>
where
    C: Collection + ?Sized,
{
    materialize_with_capacity(context, collection, DEFAULT_MATERIALIZE_CAPACITY)
}

/// [`materialize`] with an explicit initial capacity.
///
/// # Errors
///
/// The first element error; the partially drained list is discarded.
pub fn materialize_with_capacity<C>(
    context: &ExecutionContext,
    collection: &C,
    capacity_hint: usize,
) -> Result<Materialized<C::Index, C::Value>, Error>
where
    C: Collection + ?Sized,
{
    drain(context, collection, capacity_hint, usize::MAX)
}

/// Drains at most the first `count` elements of `collection`, stopping its
/// producer afterwards.
///
/// # Errors
///
/// The first element error met before `count` elements were collected.
pub fn materialize_first<C>(
    context: &ExecutionContext,
    collection: &C,
    count: usize,
) -> Result<Materialized<C::Index, C::Value>, Error>
where
    C: Collection + ?Sized,
{
    drain(
        context,
        collection,
        count.min(DEFAULT_MATERIALIZE_CAPACITY),
        count,
    )
}

fn drain<C>(
    context: &ExecutionContext,
    collection: &C,
    capacity_hint: usize,
    limit: usize,
) -> Result<Materialized<C::Index, C::Value>, Error>
where
    C: Collection + ?Sized,
{
    let mut elements = Vec::with_capacity(capacity_hint);
    if limit == 0 {
        return Ok(Materialized::from_vec(elements));
    }
    let mut failure = None;
    let _ = collection.iterate(context, &mut |element| match element {
        Ok(found) => {
            elements.push(found);
            if elements.len() >= limit {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }
        Err(error) => {
            failure = Some(error);
            ControlFlow::Break(())
        }
    });
    if let Some(error) = failure {
        debug!(drained = elements.len(), %error, "materialize failed");
        return Err(error);
    }
    Ok(Materialized::from_vec(elements))
}
