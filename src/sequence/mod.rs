//! Push-style lazy sequences.
//!
//! A [`LazySequence`] hands its items one at a time to a visitor closure.
//! The visitor answers with [`ControlFlow::Continue`] to ask for the next
//! item or [`ControlFlow::Break`] to stop; a producer computes nothing past
//! the point where its consumer stopped. This is what makes "first N" and
//! top-K cheap without threads or generators.
//!
//! Visiting is restartable: every call to [`LazySequence::visit`] runs the
//! producer from scratch.
//!
//! # Examples
//!
//! ```rust
//! use std::ops::ControlFlow;
//! use ixseq::context::ExecutionContext;
//! use ixseq::sequence::{LazySequence, LazySequenceExt, from_fn};
//!
//! let naturals = from_fn(|_context, visitor| {
//!     let mut next: u64 = 0;
//!     loop {
//!         visitor(next)?;
//!         next += 1;
//!     }
//! });
//!
//! let context = ExecutionContext::new();
//! assert_eq!(naturals.take(4).collect_vec(&context), vec![0, 1, 2, 3]);
//! ```

mod indexed;

pub use indexed::{Element, IndexedValue};

use std::marker::PhantomData;
use std::ops::ControlFlow;

use crate::context::ExecutionContext;
use crate::error::Error;

/// The consumer half of a sequence.
///
/// Returning `ControlFlow::Break(())` tells the producer to stop.
pub type Visitor<'v, T> = dyn FnMut(T) -> ControlFlow<()> + 'v;

/// A restartable push-style producer.
///
/// `visit` returns `ControlFlow::Break(())` when production ended early,
/// either because the visitor asked to stop or because a terminal error was
/// emitted, and `ControlFlow::Continue(())` when the sequence was exhausted.
pub trait LazySequence {
    /// The type of the produced items.
    type Item;

    /// Runs the producer, feeding every item to `visitor` until it stops.
    fn visit(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Self::Item>,
    ) -> ControlFlow<()>;
}

impl<S: LazySequence + ?Sized> LazySequence for &S {
    type Item = S::Item;

    fn visit(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Self::Item>,
    ) -> ControlFlow<()> {
        (**self).visit(context, visitor)
    }
}

/// Hands `item` to `visitor` unless `context` was cancelled, in which case
/// the cancellation error is emitted in its place as the terminal item.
///
/// Producers call this at every yield point.
#[inline]
pub fn emit<T>(
    context: &ExecutionContext,
    visitor: &mut Visitor<'_, Result<T, Error>>,
    item: Result<T, Error>,
) -> ControlFlow<()> {
    if let Err(error) = context.check() {
        let _ = visitor(Err(error));
        return ControlFlow::Break(());
    }
    visitor(item)
}

/// A sequence backed by a closure.
///
/// Created by [`from_fn`].
pub struct FromFn<T, F> {
    producer: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> LazySequence for FromFn<T, F>
where
    F: Fn(&ExecutionContext, &mut Visitor<'_, T>) -> ControlFlow<()>,
{
    type Item = T;

    fn visit(&self, context: &ExecutionContext, visitor: &mut Visitor<'_, T>) -> ControlFlow<()> {
        (self.producer)(context, visitor)
    }
}

/// Wraps a producer closure as a [`LazySequence`].
pub const fn from_fn<T, F>(producer: F) -> FromFn<T, F>
where
    F: Fn(&ExecutionContext, &mut Visitor<'_, T>) -> ControlFlow<()>,
{
    FromFn {
        producer,
        _marker: PhantomData,
    }
}

/// A sequence yielding clones of a buffered list as `Ok` items, polling
/// cancellation before each one.
///
/// Created by [`from_values`].
#[derive(Debug, Clone)]
pub struct Values<T> {
    values: Vec<T>,
}

impl<T: Clone> LazySequence for Values<T> {
    type Item = Result<T, Error>;

    fn visit(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Self::Item>,
    ) -> ControlFlow<()> {
        for value in &self.values {
            emit(context, visitor, Ok(value.clone()))?;
        }
        ControlFlow::Continue(())
    }
}

/// Turns a list into a fallible sequence.
pub const fn from_values<T>(values: Vec<T>) -> Values<T> {
    Values { values }
}

/// Stops the source after a fixed number of items.
///
/// Created by [`LazySequenceExt::take`].
#[derive(Debug, Clone)]
pub struct Take<S> {
    source: S,
    count: usize,
}

impl<S: LazySequence> LazySequence for Take<S> {
    type Item = S::Item;

    fn visit(
        &self,
        context: &ExecutionContext,
        visitor: &mut Visitor<'_, Self::Item>,
    ) -> ControlFlow<()> {
        if self.count == 0 {
            return ControlFlow::Continue(());
        }
        let mut remaining = self.count;
        let mut consumer_stopped = false;
        let _ = self.source.visit(context, &mut |item| {
            remaining -= 1;
            if visitor(item).is_break() {
                consumer_stopped = true;
                return ControlFlow::Break(());
            }
            if remaining == 0 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        if consumer_stopped {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// Convenience methods available on every [`LazySequence`].
pub trait LazySequenceExt: LazySequence + Sized {
    /// Yields at most `count` items, then stops the source.
    fn take(self, count: usize) -> Take<Self> {
        Take {
            source: self,
            count,
        }
    }

    /// Drains the sequence into a `Vec`, errors included.
    fn collect_vec(&self, context: &ExecutionContext) -> Vec<Self::Item> {
        let mut items = Vec::new();
        let _ = self.visit(context, &mut |item| {
            items.push(item);
            ControlFlow::Continue(())
        });
        items
    }

    /// Drains a fallible sequence, stopping at the first error.
    ///
    /// # Errors
    ///
    /// The first error item produced by the sequence.
    fn try_collect<T>(&self, context: &ExecutionContext) -> Result<Vec<T>, Error>
    where
        Self: LazySequence<Item = Result<T, Error>>,
    {
        let mut items = Vec::new();
        let mut failure = None;
        let _ = self.visit(context, &mut |item| match item {
            Ok(value) => {
                items.push(value);
                ControlFlow::Continue(())
            }
            Err(error) => {
                failure = Some(error);
                ControlFlow::Break(())
            }
        });
        failure.map_or(Ok(items), Err)
    }
}

impl<S: LazySequence> LazySequenceExt for S {}
