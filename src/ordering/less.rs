//! Fallible, context-sensitive comparators.

use std::marker::PhantomData;

use crate::context::ExecutionContext;
use crate::error::Error;

/// A strict "less than" relation that may fail.
///
/// The relation does not need to be total: when neither `less(a, b)` nor
/// `less(b, a)` holds, sorting falls back to arrival order.
///
/// Closures of type `Fn(&T, &T) -> Result<bool, Error>` implement `Less`
/// directly; use [`ContextLess`] when the comparison needs the context.
///
/// # Examples
///
/// ```rust
/// use ixseq::context::ExecutionContext;
/// use ixseq::error::Error;
/// use ixseq::ordering::{ByKey, Less, NaturalOrder, Reverse};
///
/// let context = ExecutionContext::new();
///
/// assert_eq!(NaturalOrder.less(&context, &1, &2), Ok(true));
/// assert_eq!(Reverse::new(NaturalOrder).less(&context, &1, &2), Ok(false));
///
/// let by_length = ByKey::new(|word: &&str| word.len());
/// assert_eq!(by_length.less(&context, &"bb", &"a"), Ok(false));
///
/// let closure = |left: &i32, right: &i32| -> Result<bool, Error> { Ok(left.abs() < right.abs()) };
/// assert_eq!(closure.less(&context, &-1, &2), Ok(true));
/// ```
pub trait Less<T: ?Sized> {
    /// Returns whether `left` sorts strictly before `right`.
    ///
    /// # Errors
    ///
    /// Any error aborts the sort that asked for the comparison.
    fn less(&self, context: &ExecutionContext, left: &T, right: &T) -> Result<bool, Error>;
}

impl<T: ?Sized, F> Less<T> for F
where
    F: Fn(&T, &T) -> Result<bool, Error>,
{
    #[inline]
    fn less(&self, _context: &ExecutionContext, left: &T, right: &T) -> Result<bool, Error> {
        self(left, right)
    }
}

/// The `Ord` ordering of `T`. Never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Less<T> for NaturalOrder {
    #[inline]
    fn less(&self, _context: &ExecutionContext, left: &T, right: &T) -> Result<bool, Error> {
        Ok(left < right)
    }
}

/// Orders by a projected key.
#[derive(Clone, Copy)]
pub struct ByKey<F> {
    key: F,
}

impl<F> ByKey<F> {
    /// Orders values by `key(value)`.
    pub const fn new(key: F) -> Self {
        Self { key }
    }
}

impl<T, K, F> Less<T> for ByKey<F>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    #[inline]
    fn less(&self, _context: &ExecutionContext, left: &T, right: &T) -> Result<bool, Error> {
        Ok((self.key)(left) < (self.key)(right))
    }
}

/// Flips another comparator.
#[derive(Debug, Clone, Copy)]
pub struct Reverse<L> {
    inner: L,
}

impl<L> Reverse<L> {
    /// Reverses `inner`.
    pub const fn new(inner: L) -> Self {
        Self { inner }
    }
}

impl<T: ?Sized, L: Less<T>> Less<T> for Reverse<L> {
    #[inline]
    fn less(&self, context: &ExecutionContext, left: &T, right: &T) -> Result<bool, Error> {
        self.inner.less(context, right, left)
    }
}

/// A comparator closure that also receives the execution context.
pub struct ContextLess<T: ?Sized, F> {
    function: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized, F> ContextLess<T, F>
where
    F: Fn(&ExecutionContext, &T, &T) -> Result<bool, Error>,
{
    /// Wraps `function`.
    pub const fn new(function: F) -> Self {
        Self {
            function,
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized, F> Less<T> for ContextLess<T, F>
where
    F: Fn(&ExecutionContext, &T, &T) -> Result<bool, Error>,
{
    #[inline]
    fn less(&self, context: &ExecutionContext, left: &T, right: &T) -> Result<bool, Error> {
        (self.function)(context, left, right)
    }
}
