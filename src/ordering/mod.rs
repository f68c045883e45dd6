//! Lazy ordering.
//!
//! - [`Less`]: fallible comparator trait, with [`NaturalOrder`], [`ByKey`],
//!   [`Reverse`] and [`ContextLess`] implementations.
//! - [`PartialHeapSort`]: sorts any fallible [`LazySequence`] on demand.
//!   Pulling the first `k` items costs `O(n + k log n)` comparisons.
//! - [`top_k`]: the `k` smallest items as a `Vec`.
//!
//! [`LazySequence`]: crate::sequence::LazySequence

mod heap;
mod less;

pub use heap::{DEFAULT_CAPACITY_HINT, PartialHeapSort, top_k};
pub use less::{ByKey, ContextLess, Less, NaturalOrder, Reverse};
