//! Distance-based diffing of indexed collections.
//!
//! [`diff`] pairs the elements of a before and an after collection by
//! closeness under a caller-supplied [`Distance`], and reports every element
//! as added, removed, modified or unchanged. Unlike a longest common
//! subsequence diff, elements can be matched across arbitrary positions, so
//! moves and near-duplicates are recognised.
//!
//! The result is a [`DiffCollection`]: a collection indexed by [`Diff`]
//! records whose values are the after-side values. Its
//! [`rewrite`](DiffCollection::rewrite) method applies a filter mask and a
//! callback to produce the rewritten after collection.
//!
//! # Examples
//!
//! ```rust
//! use ixseq::context::ExecutionContext;
//! use ixseq::diff::{DiffOptions, DiffType, diff};
//! use ixseq::error::Error;
//! use ixseq::sequence::IndexedValue;
//!
//! let context = ExecutionContext::new();
//! let before = vec!["red", "green", "blue"];
//! let after = vec!["blue", "red"];
//! let same = |left: &IndexedValue<usize, &str>, right: &IndexedValue<usize, &str>| -> Result<f64, Error> {
//!     Ok(if left.value == right.value { 0.0 } else { 1.0 })
//! };
//!
//! let changes = diff(&context, &before, &after, &DiffOptions::any_index(0.0), same).unwrap();
//! assert_eq!(changes.count(DiffType::NONE), 2);
//! assert_eq!(changes.count(DiffType::REMOVE), 1);
//! ```

mod changes;
mod engine;
mod kind;
mod options;
mod record;

pub use changes::DiffCollection;
pub use engine::diff;
pub use kind::DiffType;
pub use options::{DEFAULT_DIFF_CAPACITY, DiffOptions, Distance};
pub use record::Diff;
