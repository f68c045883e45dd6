//! # ixseq
//!
//! Lazy, index-aware collections with partial heap ordering and
//! distance-based diffing.
//!
//! ## Overview
//!
//! - **Sequences**: push-style [`LazySequence`](sequence::LazySequence)s
//!   that stop producing as soon as their consumer stops
//! - **Collections**: the [`Collection`](collection::Collection) contract
//!   (traversal, lookup by index, index equivalence, size) plus lazy views
//!   and materialization
//! - **Ordering**: [`PartialHeapSort`](ordering::PartialHeapSort), which
//!   pays `O(n + k log n)` comparisons for the first `k` sorted elements
//! - **Diffing**: [`diff`](diff::diff) matches before and after elements by
//!   a distance function and reports additions, removals and modifications
//! - **Execution context**: cancellation, deadlines and comparison counters
//!   threaded explicitly through every call
//!
//! ## Feature Flags
//!
//! - `adapters`: `Collection` for `Vec`, slices, `BTreeMap`, `HashMap`,
//!   `str` and `String`
//! - `diff`: the diff engine
//! - `serde`: `Serialize`/`Deserialize` for `IndexedValue`, `Diff` and
//!   `DiffType`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use ixseq::prelude::*;
//!
//! let context = ExecutionContext::new();
//! let latencies = vec![120, 45, 300, 80, 95];
//!
//! let fastest: Vec<usize> = latencies
//!     .ordered_by(NaturalOrder)
//!     .taking(3)
//!     .to_vec(&context)
//!     .unwrap()
//!     .into_iter()
//!     .map(|element| element.index)
//!     .collect();
//! assert_eq!(fastest, vec![1, 3, 4]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use ixseq::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collection::{Collection, CollectionExt, Materialized, generate, materialize};
    pub use crate::context::{CancellationToken, ExecutionContext, Metrics};
    pub use crate::error::{CancelReason, Error};
    pub use crate::ordering::{ByKey, Less, NaturalOrder, PartialHeapSort, Reverse, top_k};
    pub use crate::sequence::{Element, IndexedValue, LazySequence, LazySequenceExt, emit};

    #[cfg(feature = "diff")]
    pub use crate::diff::{Diff, DiffCollection, DiffOptions, DiffType, Distance, diff};
}

pub mod collection;
pub mod context;
pub mod error;
pub mod ordering;
pub mod sequence;

#[cfg(feature = "adapters")]
mod adapter;

#[cfg(feature = "diff")]
pub mod diff;
