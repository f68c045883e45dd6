//! [`Collection`](crate::collection::Collection) implementations for standard
//! containers.
//!
//! | Backing store          | Index             | Value            | `index_get` |
//! |------------------------|-------------------|------------------|-------------|
//! | `Vec<A>`, `[A]`        | `usize` position  | `A`              | O(1)        |
//! | `BTreeMap<K, V>`       | `K`               | `V`              | O(log n)    |
//! | `HashMap<K, V, S>`     | `K`               | `V`              | O(1)        |
//! | `str`, `String`        | `usize` char pos. | `char`           | O(n)        |
//!
//! Maps iterate in ascending key order; a `HashMap` is sorted by key on every
//! traversal so that two runs over equal maps agree.
//!
//! Values are cloned into each yielded element; wrap large values in
//! [`Rc`](std::rc::Rc) when that matters.

mod map;
mod slice;
mod text;
