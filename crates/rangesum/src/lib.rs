//! This crate contains data structures for range-sum queries over a mutable sequence of
//! numbers.
//!
//! Every structure in this crate is a tree represented using an array for high
//! performance and low memory usage. All of them answer range-sum queries and set single
//! elements in logarithmic time, and they differ in whether range updates are supported
//! and in how much memory they need.
//!
//! The [`FenwickTree`] data structure allows prefix and range sums with point updates
//! using `n + 1` accumulators. It has no range update. This data structure is also known
//! as a [binary indexed tree][1].
//!
//! The [`RangeOptimizedBit`] data structure composes two Fenwick trees to add range
//! updates in logarithmic time, at twice the memory.
//!
//! The [`SegmentTree`] data structure is a complete binary tree with
//! [lazy propagation][2]. It supports every operation directly and uses the most memory.
//!
//! All three implement the [`RangeStructure`] trait, so a caller can drive any of them
//! through one interface and ask for the [`RangeUpdate`] capability when it needs it.
//!
//! ```rust
//! use rangesum::{FenwickTree, RangeOptimizedBit, RangeStructure, SegmentTree};
//!
//! let data = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let mut structures: Vec<Box<dyn RangeStructure<f64>>> = vec![
//!     Box::new(SegmentTree::build(&data)),
//!     Box::new(FenwickTree::build(&data)),
//!     Box::new(RangeOptimizedBit::build(&data)),
//! ];
//!
//! for s in structures.iter_mut() {
//!     assert_eq!(s.range_query(0, 4), 15.0);
//!     if let Some(updater) = s.as_range_update() {
//!         updater.range_update(0, 4, 1.0);
//!         assert_eq!(s.range_query(0, 4), 20.0);
//!     }
//! }
//! ```
//!
//! Indices are `isize` and bounds are permissive: negative, out-of-range or inverted
//! intervals never panic. Queries over them return zero and updates do nothing.
//!
//! None of the structures synchronize internally. Share one between threads behind a lock.
//!
//! [1]: https://en.wikipedia.org/wiki/Fenwick_tree
//! [2]: https://cp-algorithms.com/data_structures/segment_tree.html
//! [`FenwickTree`]: struct.FenwickTree.html
//! [`RangeOptimizedBit`]: struct.RangeOptimizedBit.html
//! [`SegmentTree`]: struct.SegmentTree.html
//! [`RangeStructure`]: ops/trait.RangeStructure.html
//! [`RangeUpdate`]: ops/trait.RangeUpdate.html
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod ops;
pub use crate::{
    fenwick::FenwickTree,
    ops::{Element, RangeStructure, RangeUpdate},
    range_bit::RangeOptimizedBit,
    segment_tree::SegmentTree,
};

mod fenwick;
mod range_bit;
mod segment_tree;
