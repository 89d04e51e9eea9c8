//! Module of the element types and the operation contract shared by every structure.
//!
//! The [`Element`] trait specifies which numbers a structure can hold, while
//! [`RangeStructure`] and [`RangeUpdate`] describe what a caller can do with a built
//! structure. A caller that needs range updates checks the capability through
//! [`RangeStructure::as_range_update`] instead of assuming it exists.
//!
//! [`Element`]: trait.Element.html
//! [`RangeStructure`]: trait.RangeStructure.html
//! [`RangeUpdate`]: trait.RangeUpdate.html

use core::{
    fmt::Debug,
    ops::{Add, AddAssign, Mul, Sub, SubAssign},
};

/// A numeric type that can be summed over a range.
///
/// The sum must form a group under addition: every structure relies on subtraction to
/// recover ranges from prefixes and to turn absolute values into deltas.
pub trait Element:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + AddAssign
    + SubAssign
{
    /// The additive identity.
    const ZERO: Self;

    /// Converts a position or a length into the element type so it can scale a value.
    fn from_index(index: usize) -> Self;
}

macro_rules! element_impl {
    ($type:ty, $zero:expr) => {
        impl Element for $type {
            const ZERO: Self = $zero;

            #[inline]
            fn from_index(index: usize) -> Self {
                index as $type
            }
        }
    };
}

element_impl!(f64, 0.0);
element_impl!(f32, 0.0);
element_impl!(i64, 0);
element_impl!(i32, 0);

/// Range updates: add a value to every element in an interval.
///
/// Only the structures that can do this in logarithmic time implement it.
pub trait RangeUpdate<N: Element> {
    /// Adds `value` to every element in `[l, r]` (inclusive, 0-based).
    ///
    /// Bounds are clamped to the sequence, and an empty or inverted interval is a no-op.
    fn range_update(&mut self, l: isize, r: isize, value: N);
}

/// The operations every structure supports.
///
/// All methods follow the same permissive bounds policy: negative, out-of-range or
/// inverted indices never panic. Queries resolve them to `N::ZERO` and updates to a
/// no-op.
pub trait RangeStructure<N: Element> {
    /// Builds the structure from the initial sequence.
    fn build(values: &[N]) -> Self
    where
        Self: Sized;

    /// A human readable name of the structure.
    fn name(&self) -> &'static str;

    /// Returns the number of elements in the modeled sequence.
    fn len(&self) -> usize;

    /// Returns `true` if the modeled sequence is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sets the element at `index` to `value`.
    fn point_update(&mut self, index: isize, value: N);

    /// Returns the sum of the elements in `[l, r]` (inclusive, 0-based).
    ///
    /// Takes `&mut self` since a lazy structure flushes pending updates while reading.
    fn range_query(&mut self, l: isize, r: isize) -> N;

    /// Returns the number of bytes held by the backing arrays.
    fn memory_footprint(&self) -> usize;

    /// Returns the range update capability if the structure has one.
    fn as_range_update(&mut self) -> Option<&mut dyn RangeUpdate<N>>;

    /// Returns `true` if [`as_range_update`] returns `Some`.
    ///
    /// [`as_range_update`]: #tymethod.as_range_update
    fn supports_range_update(&self) -> bool;
}

/// Resolves an inclusive `[l, r]` interval against a sequence of `len` elements.
///
/// Returns `None` if nothing of the interval lies within the sequence.
#[inline]
pub(crate) fn clamp_range(l: isize, r: isize, len: usize) -> Option<(usize, usize)> {
    if len == 0 || r < 0 || l > r {
        return None;
    }
    let l = l.max(0) as usize;
    let r = (r as usize).min(len - 1);
    if l > r {
        return None;
    }
    Some((l, r))
}
