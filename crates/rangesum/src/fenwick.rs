use crate::ops::{Element, RangeStructure, RangeUpdate};

use core::mem;

/// This data structure allows prefix and range sums with single element modification.
///
/// This tree allocates `(n + 1) * size_of::<N>()` bytes of memory. Slot `0` of the backing
/// array is never used, slot `i` holds the sum of the `lsb(i)` elements ending at `i`.
///
/// This data structure is implemented using a [Fenwick tree][1], which is also known as a
/// binary indexed tree. It has no range update of its own, see
/// [`RangeOptimizedBit`] for a variant that does.
///
/// # Examples
///
/// ```rust
/// use rangesum::FenwickTree;
///
/// let mut tree = FenwickTree::build(&[1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert_eq!(tree.range_sum(0, 4), 15.0);
///
/// // Set the element at index 2 from 3 to 100.
/// tree.point_update(2, 100.0);
/// assert_eq!(tree.range_sum(0, 4), 112.0);
/// assert_eq!(tree.range_sum(2, 2), 100.0);
///
/// // Bounds are never an error.
/// assert_eq!(tree.range_sum(3, 1), 0.0);
/// assert_eq!(tree.prefix_sum(100), 112.0);
/// ```
///
/// [1]: https://en.wikipedia.org/wiki/Fenwick_tree
/// [`RangeOptimizedBit`]: struct.RangeOptimizedBit.html
#[derive(Clone, Debug)]
pub struct FenwickTree<N: Element = f64> {
    tree: Vec<N>,
}

/// Returns the least significant bit that is one.
#[inline(always)]
pub(crate) fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

impl<N: Element> FenwickTree<N> {
    /// Creates a tree of `len` zeroes.
    pub fn with_len(len: usize) -> Self {
        Self {
            tree: vec![N::ZERO; len + 1],
        }
    }

    /// Creates a `FenwickTree` containing the given values.
    /// Uses `O(len)` time.
    pub fn build(values: &[N]) -> Self {
        let len = values.len();
        let mut tree = Vec::with_capacity(len + 1);
        tree.push(N::ZERO);
        tree.extend_from_slice(values);

        for i in 1..=len {
            let parent = i + lsb(i);
            if parent <= len {
                let child = tree[i];
                tree[parent] += child;
            }
        }
        Self { tree }
    }

    /// Creates a `FenwickTree` by adding every value to a zeroed tree one at a time.
    /// Uses `O(len * log(len))` time.
    ///
    /// Produces the same tree as [`build`] and only exists as a baseline to compare against.
    ///
    /// [`build`]: #method.build
    pub fn build_naive(values: &[N]) -> Self {
        let mut fenwick = Self::with_len(values.len());
        // update adds, so this only holds on a freshly zeroed tree
        debug_assert!(fenwick.tree.iter().all(|v| *v == N::ZERO));
        for (i, value) in values.iter().enumerate() {
            fenwick.update(i as isize, *value);
        }
        fenwick
    }

    /// Returns the number of values in this tree.
    /// Uses `O(1)` time.
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len() - 1
    }

    /// Returns `true` if the tree holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds `delta` to the value at `index`.
    /// Uses `O(log(len))` time.
    ///
    /// An index outside of the tree is ignored.
    #[inline]
    pub fn update(&mut self, index: isize, delta: N) {
        let len = self.len();
        if index < 0 || index as usize >= len {
            return;
        }
        let mut i = index as usize + 1;
        while i <= len {
            self.tree[i] += delta;
            i += lsb(i);
        }
    }

    /// Computes `a[0] + a[1] + ... + a[index]`. Note that `index` is inclusive.
    /// Uses `O(log(index))` time.
    ///
    /// A negative index yields zero and an index past the end is clamped to the last element.
    #[inline]
    pub fn prefix_sum(&self, index: isize) -> N {
        let len = self.len();
        if index < 0 || len == 0 {
            return N::ZERO;
        }
        let mut i = (index as usize).min(len - 1) + 1;
        let mut sum = N::ZERO;
        while i > 0 {
            sum += self.tree[i];
            i -= lsb(i);
        }
        sum
    }

    /// Computes `a[l] + a[l+1] + ... + a[r]`.
    /// Uses `O(log(len))` time.
    ///
    /// Returns zero if `l > r`, `r < 0` or `l >= len`.
    pub fn range_sum(&self, l: isize, r: isize) -> N {
        if l > r || r < 0 || l >= self.len() as isize {
            return N::ZERO;
        }
        if l <= 0 {
            self.prefix_sum(r)
        } else {
            self.prefix_sum(r) - self.prefix_sum(l - 1)
        }
    }

    /// Change the value at the index to be the specified value.
    /// Uses `O(log(len))` time.
    pub fn point_update(&mut self, index: isize, value: N) {
        let current = self.range_sum(index, index);
        self.update(index, value - current);
    }

    /// Returns the number of bytes allocated for accumulators, including the unused slot.
    #[inline]
    pub fn memory_footprint(&self) -> usize {
        self.tree.len() * mem::size_of::<N>()
    }

    /// Compute the underlying array of values.
    /// Uses `O(len)` time.
    pub fn to_vec(&self) -> Vec<N> {
        let len = self.len();
        let mut buf = self.tree.clone();
        for i in (1..=len).rev() {
            let parent = i + lsb(i);
            if parent <= len {
                let child = buf[i];
                buf[parent] -= child;
            }
        }
        buf.remove(0);
        buf
    }
}

impl<N: Element> Default for FenwickTree<N> {
    #[inline]
    fn default() -> Self {
        Self::with_len(0)
    }
}

impl<N: Element> RangeStructure<N> for FenwickTree<N> {
    fn build(values: &[N]) -> Self {
        FenwickTree::build(values)
    }
    fn name(&self) -> &'static str {
        "FenwickTree"
    }
    fn len(&self) -> usize {
        FenwickTree::len(self)
    }
    fn point_update(&mut self, index: isize, value: N) {
        FenwickTree::point_update(self, index, value)
    }
    fn range_query(&mut self, l: isize, r: isize) -> N {
        self.range_sum(l, r)
    }
    fn memory_footprint(&self) -> usize {
        FenwickTree::memory_footprint(self)
    }
    fn as_range_update(&mut self) -> Option<&mut dyn RangeUpdate<N>> {
        None
    }
    fn supports_range_update(&self) -> bool {
        false
    }
}
