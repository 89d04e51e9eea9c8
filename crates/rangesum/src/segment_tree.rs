use crate::ops::{clamp_range, Element, RangeStructure, RangeUpdate};

use core::mem;

/// This data structure allows range modification and range queries.
///
/// This tree allocates `2 * tree_size * size_of::<N>()` bytes of memory, where
/// `tree_size = 2 * n.next_power_of_two() - 1`.
///
/// This tree is implemented using a complete binary tree stored in an array, where node
/// `i` has the children `2i + 1` and `2i + 2`. Each node contains the sum of its
/// interval, together with an increment in `pending` that has been applied to the node
/// but not yet to its children. Every traversal pushes a node's pending increment down
/// before looking past the node.
///
/// # Examples
///
/// ```rust
/// use rangesum::SegmentTree;
///
/// let mut tree = SegmentTree::build(&[1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert_eq!(tree.range_query(0, 4), 15.0);
///
/// // add ten to every value between 1 and 3
/// tree.range_update(1, 3, 10.0);
/// assert_eq!(tree.range_query(1, 3), 39.0);
/// assert_eq!(tree.range_query(0, 0), 1.0);
///
/// tree.point_update(4, 0.0);
/// assert_eq!(tree.range_query(0, 4), 40.0);
/// ```
#[derive(Clone, Debug)]
pub struct SegmentTree<N: Element = f64> {
    sums: Vec<N>,
    pending: Vec<N>,
    n: usize,
}

#[inline(always)]
fn left(node: usize) -> usize {
    2 * node + 1
}

#[inline(always)]
fn right(node: usize) -> usize {
    2 * node + 2
}

#[inline(always)]
fn mid(start: usize, end: usize) -> usize {
    start + (end - start) / 2
}

impl<N: Element> SegmentTree<N> {
    /// Builds a tree from the given values.
    /// Uses `O(len)` time.
    pub fn build(values: &[N]) -> Self {
        let n = values.len();
        let tree_size = Self::tree_size_for(n);
        let mut tree = Self {
            sums: vec![N::ZERO; tree_size],
            pending: vec![N::ZERO; tree_size],
            n,
        };
        if n > 0 {
            tree.build_node(values, 0, 0, n - 1);
        }
        tree
    }

    /// Returns the number of nodes needed to cover `n` leaves.
    #[inline]
    pub fn tree_size_for(n: usize) -> usize {
        if n == 0 {
            0
        } else {
            2 * n.next_power_of_two() - 1
        }
    }

    fn build_node(&mut self, values: &[N], node: usize, start: usize, end: usize) {
        if start == end {
            self.sums[node] = values[start];
            return;
        }
        let mid = mid(start, end);
        self.build_node(values, left(node), start, mid);
        self.build_node(values, right(node), mid + 1, end);
        self.sums[node] = self.sums[left(node)] + self.sums[right(node)];
    }

    /// The number of elements stored in this segment tree.  Uses `O(1)` time.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns `true` if the tree holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// The number of nodes in the tree.
    #[inline]
    pub fn tree_size(&self) -> usize {
        self.sums.len()
    }

    /// Applies the pending increment of `node` to its own sum and hands it to its children.
    #[inline]
    fn push_down(&mut self, node: usize, start: usize, end: usize) {
        let pending = self.pending[node];
        if pending == N::ZERO {
            return;
        }
        self.sums[node] += pending * N::from_index(end - start + 1);
        if start != end {
            self.defer(left(node), pending);
            self.defer(right(node), pending);
        }
        self.pending[node] = N::ZERO;
    }

    /// Adds `value` to the pending increment of `node`, accumulating on top of what is there.
    #[inline]
    fn defer(&mut self, node: usize, value: N) {
        if let Some(pending) = self.pending.get_mut(node) {
            *pending += value;
        }
    }

    #[inline]
    fn sum_at(&self, node: usize) -> N {
        self.sums.get(node).copied().unwrap_or(N::ZERO)
    }

    /// Add `value` to every element in `[l, r]`.
    /// Uses `O(log(len))` time.
    ///
    /// `l` is clamped to `0` and `r` to `len - 1`. An empty interval is a no-op.
    pub fn range_update(&mut self, l: isize, r: isize, value: N) {
        let Some((l, r)) = clamp_range(l, r, self.n) else {
            return;
        };
        self.update_node(0, 0, self.n - 1, l, r, value);
    }

    fn update_node(&mut self, node: usize, start: usize, end: usize, l: usize, r: usize, value: N) {
        if node >= self.tree_size() {
            return;
        }
        self.push_down(node, start, end);

        if start > r || end < l {
            return;
        }

        if l <= start && end <= r {
            self.sums[node] += value * N::from_index(end - start + 1);
            if start != end {
                self.defer(left(node), value);
                self.defer(right(node), value);
            }
            return;
        }

        let mid = mid(start, end);
        self.update_node(left(node), start, mid, l, r, value);
        self.update_node(right(node), mid + 1, end, l, r, value);
        self.sums[node] = self.sum_at(left(node)) + self.sum_at(right(node));
    }

    /// Computes `a[l] + a[l+1] + ... + a[r]`.
    /// Uses `O(log(len))` time.
    ///
    /// Bounds are clamped like in [`range_update`], an empty interval sums to zero.
    ///
    /// [`range_update`]: #method.range_update
    pub fn range_query(&mut self, l: isize, r: isize) -> N {
        let Some((l, r)) = clamp_range(l, r, self.n) else {
            return N::ZERO;
        };
        self.query_node(0, 0, self.n - 1, l, r)
    }

    fn query_node(&mut self, node: usize, start: usize, end: usize, l: usize, r: usize) -> N {
        if node >= self.tree_size() {
            return N::ZERO;
        }
        self.push_down(node, start, end);

        if start > r || end < l {
            return N::ZERO;
        }
        if l <= start && end <= r {
            return self.sums[node];
        }

        let mid = mid(start, end);
        self.query_node(left(node), start, mid, l, r)
            + self.query_node(right(node), mid + 1, end, l, r)
    }

    /// Change the value at the index to be the specified value.
    /// Uses `O(log(len))` time.
    pub fn point_update(&mut self, index: isize, value: N) {
        let current = self.range_query(index, index);
        self.range_update(index, index, value - current);
    }

    /// Returns the number of bytes allocated for the sums and the pending increments.
    #[inline]
    pub fn memory_footprint(&self) -> usize {
        2 * self.tree_size() * mem::size_of::<N>()
    }

    /// Propagates every pending increment down to the leaves and returns the values.
    /// Uses `O(len)` time.
    pub fn propagate(&mut self) -> Vec<N> {
        let mut leaves = Vec::with_capacity(self.n);
        if self.n > 0 {
            self.collect_leaves(0, 0, self.n - 1, &mut leaves);
        }
        leaves
    }

    fn collect_leaves(&mut self, node: usize, start: usize, end: usize, out: &mut Vec<N>) {
        self.push_down(node, start, end);
        if start == end {
            out.push(self.sums[node]);
            return;
        }
        let mid = mid(start, end);
        self.collect_leaves(left(node), start, mid, out);
        self.collect_leaves(right(node), mid + 1, end, out);
    }
}

impl<N: Element> Default for SegmentTree<N> {
    #[inline]
    fn default() -> Self {
        Self::build(&[])
    }
}

impl<N: Element> RangeUpdate<N> for SegmentTree<N> {
    fn range_update(&mut self, l: isize, r: isize, value: N) {
        SegmentTree::range_update(self, l, r, value)
    }
}

impl<N: Element> RangeStructure<N> for SegmentTree<N> {
    fn build(values: &[N]) -> Self {
        SegmentTree::build(values)
    }
    fn name(&self) -> &'static str {
        "SegmentTree"
    }
    fn len(&self) -> usize {
        self.n
    }
    fn point_update(&mut self, index: isize, value: N) {
        SegmentTree::point_update(self, index, value)
    }
    fn range_query(&mut self, l: isize, r: isize) -> N {
        SegmentTree::range_query(self, l, r)
    }
    fn memory_footprint(&self) -> usize {
        SegmentTree::memory_footprint(self)
    }
    fn as_range_update(&mut self) -> Option<&mut dyn RangeUpdate<N>> {
        Some(self)
    }
    fn supports_range_update(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_sizes() {
        assert_eq!(SegmentTree::<f64>::tree_size_for(0), 0);
        assert_eq!(SegmentTree::<f64>::tree_size_for(1), 1);
        assert_eq!(SegmentTree::<f64>::tree_size_for(2), 3);
        assert_eq!(SegmentTree::<f64>::tree_size_for(5), 15);
        assert_eq!(SegmentTree::<f64>::tree_size_for(8), 15);
        assert_eq!(SegmentTree::<f64>::tree_size_for(9), 31);
        for n in 1..300 {
            assert!(SegmentTree::<f64>::tree_size_for(n) >= 2 * n - 1);
        }
    }

    #[test]
    fn build_sums() {
        let mut rng = fastrand::Rng::with_seed(31);
        for n in 1..130usize {
            let values: Vec<i64> = (0..n).map(|_| rng.i64(-1000..1000)).collect();
            let tree = SegmentTree::build(&values);
            assert_eq!(tree.sums[0], values.iter().sum::<i64>());
            assert_eq!(tree.clone().propagate(), values);
        }
    }

    #[test]
    fn test() {
        let mut rng = fastrand::Rng::with_seed(37);
        for i in 1..130usize {
            let mut buf: Vec<i64> = (0..i).map(|_| rng.i64(-1000..1000)).collect();
            let mut tree = SegmentTree::build(&buf);
            for _ in 0..10 {
                let n = rng.usize(0..i);
                let m = rng.usize(0..i);
                let v = rng.i64(-100..100);
                if n > m {
                    continue;
                }
                for index in n..=m {
                    buf[index] += v;
                }
                tree.range_update(n as isize, m as isize, v);
                let a = rng.usize(0..i);
                let b = rng.usize(0..i);
                let (l, r) = (a.min(b), a.max(b));
                assert_eq!(tree.range_query(l as isize, r as isize), buf[l..=r].iter().sum::<i64>());
            }
            assert_eq!(tree.propagate(), buf);
        }
    }

    #[test]
    fn pending_accumulates() {
        let mut tree = SegmentTree::build(&[0i64; 8]);
        // the root is covered twice, so each child holds both deferred increments
        tree.range_update(0, 7, 1);
        tree.range_update(0, 7, 2);
        assert_eq!(tree.pending[left(0)], 3);
        assert_eq!(tree.pending[right(0)], 3);
        assert_eq!(tree.range_query(0, 0), 3);
        assert_eq!(tree.range_query(0, 7), 24);
    }

    #[test]
    fn push_down_clears_node() {
        let mut tree = SegmentTree::build(&[1i64, 2, 3, 4]);
        tree.range_update(0, 3, 5);
        assert_eq!(tree.pending[0], 0);
        let child = left(0);
        assert_eq!(tree.pending[child], 5);
        tree.push_down(child, 0, 1);
        assert_eq!(tree.pending[child], 0);
        assert_eq!(tree.sums[child], 13);
        assert_eq!(tree.pending[left(child)], 5);
        assert_eq!(tree.pending[right(child)], 5);
    }

    #[test]
    fn scenario() {
        let mut tree = SegmentTree::build(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(tree.range_query(0, 4), 15.0);
        tree.range_update(1, 3, 10.0);
        assert_eq!(tree.range_query(1, 3), 39.0);
        assert_eq!(tree.range_query(0, 0), 1.0);
    }

    #[test]
    fn point_update() {
        let mut tree = SegmentTree::build(&[1i64, 2, 3, 4, 5]);
        tree.range_update(0, 4, 1);
        tree.point_update(3, -7);
        assert_eq!(tree.range_query(3, 3), -7);
        assert_eq!(tree.propagate(), vec![2, 3, 4, -7, 6]);
    }

    #[test]
    fn bounds() {
        let mut tree = SegmentTree::build(&[1i64, 2, 3]);
        assert_eq!(tree.range_query(2, 1), 0);
        assert_eq!(tree.range_query(-4, -1), 0);
        assert_eq!(tree.range_query(3, 10), 0);
        assert_eq!(tree.range_query(-4, 10), 6);

        tree.range_update(2, 1, 10);
        tree.range_update(-3, -1, 10);
        tree.range_update(3, 5, 10);
        tree.point_update(-1, 10);
        tree.point_update(3, 10);
        assert_eq!(tree.propagate(), vec![1, 2, 3]);

        tree.range_update(-3, 0, 10);
        tree.range_update(2, 30, 10);
        assert_eq!(tree.propagate(), vec![11, 2, 13]);
    }

    #[test]
    fn single_element() {
        let mut tree = SegmentTree::build(&[4.0]);
        assert_eq!(tree.tree_size(), 1);
        tree.range_update(0, 0, 2.0);
        assert_eq!(tree.range_query(0, 0), 6.0);
        tree.point_update(0, 1.0);
        assert_eq!(tree.range_query(-1, 1), 1.0);
    }

    #[test]
    fn empty() {
        let mut tree = SegmentTree::<f64>::build(&[]);
        assert!(tree.is_empty());
        tree.range_update(0, 5, 1.0);
        tree.point_update(0, 1.0);
        assert_eq!(tree.range_query(0, 5), 0.0);
        assert_eq!(tree.memory_footprint(), 0);
        assert!(tree.propagate().is_empty());
    }

    #[test]
    fn footprint() {
        let tree = SegmentTree::build(&[1.0f64; 5]);
        assert_eq!(tree.tree_size(), 15);
        assert_eq!(tree.memory_footprint(), 2 * 15 * 8);
    }
}
