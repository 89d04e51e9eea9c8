use crate::{
    fenwick::FenwickTree,
    ops::{clamp_range, Element, RangeStructure, RangeUpdate},
};

/// This data structure allows range modification and range queries.
///
/// This tree allocates `2 * (n + 1) * size_of::<N>()` bytes of memory.
///
/// It is implemented using two [`FenwickTree`]s. Adding `v` to `[l, r]` is encoded as a
/// piecewise linear function over two difference arrays: `multiplier` records `+v` at `l`
/// and `-v` at `r + 1`, while `correction` records `v * l` and `-v * (r + 1)`. The prefix
/// sum up to `i` is then `multiplier.prefix_sum(i) * (i + 1) - correction.prefix_sum(i)`.
///
/// # Examples
///
/// ```rust
/// use rangesum::RangeOptimizedBit;
///
/// let mut bit = RangeOptimizedBit::build(&[1.0, 2.0, 3.0, 4.0, 5.0]);
///
/// // add ten to every value between 1 and 3
/// bit.range_update(1, 3, 10.0);
/// assert_eq!(bit.range_sum(1, 3), 39.0);
/// assert_eq!(bit.range_sum(0, 0), 1.0);
/// assert_eq!(bit.range_sum(0, 4), 45.0);
/// ```
///
/// [`FenwickTree`]: struct.FenwickTree.html
#[derive(Clone, Debug)]
pub struct RangeOptimizedBit<N: Element = f64> {
    multiplier: FenwickTree<N>,
    correction: FenwickTree<N>,
}

impl<N: Element> RangeOptimizedBit<N> {
    /// Creates a tree of `len` zeroes.
    pub fn with_len(len: usize) -> Self {
        Self {
            multiplier: FenwickTree::with_len(len),
            correction: FenwickTree::with_len(len),
        }
    }

    /// Creates a `RangeOptimizedBit` containing the given values.
    /// Uses `O(len)` time.
    ///
    /// The multiplier tree is built from the difference sequence `d` of `values` and the
    /// correction tree from `i * d[i]`, the same state `len` single element range updates
    /// on a zeroed tree would leave behind.
    pub fn build(values: &[N]) -> Self {
        let diff: Vec<N> = values
            .iter()
            .enumerate()
            .map(|(i, v)| if i == 0 { *v } else { *v - values[i - 1] })
            .collect();
        let weighted: Vec<N> = diff
            .iter()
            .enumerate()
            .map(|(i, d)| *d * N::from_index(i))
            .collect();

        Self {
            multiplier: FenwickTree::build(&diff),
            correction: FenwickTree::build(&weighted),
        }
    }

    /// Creates a `RangeOptimizedBit` by setting every value of a zeroed tree one at a time.
    /// Uses `O(len * log(len))` time.
    ///
    /// Only exists as a baseline to compare [`build`] against.
    ///
    /// [`build`]: #method.build
    pub fn build_naive(values: &[N]) -> Self {
        let mut bit = Self::with_len(values.len());
        // point_update computes deltas against the current state, which must be all zero
        debug_assert!(bit.multiplier.to_vec().iter().all(|v| *v == N::ZERO));
        debug_assert!(bit.correction.to_vec().iter().all(|v| *v == N::ZERO));
        for (i, value) in values.iter().enumerate() {
            bit.point_update(i as isize, *value);
        }
        bit
    }

    /// Returns the number of values in this tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.multiplier.len()
    }

    /// Returns `true` if the tree holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add `value` to every element in `[l, r]`.
    /// Uses `O(log(len))` time.
    ///
    /// `l` is clamped to `0` and `r` to `len - 1`. An empty interval is a no-op.
    pub fn range_update(&mut self, l: isize, r: isize, value: N) {
        let Some((l, r)) = clamp_range(l, r, self.len()) else {
            return;
        };
        let end = r + 1;

        self.multiplier.update(l as isize, value);
        self.correction.update(l as isize, value * N::from_index(l));

        if end < self.len() {
            self.multiplier.update(end as isize, N::ZERO - value);
            self.correction
                .update(end as isize, N::ZERO - value * N::from_index(end));
        }
    }

    /// Computes `a[0] + a[1] + ... + a[index]`. Note that `index` is inclusive.
    /// Uses `O(log(len))` time.
    ///
    /// A negative index yields zero and an index past the end is clamped to the last element.
    pub fn prefix_sum(&self, index: isize) -> N {
        let len = self.len();
        if index < 0 || len == 0 {
            return N::ZERO;
        }
        let index = (index as usize).min(len - 1);
        let i = index as isize;
        self.multiplier.prefix_sum(i) * N::from_index(index + 1) - self.correction.prefix_sum(i)
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
        self.range_update(index, index, value - current);
    }

    /// Returns the number of bytes allocated by both internal trees.
    #[inline]
    pub fn memory_footprint(&self) -> usize {
        self.multiplier.memory_footprint() + self.correction.memory_footprint()
    }
}

impl<N: Element> Default for RangeOptimizedBit<N> {
    #[inline]
    fn default() -> Self {
        Self::with_len(0)
    }
}

impl<N: Element> RangeUpdate<N> for RangeOptimizedBit<N> {
    fn range_update(&mut self, l: isize, r: isize, value: N) {
        RangeOptimizedBit::range_update(self, l, r, value)
    }
}

impl<N: Element> RangeStructure<N> for RangeOptimizedBit<N> {
    fn build(values: &[N]) -> Self {
        RangeOptimizedBit::build(values)
    }
    fn name(&self) -> &'static str {
        "RangeOptimizedBIT"
    }
    fn len(&self) -> usize {
        RangeOptimizedBit::len(self)
    }
    fn point_update(&mut self, index: isize, value: N) {
        RangeOptimizedBit::point_update(self, index, value)
    }
    fn range_query(&mut self, l: isize, r: isize) -> N {
        self.range_sum(l, r)
    }
    fn memory_footprint(&self) -> usize {
        RangeOptimizedBit::memory_footprint(self)
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

    fn values(bit: &RangeOptimizedBit<i64>) -> Vec<i64> {
        (0..bit.len() as isize)
            .map(|i| bit.range_sum(i, i))
            .collect()
    }

    #[test]
    fn build_matches_input() {
        let input = vec![5i64, -3, 8, 0, 12, 7];
        let bit = RangeOptimizedBit::build(&input);
        assert_eq!(values(&bit), input);
        assert_eq!(bit.range_sum(0, 5), 29);
        assert_eq!(bit.prefix_sum(2), 10);
    }

    #[test]
    fn build_naive_matches_build() {
        let mut rng = fastrand::Rng::with_seed(17);
        for n in 0..100 {
            let input: Vec<i64> = (0..n).map(|_| rng.i64(-500..500)).collect();
            let fast = RangeOptimizedBit::build(&input);
            let naive = RangeOptimizedBit::build_naive(&input);
            for i in -1..=n as isize {
                assert_eq!(fast.prefix_sum(i), naive.prefix_sum(i));
            }
        }
    }

    #[test]
    fn range_update_against_vec() {
        let mut rng = fastrand::Rng::with_seed(23);
        for n in 1..60usize {
            let mut model: Vec<i64> = (0..n).map(|_| rng.i64(-100..100)).collect();
            let mut bit = RangeOptimizedBit::build(&model);
            for _ in 0..20 {
                let a = rng.usize(0..n);
                let b = rng.usize(0..n);
                let (l, r) = (a.min(b), a.max(b));
                let v = rng.i64(-50..50);
                for x in &mut model[l..=r] {
                    *x += v;
                }
                bit.range_update(l as isize, r as isize, v);
                assert_eq!(values(&bit), model);
            }
        }
    }

    #[test]
    fn range_update_scenario() {
        let mut bit = RangeOptimizedBit::build(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(bit.range_sum(0, 4), 15.0);
        bit.range_update(1, 3, 10.0);
        assert_eq!(bit.range_sum(1, 3), 39.0);
        assert_eq!(bit.range_sum(0, 0), 1.0);
        assert_eq!(bit.range_sum(4, 4), 5.0);
    }

    #[test]
    fn range_update_clamps() {
        let mut bit = RangeOptimizedBit::build(&[0i64; 4]);
        bit.range_update(-10, 1, 3);
        bit.range_update(2, 100, 5);
        assert_eq!(values(&bit), vec![3, 3, 5, 5]);

        bit.range_update(3, 2, 100);
        bit.range_update(-4, -1, 100);
        bit.range_update(4, 9, 100);
        assert_eq!(values(&bit), vec![3, 3, 5, 5]);
    }

    #[test]
    fn point_update_sets_value() {
        let mut bit = RangeOptimizedBit::build(&[1i64, 2, 3, 4, 5]);
        bit.range_update(0, 4, 2);
        bit.point_update(2, 100);
        assert_eq!(values(&bit), vec![3, 4, 100, 6, 7]);
        bit.point_update(7, 1);
        bit.point_update(-1, 1);
        assert_eq!(values(&bit), vec![3, 4, 100, 6, 7]);
    }

    #[test]
    fn empty() {
        let mut bit = RangeOptimizedBit::<f64>::build(&[]);
        bit.range_update(0, 3, 1.0);
        bit.point_update(0, 4.0);
        assert_eq!(bit.range_sum(0, 3), 0.0);
        assert_eq!(bit.prefix_sum(0), 0.0);
        assert_eq!(bit.memory_footprint(), 16);
    }

    #[test]
    fn footprint() {
        let bit = RangeOptimizedBit::build(&[1.0f64; 50]);
        assert_eq!(bit.memory_footprint(), 2 * 51 * 8);
    }

    #[test]
    fn capability() {
        let mut bit = RangeOptimizedBit::build(&[1.0, 1.0, 1.0]);
        assert!(bit.supports_range_update());
        bit.as_range_update()
            .expect("range updates are supported")
            .range_update(0, 1, 2.0);
        assert_eq!(RangeStructure::range_query(&mut bit, 0, 2), 7.0);
    }
}
