#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rangesum::{FenwickTree, RangeOptimizedBit, SegmentTree};

#[derive(Debug, Arbitrary)]
enum Op {
    PointUpdate(i16, i16),
    RangeUpdate(i16, i16, i16),
    RangeQuery(i16, i16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    values: Vec<i32>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let values: Vec<i64> = input.values.iter().map(|v| *v as i64).collect();
    let n = values.len() as isize;

    let mut model = values.clone();
    let mut segment = SegmentTree::build(&values);
    let mut fenwick = FenwickTree::build(&values);
    let mut bit = RangeOptimizedBit::build(&values);

    for op in input.ops {
        match op {
            Op::PointUpdate(index, value) => {
                let (index, value) = (index as isize, value as i64);
                segment.point_update(index, value);
                fenwick.point_update(index, value);
                bit.point_update(index, value);
                if (0..n).contains(&index) {
                    model[index as usize] = value;
                }
            }
            Op::RangeUpdate(l, r, value) => {
                let (l, r, value) = (l as isize, r as isize, value as i64);
                segment.range_update(l, r, value);
                bit.range_update(l, r, value);
                for i in l.max(0)..=r.min(n - 1) {
                    model[i as usize] += value;
                    fenwick.update(i, value);
                }
            }
            Op::RangeQuery(l, r) => {
                let (l, r) = (l as isize, r as isize);
                let (lo, hi) = (l.max(0), r.min(n - 1));
                let expected: i64 = if lo > hi {
                    0
                } else {
                    model[lo as usize..=hi as usize].iter().sum()
                };
                assert_eq!(segment.range_query(l, r), expected);
                assert_eq!(fenwick.range_sum(l, r), expected);
                assert_eq!(bit.range_sum(l, r), expected);
            }
        }
    }
});
