use crate::{
    conf::BenchConf,
    dataset::{OpKind, Operation},
    Error,
};
use log::{debug, info};
use minstant::Instant;
use rangesum::{FenwickTree, RangeOptimizedBit, RangeStructure, SegmentTree};
use rangesum_stats::{profile_scope, Percentiles, Sketch};
use serde::Serialize;

/// Relative tolerance used when comparing floating point answers
pub const TOLERANCE: f64 = 1e-6;

/// Latency of one operation kind on one structure.
#[derive(Debug, Clone, Serialize)]
pub struct OpReport {
    /// The measured operation kind
    pub kind: OpKind,
    /// `false` if the structure lacks the capability and the operations were skipped
    pub applicable: bool,
    /// Number of operations of this kind in the trace
    pub count: usize,
    /// Mean latency in milliseconds
    pub mean_ms: Option<f64>,
    /// Latency percentiles in nanoseconds
    pub percentiles: Percentiles,
}

/// Results of benchmarking one structure.
#[derive(Debug, Clone, Serialize)]
pub struct StructureReport {
    /// Name of the structure, with a suffix for naive constructions
    pub name: String,
    /// Construction time in milliseconds
    pub build_ms: f64,
    /// Bytes held by the backing arrays after construction
    pub memory_bytes: usize,
    /// One report per [`OpKind`], in [`OpKind::ALL`] order
    pub operations: Vec<OpReport>,
}

impl StructureReport {
    /// Returns the report of the given kind.
    pub fn op(&self, kind: OpKind) -> Option<&OpReport> {
        self.operations.iter().find(|op| op.kind == kind)
    }
}

#[derive(Default)]
struct OpSketches {
    point_update: Sketch,
    range_update: Sketch,
    range_query: Sketch,
    skipped: usize,
}

impl OpSketches {
    fn get(&self, kind: OpKind) -> &Sketch {
        match kind {
            OpKind::PointUpdate => &self.point_update,
            OpKind::RangeUpdate => &self.range_update,
            OpKind::RangeQuery => &self.range_query,
        }
    }
}

/// Runs an operation trace against every structure and measures it.
pub struct Harness {
    conf: BenchConf,
}

impl Harness {
    /// Creates a harness running with the given configuration.
    pub fn new(conf: BenchConf) -> Self {
        Self { conf }
    }

    /// Returns the configuration of this harness.
    pub fn conf(&self) -> &BenchConf {
        &self.conf
    }

    /// Benchmarks SegmentTree, FenwickTree and RangeOptimizedBIT, in that order.
    ///
    /// With a naive baseline configured, the naive constructions follow.
    pub fn compare(&self, data: &[f64], ops: &[Operation]) -> Vec<StructureReport> {
        let mut reports = vec![
            self.bench("SegmentTree", data, ops, SegmentTree::build),
            self.bench("FenwickTree", data, ops, FenwickTree::build),
            self.bench("RangeOptimizedBIT", data, ops, RangeOptimizedBit::build),
        ];
        if self.conf.naive_baseline() {
            reports.push(self.bench("FenwickTree (naive)", data, ops, FenwickTree::build_naive));
            reports.push(self.bench(
                "RangeOptimizedBIT (naive)",
                data,
                ops,
                RangeOptimizedBit::build_naive,
            ));
        }
        reports
    }

    /// Builds one structure and runs the whole trace against it.
    pub fn bench<S, F>(&self, name: &str, data: &[f64], ops: &[Operation], build: F) -> StructureReport
    where
        S: RangeStructure<f64>,
        F: FnOnce(&[f64]) -> S,
    {
        info!("benchmarking {} on {} elements", name, data.len());

        let now = Instant::now();
        let mut structure = build(data);
        let build_ms = now.elapsed().as_secs_f64() * 1000.0;
        let memory_bytes = structure.memory_footprint();
        debug!("{} built in {:.3}ms using {} bytes", name, build_ms, memory_bytes);

        let sketches = run_trace(&mut structure, ops);
        if sketches.skipped > 0 {
            info!(
                "{} does not support range updates, skipped {} operations",
                name, sketches.skipped
            );
        }

        let operations = OpKind::ALL
            .iter()
            .map(|kind| {
                let sketch = sketches.get(*kind);
                let applicable = *kind != OpKind::RangeUpdate || structure.supports_range_update();
                OpReport {
                    kind: *kind,
                    applicable,
                    count: ops.iter().filter(|op| op.kind() == *kind).count(),
                    mean_ms: sketch.mean().map(|ns| ns / 1_000_000.0),
                    percentiles: sketch.percentiles(),
                }
            })
            .collect();

        StructureReport {
            name: name.to_string(),
            build_ms,
            memory_bytes,
            operations,
        }
    }

    /// Replays the trace on SegmentTree and RangeOptimizedBIT and checks that every range
    /// query agrees within [`TOLERANCE`].
    pub fn verify(&self, data: &[f64], ops: &[Operation]) -> Result<(), Error> {
        let mut segment = SegmentTree::build(data);
        let mut bit = RangeOptimizedBit::build(data);

        for (step, op) in ops.iter().enumerate() {
            let expected = apply(&mut segment, op);
            let actual = apply(&mut bit, op);
            if let (Some(expected), Some(actual)) = (expected, actual) {
                let scale = 1.0 + expected.abs().max(actual.abs());
                if (expected - actual).abs() > TOLERANCE * scale {
                    return Err(Error::Divergence {
                        step,
                        expected,
                        actual,
                    });
                }
            }
        }
        info!("verified {} operations", ops.len());
        Ok(())
    }
}

/// Applies one operation, returning the answer of a range query.
///
/// A range update on a structure without the capability is skipped and returns `None`
/// like any other update.
fn apply<S: RangeStructure<f64> + ?Sized>(structure: &mut S, op: &Operation) -> Option<f64> {
    match *op {
        Operation::PointUpdate { index, value } => {
            structure.point_update(index, value);
            None
        }
        Operation::RangeUpdate { l, r, value } => {
            if let Some(updater) = structure.as_range_update() {
                updater.range_update(l, r, value);
            }
            None
        }
        Operation::RangeQuery { l, r } => Some(structure.range_query(l, r)),
    }
}

fn run_trace<S: RangeStructure<f64> + ?Sized>(structure: &mut S, ops: &[Operation]) -> OpSketches {
    let mut sketches = OpSketches::default();
    for op in ops {
        if op.kind() == OpKind::RangeUpdate && !structure.supports_range_update() {
            sketches.skipped += 1;
            continue;
        }
        let sketch = sketches.get(op.kind()).clone();
        profile_scope!(&sketch);
        core::hint::black_box(apply(structure, op));
    }
    sketches
}
