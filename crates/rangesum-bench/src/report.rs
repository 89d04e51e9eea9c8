use crate::{
    conf::BenchConf,
    dataset::{OpKind, QueryMix},
    harness::{OpReport, StructureReport},
    Error,
};
use prettytable::{row, Table};
use serde::Serialize;
use std::{fs::File, io::BufWriter, path::Path};

/// Outcome of a complete benchmark run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Number of elements
    pub size: usize,
    /// Number of operations
    pub queries: usize,
    /// Operation mix of the trace
    pub mix: QueryMix,
    /// Seed of the dataset generator
    pub seed: u64,
    /// Per structure results in benchmark order
    pub structures: Vec<StructureReport>,
}

impl Report {
    /// Collects the results of a run under `conf`.
    pub fn new(conf: &BenchConf, structures: Vec<StructureReport>) -> Self {
        Self {
            size: conf.size(),
            queries: conf.queries(),
            mix: conf.mix(),
            seed: conf.seed(),
            structures,
        }
    }

    /// Builds the comparison table with one row per structure.
    pub fn comparison_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row![
            "Structure",
            "Build (ms)",
            "Memory (bytes)",
            "Point Update (ms)",
            "Range Query (ms)",
            "Range Update (ms)",
        ]);
        for structure in &self.structures {
            let mean = |kind: OpKind| mean_fmt(structure.op(kind));
            table.add_row(row![
                structure.name,
                format!("{:.3}", structure.build_ms),
                structure.memory_bytes,
                mean(OpKind::PointUpdate),
                mean(OpKind::RangeQuery),
                mean(OpKind::RangeUpdate),
            ]);
        }
        table
    }

    /// Builds the latency table with one row per structure and operation kind.
    pub fn latency_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row![
            "structure",
            "operation",
            "count",
            "min",
            "p50",
            "p99",
            "p99.9",
            "max"
        ]);
        // helper fn to format percentile
        let percentile_fmt = |p: f64| -> String { format!("{:.2}ns", p) };

        for structure in &self.structures {
            for op in structure.operations.iter().filter(|op| op.applicable) {
                let p = op.percentiles;
                table.add_row(row![
                    structure.name,
                    op.kind.as_str(),
                    p.count,
                    percentile_fmt(p.min),
                    percentile_fmt(p.p50),
                    percentile_fmt(p.p99),
                    percentile_fmt(p.p99_9),
                    percentile_fmt(p.max),
                ]);
            }
        }
        table
    }

    /// Prints both tables to stdout.
    pub fn print(&self) {
        println!(
            "====Range Structures (size {}, {} {:?} operations, seed {})====",
            self.size, self.queries, self.mix, self.seed
        );
        self.comparison_table().printstd();
        println!("====Latency Percentiles====");
        self.latency_table().printstd();
    }

    /// Prints the asymptotic characteristics of every structure.
    pub fn print_summary(&self) {
        println!("{}", SUMMARY);
    }

    /// Writes the report as pretty printed JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

fn mean_fmt(op: Option<&OpReport>) -> String {
    match op {
        Some(op) if !op.applicable => "N/A".to_string(),
        Some(OpReport {
            mean_ms: Some(mean),
            ..
        }) => format!("{:.6}", mean),
        _ => "-".to_string(),
    }
}

const SUMMARY: &str = "\
SegmentTree:       O(n) build, O(log n) point update, range update and range query,
                   2 arrays of 2*2^ceil(log2 n)-1 elements (sums and pending increments)
FenwickTree:       O(n) build, O(log n) point update and range query,
                   no range update, n+1 elements
RangeOptimizedBIT: O(n) build, O(log n) point update, range update and range query,
                   two Fenwick trees of n+1 elements";
