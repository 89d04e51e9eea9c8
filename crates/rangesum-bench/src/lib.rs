//! Benchmarking harness comparing the structures of the `rangesum` crate.
//!
//! A run generates a seeded dataset and operation trace, builds every structure from the
//! dataset and replays the trace while recording per operation latencies.
//!
//! ```rust
//! use rangesum_bench::{BenchConf, DatasetGenerator, Harness, QueryMix, Report};
//!
//! let conf = BenchConf::default().with_size(128).with_queries(64).with_mix(QueryMix::Mixed);
//! let mut generator = DatasetGenerator::new(conf.seed());
//! let data = generator.uniform_default(conf.size());
//! let ops = generator.queries(conf.size(), conf.queries(), conf.mix());
//!
//! let harness = Harness::new(conf);
//! harness.verify(&data, &ops).unwrap();
//! let report = Report::new(&conf, harness.compare(&data, &ops));
//! assert_eq!(report.structures.len(), 3);
//! ```
#![warn(missing_docs)]

mod conf;
mod dataset;
mod error;
mod harness;
mod report;

pub use conf::BenchConf;
pub use dataset::{DatasetGenerator, OpKind, Operation, QueryMix, DEFAULT_SEED};
pub use error::Error;
pub use harness::{Harness, OpReport, StructureReport, TOLERANCE};
pub use report::Report;
