use std::path::PathBuf;

use clap::Parser;
use log::info;
use rangesum_bench::{BenchConf, DatasetGenerator, Error, Harness, QueryMix, Report, DEFAULT_SEED};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of elements in the initial sequence
    #[clap(short, long, value_parser, default_value_t = 10000)]
    size: usize,
    /// Number of operations to replay
    #[clap(short, long, value_parser, default_value_t = 1000)]
    queries: usize,
    #[clap(short, long, value_enum, default_value_t = QueryMix::Mixed)]
    mix: QueryMix,
    #[clap(long, value_parser, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Also benchmark the naive O(n log n) constructions
    #[clap(long, action)]
    naive: bool,
    /// Cross-check the structures on the trace before benchmarking
    #[clap(long, action)]
    verify: bool,
    /// Print the asymptotic characteristics of every structure
    #[clap(long, action)]
    summary: bool,
    /// Write the report as JSON to this path
    #[clap(short, long, value_parser)]
    output: Option<PathBuf>,
}

impl From<&Args> for BenchConf {
    fn from(args: &Args) -> Self {
        BenchConf::default()
            .with_size(args.size)
            .with_queries(args.queries)
            .with_mix(args.mix)
            .with_seed(args.seed)
            .with_naive_baseline(args.naive)
            .with_verify(args.verify)
    }
}

fn main() -> Result<(), Error> {
    // Log to stdout (if you run with `RUST_LOG=debug`).
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    println!("Running with {:#?}", args);

    let conf = BenchConf::from(&args);
    conf.validate()?;

    let mut generator = DatasetGenerator::new(conf.seed());
    let (min, max) = conf.value_range();
    let data = generator.uniform(conf.size(), min, max);
    let ops = generator.queries(conf.size(), conf.queries(), conf.mix());
    info!("generated {} elements and {} operations", data.len(), ops.len());

    let harness = Harness::new(conf);
    if conf.verify() {
        harness.verify(&data, &ops)?;
        println!("Verification passed for {} operations", ops.len());
    }

    let report = Report::new(&conf, harness.compare(&data, &ops));
    report.print();

    if args.summary {
        report.print_summary();
    }

    if let Some(path) = &args.output {
        report.write_json(path)?;
        info!("wrote report to {}", path.display());
    }

    Ok(())
}
