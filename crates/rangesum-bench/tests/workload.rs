use pretty_assertions::assert_eq;
use rangesum_bench::{BenchConf, DatasetGenerator, Harness, OpKind, Operation, QueryMix};

fn workload(conf: &BenchConf) -> (Vec<f64>, Vec<Operation>) {
    let mut generator = DatasetGenerator::new(conf.seed());
    let (min, max) = conf.value_range();
    let data = generator.uniform(conf.size(), min, max);
    let ops = generator.queries(conf.size(), conf.queries(), conf.mix());
    (data, ops)
}

#[test]
fn reproducible_workload() {
    let conf = BenchConf::default().with_size(500).with_queries(300);
    assert_eq!(workload(&conf), workload(&conf));
    let other = workload(&conf.with_seed(7));
    assert!(other != workload(&conf));
}

#[test]
fn verify_every_mix() {
    for mix in [QueryMix::PointOnly, QueryMix::RangeOnly, QueryMix::Mixed] {
        let conf = BenchConf::default()
            .with_size(1000)
            .with_queries(2000)
            .with_mix(mix);
        let (data, ops) = workload(&conf);
        Harness::new(conf).verify(&data, &ops).unwrap();
    }
}

#[test]
fn operation_counts_add_up() {
    let conf = BenchConf::default().with_size(200).with_queries(600);
    let (data, ops) = workload(&conf);
    let reports = Harness::new(conf).compare(&data, &ops);

    for report in &reports {
        let total: usize = report.operations.iter().map(|op| op.count).sum();
        assert_eq!(total, 600);
    }

    let applicable: Vec<(&str, bool)> = reports
        .iter()
        .map(|r| {
            let op = r.op(OpKind::RangeUpdate).unwrap();
            (r.name.as_str(), op.applicable)
        })
        .collect();
    assert_eq!(
        applicable,
        vec![
            ("SegmentTree", true),
            ("FenwickTree", false),
            ("RangeOptimizedBIT", true),
        ]
    );
}

#[test]
fn empty_workload() {
    let conf = BenchConf::default().with_size(0).with_queries(0);
    assert!(conf.validate().is_ok());
    let (data, ops) = workload(&conf);
    let harness = Harness::new(conf);
    harness.verify(&data, &ops).unwrap();
    let reports = harness.compare(&data, &ops);
    let memory: Vec<usize> = reports.iter().map(|r| r.memory_bytes).collect();
    assert_eq!(memory, vec![0, 8, 16]);
}
