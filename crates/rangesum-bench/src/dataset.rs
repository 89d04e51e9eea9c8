//! Generation of initial sequences and operation traces.

use serde::Serialize;

/// Seed used when none is given, so that runs are reproducible by default.
pub const DEFAULT_SEED: u64 = 42;

/// Which operations a generated trace contains.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum QueryMix {
    /// Point updates and range queries
    PointOnly,
    /// Range updates and range queries
    RangeOnly,
    /// Point updates, range updates and range queries
    #[default]
    Mixed,
}

impl QueryMix {
    /// The operation kinds drawn from, each with equal probability.
    pub fn kinds(&self) -> &'static [OpKind] {
        match self {
            QueryMix::PointOnly => &[OpKind::PointUpdate, OpKind::RangeQuery],
            QueryMix::RangeOnly => &[OpKind::RangeUpdate, OpKind::RangeQuery],
            QueryMix::Mixed => &[OpKind::PointUpdate, OpKind::RangeUpdate, OpKind::RangeQuery],
        }
    }
}

/// The kind of an [`Operation`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    /// Set a single element
    PointUpdate,
    /// Add a value to an interval
    RangeUpdate,
    /// Sum an interval
    RangeQuery,
}

impl OpKind {
    /// All kinds in reporting order.
    pub const ALL: [OpKind; 3] = [OpKind::PointUpdate, OpKind::RangeQuery, OpKind::RangeUpdate];

    /// Snake case name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::PointUpdate => "point_update",
            OpKind::RangeUpdate => "range_update",
            OpKind::RangeQuery => "range_query",
        }
    }
}

/// A single record of an operation trace.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub enum Operation {
    /// Set the element at `index` to `value`
    PointUpdate {
        /// Position of the element
        index: isize,
        /// The new value
        value: f64,
    },
    /// Add `value` to every element in `[l, r]`
    RangeUpdate {
        /// First position, inclusive
        l: isize,
        /// Last position, inclusive
        r: isize,
        /// Increment added to every element
        value: f64,
    },
    /// Sum the elements in `[l, r]`
    RangeQuery {
        /// First position, inclusive
        l: isize,
        /// Last position, inclusive
        r: isize,
    },
}

impl Operation {
    /// Returns the kind of this operation.
    pub fn kind(&self) -> OpKind {
        match self {
            Operation::PointUpdate { .. } => OpKind::PointUpdate,
            Operation::RangeUpdate { .. } => OpKind::RangeUpdate,
            Operation::RangeQuery { .. } => OpKind::RangeQuery,
        }
    }
}

/// Seeded generator of datasets and operation traces.
pub struct DatasetGenerator {
    rng: fastrand::Rng,
}

impl Default for DatasetGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl DatasetGenerator {
    /// Creates a generator whose output is fully determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Generates `size` values drawn uniformly from `[min, max)`.
    pub fn uniform(&mut self, size: usize, min: f64, max: f64) -> Vec<f64> {
        (0..size)
            .map(|_| min + (max - min) * self.rng.f64())
            .collect()
    }

    /// Generates `size` values drawn uniformly from `[0, 1000)`.
    pub fn uniform_default(&mut self, size: usize) -> Vec<f64> {
        self.uniform(size, 0.0, 1000.0)
    }

    /// Generates `count` operations over an array of `array_size` elements.
    ///
    /// Every interval is normalized so that `l <= r`. Point updates draw new values from
    /// `[0, 1000)` and range updates add a value from `[-100, 100)`. An empty array yields
    /// an empty trace.
    pub fn queries(&mut self, array_size: usize, count: usize, mix: QueryMix) -> Vec<Operation> {
        if array_size == 0 {
            return Vec::new();
        }
        let kinds = mix.kinds();
        (0..count)
            .map(|_| match kinds[self.rng.usize(..kinds.len())] {
                OpKind::RangeQuery => {
                    let (l, r) = self.interval(array_size);
                    Operation::RangeQuery { l, r }
                }
                OpKind::PointUpdate => Operation::PointUpdate {
                    index: self.rng.usize(..array_size) as isize,
                    value: self.rng.f64() * 1000.0,
                },
                OpKind::RangeUpdate => {
                    let (l, r) = self.interval(array_size);
                    Operation::RangeUpdate {
                        l,
                        r,
                        value: self.rng.f64() * 200.0 - 100.0,
                    }
                }
            })
            .collect()
    }

    fn interval(&mut self, array_size: usize) -> (isize, isize) {
        let a = self.rng.usize(..array_size);
        let b = self.rng.usize(..array_size);
        (a.min(b) as isize, a.max(b) as isize)
    }
}
