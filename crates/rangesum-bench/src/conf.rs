use crate::{
    dataset::{QueryMix, DEFAULT_SEED},
    Error,
};
use serde::Serialize;

/// [`Harness`](crate::Harness) Configuration
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BenchConf {
    /// Number of elements in the initial sequence
    size: usize,
    /// Number of operations in the trace
    queries: usize,
    /// Which operations the trace contains
    mix: QueryMix,
    /// Seed of the dataset generator
    seed: u64,
    /// Lower bound of the generated values
    min_value: f64,
    /// Upper bound (exclusive) of the generated values
    max_value: f64,
    /// Also benchmark the naive constructions
    naive_baseline: bool,
    /// Replay the trace and cross-check the structures before benchmarking
    verify: bool,
}

impl Default for BenchConf {
    fn default() -> Self {
        Self {
            size: 10_000,
            queries: 1000,
            mix: QueryMix::Mixed,
            seed: DEFAULT_SEED,
            min_value: 0.0,
            max_value: 1000.0,
            naive_baseline: false,
            verify: false,
        }
    }
}

impl BenchConf {
    /// Configures the number of elements
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }
    /// Configures the number of operations
    pub fn with_queries(mut self, queries: usize) -> Self {
        self.queries = queries;
        self
    }
    /// Configures the operation mix
    pub fn with_mix(mut self, mix: QueryMix) -> Self {
        self.mix = mix;
        self
    }
    /// Configures the generator seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
    /// Configures the value range of the initial sequence
    pub fn with_value_range(mut self, min: f64, max: f64) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }
    /// Configures whether naive constructions are benchmarked as well
    pub fn with_naive_baseline(mut self, naive_baseline: bool) -> Self {
        self.naive_baseline = naive_baseline;
        self
    }
    /// Configures whether the trace is verified before benchmarking
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Returns the number of elements
    pub fn size(&self) -> usize {
        self.size
    }
    /// Returns the number of operations
    pub fn queries(&self) -> usize {
        self.queries
    }
    /// Returns the operation mix
    pub fn mix(&self) -> QueryMix {
        self.mix
    }
    /// Returns the generator seed
    pub fn seed(&self) -> u64 {
        self.seed
    }
    /// Returns the `[min, max)` range of generated values
    pub fn value_range(&self) -> (f64, f64) {
        (self.min_value, self.max_value)
    }
    /// Returns whether naive constructions are benchmarked
    pub fn naive_baseline(&self) -> bool {
        self.naive_baseline
    }
    /// Returns whether the trace is verified before benchmarking
    pub fn verify(&self) -> bool {
        self.verify
    }

    /// Checks that a workload can be generated from this configuration.
    pub fn validate(&self) -> Result<(), Error> {
        if self.size == 0 && self.queries > 0 {
            return Err(Error::InvalidConf {
                reason: "cannot generate operations over an empty sequence".to_string(),
            });
        }
        if !(self.min_value.is_finite() && self.max_value.is_finite()) {
            return Err(Error::InvalidConf {
                reason: "value range must be finite".to_string(),
            });
        }
        if self.min_value >= self.max_value {
            return Err(Error::InvalidConf {
                reason: format!(
                    "empty value range [{}, {})",
                    self.min_value, self.max_value
                ),
            });
        }
        Ok(())
    }
}
