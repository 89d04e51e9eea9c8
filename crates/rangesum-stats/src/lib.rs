//! Latency sketches for profiling individual calls into a range structure.
//!
//! A [`Sketch`] collects nanosecond samples into a [DDSketch][1] and a [`Measure`] adds
//! the elapsed time of its own scope to a sketch when dropped.
//!
//! ```rust
//! use rangesum_stats::{profile_scope, Sketch};
//!
//! let sketch = Sketch::default();
//! {
//!     profile_scope!(&sketch);
//!     let _ = (0..100).sum::<u64>();
//! }
//! assert_eq!(sketch.percentiles().count, 1);
//! ```
//!
//! [1]: https://arxiv.org/abs/1908.10693
use core::cell::RefCell;
use minstant::Instant;
use sketches_ddsketch::{Config, DDSketch};
use std::rc::Rc;

/// Adds the time until the end of the current scope to the given [`Sketch`].
#[macro_export]
macro_rules! profile_scope {
    ($sketch:expr) => {
        let _measure = $crate::Measure::new($sketch);
    };
}

/// Summarizes a sketch, reporting zero for every percentile of an empty sketch.
pub fn sketch_percentiles(sketch: &DDSketch) -> Percentiles {
    let quantile = |q: f64| sketch.quantile(q).ok().flatten().unwrap_or(0.0);
    Percentiles {
        count: sketch.count(),
        min: sketch.min().unwrap_or(0.0),
        p50: quantile(0.5),
        p99: quantile(0.99),
        p99_9: quantile(0.999),
        max: sketch.max().unwrap_or(0.0),
    }
}

/// Latency percentiles in nanoseconds.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Default, Clone, Copy, PartialEq)]
pub struct Percentiles {
    /// Number of samples
    pub count: usize,
    /// Smallest sample
    pub min: f64,
    /// Median
    pub p50: f64,
    /// 99th percentile
    pub p99: f64,
    /// 99.9th percentile
    pub p99_9: f64,
    /// Largest sample
    pub max: f64,
}

impl std::fmt::Debug for Percentiles {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Percentiles")
            .field("count", &self.count)
            .field("min", &format_args!("{:.2}ns", self.min))
            .field("p50", &format_args!("{:.2}ns", self.p50))
            .field("p99", &format_args!("{:.2}ns", self.p99))
            .field("p99.9", &format_args!("{:.2}ns", self.p99_9))
            .field("max", &format_args!("{:.2}ns", self.max))
            .finish()
    }
}

/// A shared handle to a latency sketch.
///
/// The sketch keeps the exact sum of its samples, so the mean is exact while percentiles
/// are within the sketch's relative error. Cloning the handle shares the underlying sketch.
#[derive(Clone)]
pub struct Sketch {
    inner: Rc<RefCell<DDSketch>>,
}

impl Default for Sketch {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(DDSketch::new(Config::new(0.01, 2048, 1.0e-9)))),
        }
    }
}

impl Sketch {
    /// Records a sample in nanoseconds.
    #[inline]
    pub fn add(&self, data: f64) {
        self.inner.borrow_mut().add(data);
    }
    /// Number of recorded samples.
    pub fn count(&self) -> usize {
        self.inner.borrow().count()
    }
    /// Mean of the recorded samples in nanoseconds, `None` if nothing was recorded.
    pub fn mean(&self) -> Option<f64> {
        let sketch = self.inner.borrow();
        let count = sketch.count();
        sketch.sum().map(|sum| sum / count as f64)
    }
    /// Summarizes the recorded samples.
    pub fn percentiles(&self) -> Percentiles {
        sketch_percentiles(&self.inner.borrow())
    }
}

// Inspired by https://github.com/spacejam/sled/blob/main/src/metrics.rs
/// Records the time between its creation and its drop into a [`Sketch`].
pub struct Measure {
    start: Instant,
    sketch: Sketch,
}

impl Measure {
    /// Starts measuring.
    #[inline]
    pub fn new(sketch: &Sketch) -> Measure {
        Measure {
            sketch: sketch.clone(), // clones Rc
            start: Instant::now(),
        }
    }
}

impl Drop for Measure {
    #[inline]
    fn drop(&mut self) {
        self.sketch.add(self.start.elapsed().as_nanos() as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sketch() {
        let sketch = Sketch::default();
        assert_eq!(sketch.count(), 0);
        assert_eq!(sketch.mean(), None);
        assert_eq!(sketch.percentiles(), Percentiles::default());
    }

    #[test]
    fn mean_and_bounds() {
        let sketch = Sketch::default();
        for v in [100.0, 200.0, 300.0, 400.0] {
            sketch.add(v);
        }
        assert_eq!(sketch.count(), 4);
        assert_eq!(sketch.mean(), Some(250.0));
        let p = sketch.percentiles();
        assert_eq!(p.count, 4);
        assert_eq!(p.min, 100.0);
        assert_eq!(p.max, 400.0);
        assert!(p.p50 >= 100.0 && p.p50 <= 400.0);
    }

    #[test]
    fn measure_records_on_drop() {
        let sketch = Sketch::default();
        for _ in 0..3 {
            profile_scope!(&sketch);
        }
        assert_eq!(sketch.count(), 3);
    }

    #[test]
    fn mean_of_shared_handles() {
        let sketch = Sketch::default();
        let other = sketch.clone();
        sketch.add(0.0);
        other.add(30.0);
        other.add(60.0);
        assert_eq!(sketch.mean(), Some(30.0));
        assert_eq!(other.mean(), sketch.mean());
    }

    #[test]
    fn clones_share_samples() {
        let sketch = Sketch::default();
        let other = sketch.clone();
        other.add(10.0);
        assert_eq!(sketch.count(), 1);
    }
}
