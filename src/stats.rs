//! Online mean/variance accumulation.
//!
//! Implements Welford's single-pass algorithm for the running mean and the
//! sum of squared deviations ("M2"):
//! ```text
//! count += 1
//! delta  = x - mean
//! mean  += delta / count
//! delta2 = x - mean
//! M2    += delta * delta2
//! ```
//! Naive single-pass formulas (`E[X^2] - E[X]^2`) lose precision
//! catastrophically for streams with large means and small variances; the
//! incremental form bounds the error growth, which is why every
//! variance-dependent transform in this crate is built on it.

/// Online accumulator for count, mean, variance and extrema of a value stream.
///
/// The empty accumulator is a sentinel state: count 0, mean 0, M2 0,
/// min +inf, max -inf. Variance uses the `count - 1` denominator, so querying
/// it below two observations yields a NaN or signed-zero result rather than
/// an error.
///
/// # Example
/// ```
/// use featurestats_rs::stats::MeanVarianceAccumulator;
///
/// let mut acc = MeanVarianceAccumulator::new();
/// acc.observe_all(&[1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert!((acc.mean() - 3.0).abs() < 1e-12);
/// assert!((acc.variance() - 2.5).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MeanVarianceAccumulator {
    count: u64,
    mean: f64,
    sum_squares: f64,
    min: f64,
    max: f64,
}

impl Default for MeanVarianceAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl MeanVarianceAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            sum_squares: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Observe a single value.
    pub fn observe(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.sum_squares += delta * delta2;
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Observe every value in the slice, in order.
    ///
    /// The final mean and M2 do not depend on the order up to floating-point
    /// rounding.
    pub fn observe_all(&mut self, values: &[f64]) {
        for &value in values {
            self.observe(value);
        }
    }

    /// Observe `count` implicit zeros as a single aggregate update.
    ///
    /// This is the closed-form batch update used when fitting sparse feature
    /// columns, and reproduces the original update rule exactly so fitted
    /// parameters stay comparable across implementations.
    pub fn observe_sparse(&mut self, count: u64) {
        if count == 0 {
            return;
        }
        self.count += count;
        let delta = -self.mean;
        self.mean += delta;
        let delta2 = -self.mean;
        self.sum_squares += count as f64 * (delta * delta2);
        if 0.0 < self.min {
            self.min = 0.0;
        }
        if 0.0 > self.max {
            self.max = 0.0;
        }
    }

    /// The number of observed values.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The running mean. Zero when nothing has been observed.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// The running sum of squared deviations from the mean.
    pub fn sum_squares(&self) -> f64 {
        self.sum_squares
    }

    /// The sample variance, using the Bessel-corrected `count - 1` denominator.
    ///
    /// Below two observations the division is still performed; the result is
    /// NaN at one observation and a signed zero at none.
    pub fn variance(&self) -> f64 {
        self.sum_squares / (self.count as f64 - 1.0)
    }

    /// The sample standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// The smallest observed value, or +inf if nothing has been observed.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// The largest observed value, or -inf if nothing has been observed.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Restore the empty sentinel state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
