//! Mean and standard deviation normalization.
//!
//! Takes an observed distribution and rescales it so it has the desired mean
//! and standard deviation:
//! ```text
//! output = ((input - observed_mean) / observed_std_dev) * target_std_dev + target_mean
//! ```
//! The observed mean and variance are accumulated with Welford's algorithm
//! (see [`crate::stats::MeanVarianceAccumulator`]). A zero observed standard
//! deviation is not special-cased: the division is still performed and yields
//! NaN or infinity, which propagates to the caller.

use serde::{Deserialize, Serialize};

use crate::error::TransformError;
use crate::params::TransformerParams;
use crate::stats::MeanVarianceAccumulator;
use crate::traits::{TransformStatistics, Transformation, Transformer};

/// A transformation which rescales to a target mean and standard deviation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeanStdDevTransformation {
    target_mean: f64,
    target_std_dev: f64,
}

impl Default for MeanStdDevTransformation {
    /// Defaults to zero mean and unit standard deviation.
    fn default() -> Self {
        Self {
            target_mean: 0.0,
            target_std_dev: 1.0,
        }
    }
}

impl MeanStdDevTransformation {
    /// Construct a normalization onto the given mean and standard deviation.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidParameter`] if the target standard
    /// deviation is negative or NaN.
    pub fn new(target_mean: f64, target_std_dev: f64) -> Result<Self, TransformError> {
        if !(target_std_dev >= 0.0) {
            return Err(TransformError::InvalidParameter(format!(
                "Target standard deviation must be non-negative, found {}",
                target_std_dev
            )));
        }
        Ok(Self {
            target_mean,
            target_std_dev,
        })
    }
}

impl Transformation for MeanStdDevTransformation {
    fn create_stats(&self) -> Box<dyn TransformStatistics> {
        Box::new(MeanStdDevStats {
            target_mean: self.target_mean,
            target_std_dev: self.target_std_dev,
            acc: MeanVarianceAccumulator::new(),
        })
    }
}

/// Accumulator for mean/std-dev normalization: the Welford engine by composition.
#[derive(Clone, Debug)]
struct MeanStdDevStats {
    target_mean: f64,
    target_std_dev: f64,
    acc: MeanVarianceAccumulator,
}

impl TransformStatistics for MeanStdDevStats {
    fn observe_value(&mut self, value: f64) {
        self.acc.observe(value);
    }

    fn observe_sparse(&mut self, count: u64) {
        self.acc.observe_sparse(count);
    }

    fn generate_transformer(&self) -> Result<Box<dyn Transformer>, TransformError> {
        if self.acc.sum_squares() == 0.0 {
            log::info!(
                "Only observed a single value ({}) when fitting a mean/std-dev normalization",
                self.acc.mean()
            );
        }
        Ok(Box::new(MeanStdDevTransformer::new(
            self.acc.mean(),
            self.acc.std_dev(),
            self.target_mean,
            self.target_std_dev,
        )?))
    }
}

/// A fitted mean/std-dev normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct MeanStdDevTransformer {
    observed_mean: f64,
    observed_std_dev: f64,
    target_mean: f64,
    target_std_dev: f64,
}

impl MeanStdDevTransformer {
    /// Construct a normalization transform from frozen parameters.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidParameter`] if either standard
    /// deviation is negative. NaN standard deviations pass the comparison and
    /// produce a transform with non-finite outputs.
    pub fn new(
        observed_mean: f64,
        observed_std_dev: f64,
        target_mean: f64,
        target_std_dev: f64,
    ) -> Result<Self, TransformError> {
        if observed_std_dev < 0.0 || target_std_dev < 0.0 {
            return Err(TransformError::InvalidParameter(format!(
                "Standard deviations must be non-negative, observed = {}, target = {}",
                observed_std_dev, target_std_dev
            )));
        }
        Ok(Self {
            observed_mean,
            observed_std_dev,
            target_mean,
            target_std_dev,
        })
    }
}

impl Transformer for MeanStdDevTransformer {
    fn transform(&self, input: f64) -> f64 {
        ((input - self.observed_mean) / self.observed_std_dev) * self.target_std_dev
            + self.target_mean
    }

    fn extract_params(&self) -> TransformerParams {
        TransformerParams::MeanStdDev {
            observed_mean: self.observed_mean,
            observed_std_dev: self.observed_std_dev,
            target_mean: self.target_mean,
            target_std_dev: self.target_std_dev,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(transformation: &MeanStdDevTransformation, column: &[f64]) -> Box<dyn Transformer> {
        let mut stats = transformation.create_stats();
        for &v in column {
            stats.observe_value(v);
        }
        stats.generate_transformer().unwrap()
    }

    #[test]
    fn test_rejects_bad_target_std_dev() {
        assert!(MeanStdDevTransformation::new(0.0, -1.0).is_err());
        assert!(MeanStdDevTransformation::new(0.0, f64::NAN).is_err());
        assert!(MeanStdDevTransformation::new(0.0, 0.0).is_ok());
        assert!(MeanStdDevTransformation::new(3.0, 2.0).is_ok());
    }

    #[test]
    fn test_standardizes_known_column() {
        let transformation = MeanStdDevTransformation::default();
        let transformer = fit(&transformation, &[1.0, 2.0, 3.0, 4.0, 5.0]);

        // mean = 3, sample std dev = sqrt(2.5) ~ 1.5811.
        assert!(transformer.transform(3.0).abs() < 1e-4);
        assert!((transformer.transform(1.0) - (-1.2649)).abs() < 1e-4);
        assert!((transformer.transform(5.0) - 1.2649).abs() < 1e-4);
    }

    #[test]
    fn test_nonzero_target() {
        let transformation = MeanStdDevTransformation::new(10.0, 2.0).unwrap();
        let transformer = fit(&transformation, &[1.0, 2.0, 3.0, 4.0, 5.0]);

        assert!((transformer.transform(3.0) - 10.0).abs() < 1e-9);
        let spread = (2.5f64).sqrt();
        assert!((transformer.transform(3.0 + spread) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_variance_propagates_nan() {
        let transformation = MeanStdDevTransformation::default();
        let transformer = fit(&transformation, &[7.0, 7.0, 7.0]);

        // Observed std dev is exactly zero; the division is still attempted.
        assert!(transformer.transform(7.0).is_nan());
        assert!(transformer.transform(8.0).is_infinite());
    }

    #[test]
    fn test_sparse_matches_dense_zeros_for_zero_mean() {
        let transformation = MeanStdDevTransformation::default();

        let mut sparse = transformation.create_stats();
        sparse.observe_value(-2.0);
        sparse.observe_value(2.0);
        sparse.observe_sparse(2);
        let from_sparse = sparse.generate_transformer().unwrap();

        let from_dense = fit(&transformation, &[-2.0, 2.0, 0.0, 0.0]);

        for i in -40..=40 {
            let input = i as f64 * 0.25;
            assert_eq!(from_sparse.transform(input), from_dense.transform(input));
        }
    }

    #[test]
    fn test_sparse_update_reflected_in_fitted_parameters() {
        let transformation = MeanStdDevTransformation::default();
        let mut stats = transformation.create_stats();
        stats.observe_value(1.0);
        stats.observe_value(3.0);
        stats.observe_sparse(2);
        let transformer = stats.generate_transformer().unwrap();

        // Aggregate zero update on a nonzero-mean stream: the frozen mean is
        // exactly 0.0 and the spread still comes from the two dense values
        // (M2 = 2 over count - 1 = 3).
        let expected_std_dev = (2.0f64 / 3.0).sqrt();
        match transformer.extract_params() {
            TransformerParams::MeanStdDev {
                observed_mean,
                observed_std_dev,
                ..
            } => {
                assert_eq!(observed_mean, 0.0);
                assert_eq!(observed_std_dev, expected_std_dev);
            }
            other => panic!("unexpected params: {:?}", other),
        }
        assert_eq!(transformer.transform(0.0), 0.0);
        assert!((transformer.transform(expected_std_dev) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_freeze_is_idempotent() {
        let transformation = MeanStdDevTransformation::default();
        let mut stats = transformation.create_stats();
        for v in [2.0, 4.0, 9.0] {
            stats.observe_value(v);
        }

        let first = stats.generate_transformer().unwrap();
        let second = stats.generate_transformer().unwrap();
        for i in 0..=100 {
            let input = i as f64 * 0.1;
            assert_eq!(first.transform(input), second.transform(input));
        }
    }

    #[test]
    fn test_transformer_rejects_negative_observed_std_dev() {
        assert!(MeanStdDevTransformer::new(0.0, -2.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_params_round_trip() {
        let transformer = MeanStdDevTransformer::new(3.0, 1.5, 0.0, 1.0).unwrap();
        let restored = transformer.extract_params().into_transformer().unwrap();
        for i in -20..=20 {
            let input = i as f64 * 0.5;
            assert_eq!(transformer.transform(input), restored.transform(input));
        }
    }
}
