//! Linear scaling transformation.
//!
//! Takes an observed distribution and rescales it so all values lie between
//! the desired min and max:
//! ```text
//! output = (input - observed_min) * scale + target_min
//! scale  = (target_max - target_min) / (observed_max - observed_min)
//! ```
//! Values outside the observed range are clamped to the target min or max.
//! When the observed range has zero width the transform is constant,
//! returning `(target_max - target_min) / 2` for every input.

use serde::{Deserialize, Serialize};

use crate::error::TransformError;
use crate::params::TransformerParams;
use crate::traits::{TransformStatistics, Transformation, Transformer};

/// A transformation which rescales the observed range onto a target range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearScalingTransformation {
    target_min: f64,
    target_max: f64,
}

impl Default for LinearScalingTransformation {
    /// Defaults to the range zero to one.
    fn default() -> Self {
        Self {
            target_min: 0.0,
            target_max: 1.0,
        }
    }
}

impl LinearScalingTransformation {
    /// Construct a linear scaling onto `[target_min, target_max]`.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidParameter`] if `target_max < target_min`.
    pub fn new(target_min: f64, target_max: f64) -> Result<Self, TransformError> {
        if target_max < target_min {
            return Err(TransformError::InvalidParameter(format!(
                "Range must be positive, min = {}, max = {}",
                target_min, target_max
            )));
        }
        Ok(Self {
            target_min,
            target_max,
        })
    }
}

impl Transformation for LinearScalingTransformation {
    fn create_stats(&self) -> Box<dyn TransformStatistics> {
        Box::new(LinearScalingStats {
            target_min: self.target_min,
            target_max: self.target_max,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        })
    }
}

/// Accumulator for linear scaling: tracks the observed min and max.
#[derive(Clone, Debug)]
struct LinearScalingStats {
    target_min: f64,
    target_max: f64,
    min: f64,
    max: f64,
}

impl TransformStatistics for LinearScalingStats {
    fn observe_value(&mut self, value: f64) {
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    fn observe_sparse(&mut self, _count: u64) {
        // Only the extrema matter here, so many implicit zeros are the same
        // as a single observed 0.0.
        self.observe_value(0.0);
    }

    fn generate_transformer(&self) -> Result<Box<dyn Transformer>, TransformError> {
        Ok(Box::new(LinearScalingTransformer::new(
            self.min,
            self.max,
            self.target_min,
            self.target_max,
        )?))
    }
}

/// A fitted linear scaling transform.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearScalingTransformer {
    observed_min: f64,
    observed_max: f64,
    target_min: f64,
    target_max: f64,
    scale: f64,
    constant: bool,
}

impl LinearScalingTransformer {
    /// Construct a linear scaling transform from frozen range parameters.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidParameter`] if either range is inverted.
    pub fn new(
        observed_min: f64,
        observed_max: f64,
        target_min: f64,
        target_max: f64,
    ) -> Result<Self, TransformError> {
        if observed_min > observed_max || target_min > target_max {
            return Err(TransformError::InvalidParameter(format!(
                "observed range [{}, {}] and target range [{}, {}] must both be ordered",
                observed_min, observed_max, target_min, target_max
            )));
        }
        let observed_range = observed_max - observed_min;
        let target_range = target_max - target_min;
        Ok(Self {
            observed_min,
            observed_max,
            target_min,
            target_max,
            scale: target_range / observed_range,
            constant: observed_range == 0.0,
        })
    }
}

impl Transformer for LinearScalingTransformer {
    fn transform(&self, input: f64) -> f64 {
        if self.constant {
            (self.target_max - self.target_min) / 2.0
        } else if input < self.observed_min {
            // Outside the observed range: clamp to the target min or max.
            self.target_min
        } else if input > self.observed_max {
            self.target_max
        } else {
            (input - self.observed_min) * self.scale + self.target_min
        }
    }

    fn extract_params(&self) -> TransformerParams {
        TransformerParams::LinearScaling {
            observed_min: self.observed_min,
            observed_max: self.observed_max,
            target_min: self.target_min,
            target_max: self.target_max,
        }
    }
}
