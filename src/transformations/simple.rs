//! Stateless elementary transforms.
//!
//! A single family that needs no corpus pass: every observation method is a
//! no-op and the configured value is simultaneously its own accumulator and
//! its own fitted transform. Operations:
//!
//! | Operation | Behavior |
//! |-----------|----------|
//! | `exp` / `log` | `e^x` / `ln(x)` |
//! | `add` / `sub` / `mul` / `div` | Apply the constant operand |
//! | `binarise` | 0.0 below [`EPSILON`], else 1.0 |
//! | `threshold` | Clamp into `[min, max]` |

use serde::{Deserialize, Serialize};

use crate::error::TransformError;
use crate::params::TransformerParams;
use crate::traits::{TransformStatistics, Transformation, Transformer};

/// Epsilon for determining when two double values are the same.
pub const EPSILON: f64 = 1e-12;

/// Operations understood by [`SimpleTransform`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Exponentiates the input.
    Exp,
    /// Natural logarithm of the input.
    Log,
    /// Adds the operand.
    Add(f64),
    /// Subtracts the operand.
    Sub(f64),
    /// Multiplies by the operand.
    Mul(f64),
    /// Divides by the operand.
    Div(f64),
    /// Binarises the input around [`EPSILON`].
    Binarise,
    /// Clamps the input into `[min, max]`.
    Threshold { min: f64, max: f64 },
}

/// A stateless transform which requires no fitting.
///
/// Implements [`Transformation`], [`TransformStatistics`] and [`Transformer`]
/// at once: `create_stats` and `generate_transformer` both hand back the
/// configured operation unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimpleTransform {
    op: Operation,
}

impl SimpleTransform {
    /// Construct from an operation, validating its operands.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidParameter`] for a NaN operand, or a
    /// threshold range with `min > max` or a NaN endpoint.
    pub fn new(op: Operation) -> Result<Self, TransformError> {
        match op {
            Operation::Exp | Operation::Log | Operation::Binarise => {}
            Operation::Add(operand)
            | Operation::Sub(operand)
            | Operation::Mul(operand)
            | Operation::Div(operand) => {
                if operand.is_nan() {
                    return Err(TransformError::InvalidParameter(
                        "operand must not be NaN".to_string(),
                    ));
                }
            }
            Operation::Threshold { min, max } => {
                if min.is_nan() || max.is_nan() {
                    return Err(TransformError::InvalidParameter(
                        "min and max must not be NaN".to_string(),
                    ));
                }
                if min > max {
                    return Err(TransformError::InvalidParameter(format!(
                        "Min must not be greater than max, min = {}, max = {}",
                        min, max
                    )));
                }
            }
        }
        Ok(Self { op })
    }

    /// The exponential function.
    pub fn exp() -> Self {
        Self { op: Operation::Exp }
    }

    /// The natural logarithm.
    pub fn log() -> Self {
        Self { op: Operation::Log }
    }

    /// Add the supplied constant.
    pub fn add(operand: f64) -> Result<Self, TransformError> {
        Self::new(Operation::Add(operand))
    }

    /// Subtract the supplied constant.
    pub fn sub(operand: f64) -> Result<Self, TransformError> {
        Self::new(Operation::Sub(operand))
    }

    /// Multiply by the supplied constant.
    pub fn mul(operand: f64) -> Result<Self, TransformError> {
        Self::new(Operation::Mul(operand))
    }

    /// Divide by the supplied constant.
    pub fn div(operand: f64) -> Result<Self, TransformError> {
        Self::new(Operation::Div(operand))
    }

    /// Binarise around [`EPSILON`]: inputs below it map to 0.0, everything
    /// else to 1.0. Note this zeroes values in `[0, EPSILON)` too; it is a
    /// near-zero tolerance, not a strict sign test.
    pub fn binarise() -> Self {
        Self {
            op: Operation::Binarise,
        }
    }

    /// Clamp inputs into `[min, max]`.
    ///
    /// To leave one side unbounded, pass `f64::NEG_INFINITY` or
    /// `f64::INFINITY`.
    pub fn threshold(min: f64, max: f64) -> Result<Self, TransformError> {
        Self::new(Operation::Threshold { min, max })
    }

    /// The configured operation.
    pub fn operation(&self) -> Operation {
        self.op
    }
}

impl Transformation for SimpleTransform {
    fn create_stats(&self) -> Box<dyn TransformStatistics> {
        Box::new(*self)
    }
}

impl TransformStatistics for SimpleTransform {
    /// No-op: nothing is learned from the data.
    fn observe_value(&mut self, _value: f64) {}

    /// No-op: nothing is learned from the data.
    fn observe_sparse(&mut self, _count: u64) {}

    fn generate_transformer(&self) -> Result<Box<dyn Transformer>, TransformError> {
        Ok(Box::new(*self))
    }
}

impl Transformer for SimpleTransform {
    fn transform(&self, input: f64) -> f64 {
        match self.op {
            Operation::Exp => input.exp(),
            Operation::Log => input.ln(),
            Operation::Add(operand) => input + operand,
            Operation::Sub(operand) => input - operand,
            Operation::Mul(operand) => input * operand,
            Operation::Div(operand) => input / operand,
            Operation::Binarise => {
                if input < EPSILON {
                    0.0
                } else {
                    1.0
                }
            }
            Operation::Threshold { min, max } => {
                if input < min {
                    min
                } else if input > max {
                    max
                } else {
                    input
                }
            }
        }
    }

    fn extract_params(&self) -> TransformerParams {
        TransformerParams::Simple { op: self.op }
    }
}
