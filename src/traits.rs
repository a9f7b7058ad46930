//! Core traits for online statistics and fitted transforms.
//!
//! This module defines the three central traits:
//! - [`Transformation`]: Configured but unfitted; validates hyperparameters and
//!   constructs the accumulator for one fitting pass.
//! - [`TransformStatistics`]: The mutable accumulator fed once per observed value.
//! - [`Transformer`]: After freezing; a pure `f64 -> f64` function over frozen
//!   parameters, ready for inference and serialization.

use std::fmt::Debug;

use crate::error::TransformError;
use crate::params::TransformerParams;

/// A configured transformation, ready to fit feature columns.
///
/// A `Transformation` carries only hyperparameters (bin counts, target ranges).
/// Family-specific preconditions are checked when the value is constructed, so
/// `create_stats` cannot fail.
///
/// # Example
/// ```ignore
/// use featurestats_rs::transformations::BinningTransformation;
/// use featurestats_rs::traits::Transformation;
///
/// let binning = BinningTransformation::equal_width(5)?;
/// let mut stats = binning.create_stats();
/// ```
pub trait Transformation {
    /// Construct a fresh accumulator for a single feature column.
    ///
    /// Each call returns an independent accumulator; multiple columns may be
    /// fitted concurrently by giving each its own instance.
    fn create_stats(&self) -> Box<dyn TransformStatistics>;
}

/// Mutable sufficient statistics for one feature column during a fitting pass.
///
/// The accumulator is single-threaded: each instance belongs to exactly one
/// logical pass over one column. It is conventionally discarded after the
/// first call to [`generate_transformer`](TransformStatistics::generate_transformer).
pub trait TransformStatistics {
    /// Observe a single explicit feature value.
    fn observe_value(&mut self, value: f64);

    /// Observe `count` implicit zeros from a sparse representation.
    ///
    /// Families differ in how they account for implicit zeros; see the
    /// individual transformations for their exact semantics.
    fn observe_sparse(&mut self, count: u64);

    /// Observe a single implicit zero. Equivalent to `observe_sparse(1)`.
    ///
    /// Retained for callers that discover sparsity one example at a time;
    /// prefer the counted form.
    fn observe_sparse_once(&mut self) {
        self.observe_sparse(1);
    }

    /// Freeze the current statistics into an immutable transformer.
    ///
    /// May be called more than once; each call recomputes the transformer from
    /// the current state, so repeated freezes of an unmodified accumulator
    /// produce equivalent transformers.
    ///
    /// # Errors
    /// Returns [`TransformError`] if the observed data cannot support the
    /// configured transform (e.g. equal-frequency binning with more bins than
    /// observed values), or if the frozen parameters fail validation.
    fn generate_transformer(&self) -> Result<Box<dyn Transformer>, TransformError>;
}

/// An immutable, fitted transform.
///
/// Holds only frozen numeric parameters and applies a pure total function over
/// the real line. Implementations must not panic for any finite input, though
/// outputs may be non-finite for degenerate fits (zero variance, zero document
/// frequency). Transformers are `Send + Sync` and may be shared read-only
/// across threads without synchronization.
pub trait Transformer: Debug + Send + Sync {
    /// Apply the transform to a single value.
    fn transform(&self, input: f64) -> f64;

    /// Extract the frozen numeric parameters for persistence.
    ///
    /// [`TransformerParams::into_transformer`] reconstructs a bit-identical
    /// transformer from the extracted parameters.
    fn extract_params(&self) -> TransformerParams;
}
