//! # featurestats-rs
//!
//! Streaming feature statistics and transform fitting for machine learning
//! pipelines: a family of online (single-pass) numeric accumulators that
//! observe a stream of feature values and freeze into a stateless transform
//! applied identically during training and inference.
//!
//! ## Core Design Principles
//!
//! - **Fit/apply separation**: accumulators are mutable and write-once; the
//!   frozen [`Transformer`](traits::Transformer) holds only the numeric
//!   parameters it needs and is immutable, `Send + Sync`, and pure.
//! - **Numerical stability**: every variance-dependent family is built on
//!   Welford's online algorithm ([`stats::MeanVarianceAccumulator`]) rather
//!   than the naive single-pass formulas.
//! - **Fail fast on configuration**: bin counts, target ranges and operands
//!   are validated when a transformation is constructed, before any data is
//!   observed. Numerical degeneracy at fit time (zero variance, zero document
//!   frequency) is deliberately not an error; it propagates as IEEE special
//!   values.
//! - **Serializable**: frozen parameters round-trip bit-identically through
//!   [`params::TransformerParams`].
//!
//! ## Quick Start
//!
//! ```rust
//! use featurestats_rs::traits::{Transformation, TransformStatistics};
//! use featurestats_rs::transformations::BinningTransformation;
//!
//! # fn main() -> Result<(), featurestats_rs::error::TransformError> {
//! // One accumulator per feature column.
//! let binning = BinningTransformation::equal_width(4)?;
//! let mut stats = binning.create_stats();
//! for value in [0.0, 1.0, 2.0, 3.0, 4.0] {
//!     stats.observe_value(value);
//! }
//!
//! // Freeze into an immutable transform, applied per value thereafter.
//! let transformer = stats.generate_transformer()?;
//! assert_eq!(transformer.transform(0.5), 1.0);
//! assert_eq!(transformer.transform(3.9), 4.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - `traits` — `Transformation` / `TransformStatistics` / `Transformer` seams
//! - `stats` — the reusable Welford mean/variance accumulator
//! - `transformations` — the five transform families
//! - `params` — frozen-parameter persistence
//! - `error` — the crate error type
//! - `serialization` — byte-level parameter serialization

/// Error types for configuration, generation and persistence.
pub mod error;

/// Frozen transformer parameters and file persistence helpers.
pub mod params;

/// Byte-level serialization of parameter types.
pub mod serialization;

/// Online mean/variance accumulation (Welford's algorithm).
pub mod stats;

/// Core traits connecting accumulators and fitted transforms.
pub mod traits;

/// The transform families.
pub mod transformations;

pub use error::TransformError;
pub use params::TransformerParams;
pub use stats::MeanVarianceAccumulator;
pub use traits::{TransformStatistics, Transformation, Transformer};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformations::{
        BinningTransformation, IdfTransformation, LinearScalingTransformation,
        MeanStdDevTransformation, SimpleTransform,
    };

    /// Fit one accumulator per column through the dispatch seam, the way a
    /// dataset-level caller would.
    #[test]
    fn test_multi_column_fit_through_trait_objects() {
        let transformations: Vec<Box<dyn Transformation>> = vec![
            Box::new(BinningTransformation::equal_width(2).unwrap()),
            Box::new(LinearScalingTransformation::default()),
            Box::new(MeanStdDevTransformation::default()),
            Box::new(IdfTransformation::new()),
            Box::new(SimpleTransform::binarise()),
        ];

        let column = [1.0, 2.0, 3.0, 4.0, 5.0];
        let transformers: Vec<Box<dyn Transformer>> = transformations
            .iter()
            .map(|t| {
                let mut stats = t.create_stats();
                for &v in &column {
                    stats.observe_value(v);
                }
                stats.generate_transformer().unwrap()
            })
            .collect();

        // Binning: range [1, 5], boundaries 3 and 5.
        assert_eq!(transformers[0].transform(2.0), 1.0);
        assert_eq!(transformers[0].transform(4.0), 2.0);
        // Linear scaling: [1, 5] onto [0, 1].
        assert_eq!(transformers[1].transform(3.0), 0.5);
        // Mean/std-dev: mean 3, sample std dev sqrt(2.5).
        assert!(transformers[2].transform(3.0).abs() < 1e-12);
        // IDF: df = n = 5, so the weight is ln(1) = 0.
        assert_eq!(transformers[3].transform(1.0), 0.0);
        // Binarise ignores the corpus entirely.
        assert_eq!(transformers[4].transform(0.0), 0.0);
        assert_eq!(transformers[4].transform(2.0), 1.0);
    }

    /// Frozen transformers are shareable across threads.
    #[test]
    fn test_transformer_is_shareable() {
        let transformation = LinearScalingTransformation::default();
        let mut stats = transformation.create_stats();
        stats.observe_value(0.0);
        stats.observe_value(10.0);
        let transformer: std::sync::Arc<dyn Transformer> =
            stats.generate_transformer().unwrap().into();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = transformer.clone();
                std::thread::spawn(move || shared.transform(i as f64))
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let expected = i as f64 * 0.1;
            assert!((handle.join().unwrap() - expected).abs() < 1e-15);
        }
    }
}
