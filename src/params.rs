//! Frozen transformer parameters and their persistence.
//!
//! A [`TransformerParams`] value captures exactly the numeric fields a fitted
//! transformer needs, one variant per transform family. Reconstructing a
//! transformer from its extracted parameters is a bit-identical round-trip:
//! derived fields (such as the linear scaling factor) are deterministic
//! functions of the stored fields and are recomputed on load.

use serde::{Deserialize, Serialize};

use crate::error::TransformError;
use crate::serialization::SerializableParams;
use crate::traits::Transformer;
use crate::transformations::binning::{BinningTransformer, BinningType};
use crate::transformations::idf::IdfTransformer;
use crate::transformations::linear_scaling::LinearScalingTransformer;
use crate::transformations::mean_std_dev::MeanStdDevTransformer;
use crate::transformations::simple::{Operation, SimpleTransform};

/// Serializable parameters for a fitted transformer, one variant per family.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TransformerParams {
    /// Bin boundaries and their labels.
    Binning {
        /// The binning strategy that produced the boundaries.
        kind: BinningType,
        /// Ascending bin boundaries.
        bins: Vec<f64>,
        /// Bin labels, `1..=num_bins`.
        values: Vec<f64>,
    },
    /// Observed and target ranges for linear scaling.
    LinearScaling {
        observed_min: f64,
        observed_max: f64,
        target_min: f64,
        target_max: f64,
    },
    /// Observed and target moments for mean/std-dev normalization.
    MeanStdDev {
        observed_mean: f64,
        observed_std_dev: f64,
        target_mean: f64,
        target_std_dev: f64,
    },
    /// Document frequency and corpus size for IDF weighting.
    Idf { df: u64, n: u64 },
    /// The operation of a stateless transform.
    Simple { op: Operation },
}

impl TransformerParams {
    /// Reconstruct the transformer these parameters were extracted from.
    ///
    /// Construction validation is re-run, so hand-edited parameters fail the
    /// same checks the fitting path enforces.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidParameter`] if the parameters fail
    /// family validation.
    pub fn into_transformer(self) -> Result<Box<dyn Transformer>, TransformError> {
        match self {
            TransformerParams::Binning { kind, bins, values } => {
                Ok(Box::new(BinningTransformer::new(kind, bins, values)?))
            }
            TransformerParams::LinearScaling {
                observed_min,
                observed_max,
                target_min,
                target_max,
            } => Ok(Box::new(LinearScalingTransformer::new(
                observed_min,
                observed_max,
                target_min,
                target_max,
            )?)),
            TransformerParams::MeanStdDev {
                observed_mean,
                observed_std_dev,
                target_mean,
                target_std_dev,
            } => Ok(Box::new(MeanStdDevTransformer::new(
                observed_mean,
                observed_std_dev,
                target_mean,
                target_std_dev,
            )?)),
            TransformerParams::Idf { df, n } => Ok(Box::new(IdfTransformer::new(df, n))),
            TransformerParams::Simple { op } => Ok(Box::new(SimpleTransform::new(op)?)),
        }
    }
}

/// Save a fitted transformer's parameters to a file.
pub fn save_transformer<P: AsRef<std::path::Path>>(
    path: P,
    transformer: &dyn Transformer,
) -> Result<(), TransformError> {
    let bytes = transformer.extract_params().to_bytes()?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Load a fitted transformer from a file written by [`save_transformer`].
pub fn load_transformer<P: AsRef<std::path::Path>>(
    path: P,
) -> Result<Box<dyn Transformer>, TransformError> {
    let bytes = std::fs::read(path)?;
    let params = TransformerParams::from_bytes(&bytes)?;
    params.into_transformer()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_round_trip_all_families() {
        let params = [
            TransformerParams::Binning {
                kind: BinningType::EqualWidth,
                bins: vec![1.0, 2.0, 3.0],
                values: vec![1.0, 2.0, 3.0],
            },
            TransformerParams::LinearScaling {
                observed_min: 0.0,
                observed_max: 10.0,
                target_min: 0.0,
                target_max: 1.0,
            },
            TransformerParams::MeanStdDev {
                observed_mean: 3.0,
                observed_std_dev: 1.5,
                target_mean: 0.0,
                target_std_dev: 1.0,
            },
            TransformerParams::Idf { df: 2, n: 10 },
            TransformerParams::Simple {
                op: Operation::Threshold { min: 0.0, max: 5.0 },
            },
        ];
        for original in params {
            let bytes = original.to_bytes().unwrap();
            let restored = TransformerParams::from_bytes(&bytes).unwrap();
            assert_eq!(original, restored);
        }
    }

    #[test]
    fn test_json_round_trip() {
        let params = TransformerParams::LinearScaling {
            observed_min: -1.0,
            observed_max: 1.0,
            target_min: 0.0,
            target_max: 100.0,
        };
        let json = serde_json::to_string(&params).unwrap();
        let restored: TransformerParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, restored);
    }

    #[test]
    fn test_into_transformer_revalidates() {
        let params = TransformerParams::LinearScaling {
            observed_min: 10.0,
            observed_max: 0.0,
            target_min: 0.0,
            target_max: 1.0,
        };
        assert!(matches!(
            params.into_transformer(),
            Err(TransformError::InvalidParameter(_))
        ));

        let params = TransformerParams::Simple {
            op: Operation::Add(f64::NAN),
        };
        assert!(params.into_transformer().is_err());
    }

    #[test]
    fn test_save_load_file() {
        let params = TransformerParams::MeanStdDev {
            observed_mean: 3.0,
            observed_std_dev: 2.5f64.sqrt(),
            target_mean: 0.0,
            target_std_dev: 1.0,
        };
        let transformer = params.into_transformer().unwrap();

        let path = std::env::temp_dir().join(format!(
            "featurestats_test_mean_std_dev_{}.bin",
            std::process::id()
        ));
        save_transformer(&path, transformer.as_ref()).unwrap();
        let loaded = load_transformer(&path).unwrap();

        for i in 0..=60 {
            let input = i as f64 * 0.1;
            assert_eq!(transformer.transform(input), loaded.transform(input));
        }
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = load_transformer("/definitely/not/a/real/path.bin");
        assert!(matches!(result, Err(TransformError::IoError(_))));
    }
}
