//! Transform families: accumulators and their fitted transforms.
//!
//! Each family lives in its own module and exposes:
//! - a `*Transformation` type implementing [`crate::traits::Transformation`],
//!   which validates hyperparameters and constructs the accumulator;
//! - a `*Transformer` type implementing [`crate::traits::Transformer`], the
//!   immutable fitted transform.
//!
//! The accumulator types stay private; callers only see them through
//! `Box<dyn TransformStatistics>`.
//!
//! # Available families
//!
//! | Family | Fitted parameters |
//! |--------|-------------------|
//! | [`BinningTransformation`] | Bin boundaries and labels |
//! | [`LinearScalingTransformation`] | Observed and target ranges |
//! | [`MeanStdDevTransformation`] | Observed and target moments |
//! | [`IdfTransformation`] | Document frequency and corpus size |
//! | [`SimpleTransform`] | The configured operation (no fitting) |

pub mod binning;
pub mod idf;
pub mod linear_scaling;
pub mod mean_std_dev;
pub mod simple;

pub use binning::{BinningTransformation, BinningTransformer, BinningType};
pub use idf::{IdfTransformation, IdfTransformer};
pub use linear_scaling::{LinearScalingTransformation, LinearScalingTransformer};
pub use mean_std_dev::{MeanStdDevTransformation, MeanStdDevTransformer};
pub use simple::{Operation, SimpleTransform, EPSILON};
