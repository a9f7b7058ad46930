//! Inverse document frequency weighting.
//!
//! Counts the number of observations in which a feature was present at all
//! (the document frequency), and freezes the classic TF-IDF weighting:
//! ```text
//! output = ln(n / df) * (1 + ln(tf))
//! ```
//! where `n` is the total corpus size (dense plus sparse observations) and
//! `tf` is the term-frequency input at transform time.
//!
//! Presence is what gets counted, not magnitude: every dense observation
//! increments `df` by one regardless of its value. A feature that was never
//! observed (`df == 0`) is not guarded against; such a transform silently
//! emits non-finite outputs.

use serde::{Deserialize, Serialize};

use crate::error::TransformError;
use crate::params::TransformerParams;
use crate::traits::{TransformStatistics, Transformation, Transformer};

/// A transformation which applies inverse document frequency weighting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdfTransformation;

impl IdfTransformation {
    /// Construct an IDF transformation. There are no hyperparameters.
    pub fn new() -> Self {
        Self
    }
}

impl Transformation for IdfTransformation {
    fn create_stats(&self) -> Box<dyn TransformStatistics> {
        Box::new(IdfStats {
            df: 0,
            sparse_observances: 0,
        })
    }
}

/// Accumulator for IDF: document frequency and sparse observation counts.
#[derive(Clone, Debug)]
struct IdfStats {
    df: u64,
    sparse_observances: u64,
}

impl TransformStatistics for IdfStats {
    fn observe_value(&mut self, _value: f64) {
        self.df += 1;
    }

    fn observe_sparse(&mut self, count: u64) {
        self.sparse_observances += count;
    }

    fn generate_transformer(&self) -> Result<Box<dyn Transformer>, TransformError> {
        Ok(Box::new(IdfTransformer::new(
            self.df,
            self.df + self.sparse_observances,
        )))
    }
}

/// A fitted IDF weighting.
///
/// The unsigned fields enforce the non-negativity of both the document
/// frequency and the corpus size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdfTransformer {
    df: u64,
    n: u64,
}

impl IdfTransformer {
    /// Construct an IDF transform from a document frequency and corpus size.
    pub fn new(df: u64, n: u64) -> Self {
        Self { df, n }
    }

    /// The number of observations in which the feature was present.
    pub fn df(&self) -> u64 {
        self.df
    }

    /// The total corpus size.
    pub fn n(&self) -> u64 {
        self.n
    }
}

impl Transformer for IdfTransformer {
    fn transform(&self, input: f64) -> f64 {
        (self.n as f64 / self.df as f64).ln() * (1.0 + input.ln())
    }

    fn extract_params(&self) -> TransformerParams {
        TransformerParams::Idf {
            df: self.df,
            n: self.n,
        }
    }
}
