//! Binning transformations.
//!
//! Three binning strategies are implemented:
//! - Equal width bins, based on the observed min and max.
//! - Equal frequency bins, based on the observed data.
//! - Standard deviation width bins, based on the observed mean and standard
//!   deviation.
//!
//! The equal frequency accumulator has to retain every observed feature value,
//! and thus has much higher memory usage than the other binning types.
//!
//! Binned values are in the range `[1, num_bins]`. Values above the final
//! boundary are clamped to the final bin.
//!
//! # Example
//! ```ignore
//! use featurestats_rs::transformations::BinningTransformation;
//! use featurestats_rs::traits::Transformation;
//!
//! let binning = BinningTransformation::equal_width(5)?;
//! let mut stats = binning.create_stats();
//! for value in column {
//!     stats.observe_value(value);
//! }
//! let transformer = stats.generate_transformer()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TransformError;
use crate::params::TransformerParams;
use crate::stats::MeanVarianceAccumulator;
use crate::traits::{TransformStatistics, Transformation, Transformer};

/// The allowed binning strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinningType {
    /// Fixed width bins between the observed min and max.
    EqualWidth,
    /// Bins containing an equal share of the observed values.
    EqualFrequency,
    /// Bins one standard deviation wide, centered on the observed mean.
    StdDevs,
}

/// A transformation which bins values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinningTransformation {
    num_bins: usize,
    kind: BinningType,
}

impl BinningTransformation {
    /// Construct a binning transformation, validating the bin count.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidParameter`] if `num_bins < 2`, or if
    /// the kind is [`BinningType::StdDevs`] and `num_bins` is odd (the bins
    /// must be symmetric about the mean).
    pub fn new(kind: BinningType, num_bins: usize) -> Result<Self, TransformError> {
        if num_bins < 2 {
            return Err(TransformError::InvalidParameter(format!(
                "Number of bins must be 2 or greater, found {}",
                num_bins
            )));
        }
        if kind == BinningType::StdDevs && num_bins % 2 == 1 {
            return Err(TransformError::InvalidParameter(format!(
                "Std dev binning must have an even number of bins, found {}",
                num_bins
            )));
        }
        Ok(Self { num_bins, kind })
    }

    /// Fixed equal width bins between the observed min and max values.
    ///
    /// Values outside the observed range are clamped to the first or last bin.
    pub fn equal_width(num_bins: usize) -> Result<Self, TransformError> {
        Self::new(BinningType::EqualWidth, num_bins)
    }

    /// Bins which each contain the same share of the training data, so every
    /// bin has an equal probability of occurrence in the training data.
    ///
    /// Values outside the observed range are clamped to the first or last bin.
    pub fn equal_frequency(num_bins: usize) -> Result<Self, TransformError> {
        Self::new(BinningType::EqualFrequency, num_bins)
    }

    /// Bins based on the observed standard deviation of the training data.
    ///
    /// Each bin is a standard deviation wide, except the two edge bins, which
    /// encompass all lower or higher values. The total bin count is
    /// `num_deviations * 2`, with the middle two bins either side of the mean.
    pub fn std_devs(num_deviations: usize) -> Result<Self, TransformError> {
        Self::new(BinningType::StdDevs, num_deviations * 2)
    }

    /// The total number of bins this transformation produces.
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// The configured binning strategy.
    pub fn kind(&self) -> BinningType {
        self.kind
    }
}

impl Transformation for BinningTransformation {
    fn create_stats(&self) -> Box<dyn TransformStatistics> {
        match self.kind {
            BinningType::EqualWidth => Box::new(EqualWidthStats::new(self.num_bins)),
            BinningType::EqualFrequency => Box::new(EqualFreqStats::new(self.num_bins)),
            BinningType::StdDevs => Box::new(StdDevStats::new(self.num_bins)),
        }
    }
}

/// Accumulator for equal width binning: tracks the observed min and max only.
#[derive(Clone, Debug)]
struct EqualWidthStats {
    num_bins: usize,
    min: f64,
    max: f64,
}

impl EqualWidthStats {
    fn new(num_bins: usize) -> Self {
        Self {
            num_bins,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl TransformStatistics for EqualWidthStats {
    fn observe_value(&mut self, value: f64) {
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    fn observe_sparse(&mut self, _count: u64) {}

    fn generate_transformer(&self) -> Result<Box<dyn Transformer>, TransformError> {
        let range = (self.max - self.min).abs();
        let increment = range / self.num_bins as f64;
        let mut bins = Vec::with_capacity(self.num_bins);
        let mut values = Vec::with_capacity(self.num_bins);
        for i in 0..self.num_bins {
            bins.push(self.min + (i + 1) as f64 * increment);
            values.push((i + 1) as f64);
        }
        Ok(Box::new(BinningTransformer {
            kind: BinningType::EqualWidth,
            bins,
            values,
        }))
    }
}

/// Accumulator for equal frequency binning: retains every observed value.
#[derive(Clone, Debug)]
struct EqualFreqStats {
    num_bins: usize,
    observed_values: Vec<f64>,
}

impl EqualFreqStats {
    const DEFAULT_CAPACITY: usize = 50;

    fn new(num_bins: usize) -> Self {
        Self {
            num_bins,
            observed_values: Vec::with_capacity(Self::DEFAULT_CAPACITY),
        }
    }
}

impl TransformStatistics for EqualFreqStats {
    fn observe_value(&mut self, value: f64) {
        self.observed_values.push(value);
    }

    fn observe_sparse(&mut self, _count: u64) {}

    fn generate_transformer(&self) -> Result<Box<dyn Transformer>, TransformError> {
        let count = self.observed_values.len();
        if self.num_bins > count {
            return Err(TransformError::InsufficientData {
                requested_bins: self.num_bins,
                observed_values: count,
            });
        }
        // Sort a copy so repeated freezes see identical state.
        let mut sorted = self.observed_values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut bins = Vec::with_capacity(self.num_bins);
        let mut values = Vec::with_capacity(self.num_bins);
        let increment = count / self.num_bins;
        for i in 0..self.num_bins - 1 {
            bins.push(sorted[(i + 1) * increment]);
            values.push((i + 1) as f64);
        }
        // The final boundary is the observed maximum, so the last bin always
        // captures the tail.
        bins.push(sorted[count - 1]);
        values.push(self.num_bins as f64);

        Ok(Box::new(BinningTransformer {
            kind: BinningType::EqualFrequency,
            bins,
            values,
        }))
    }
}

/// Accumulator for standard deviation binning: the Welford engine by composition.
#[derive(Clone, Debug)]
struct StdDevStats {
    num_bins: usize,
    acc: MeanVarianceAccumulator,
}

impl StdDevStats {
    fn new(num_bins: usize) -> Self {
        Self {
            num_bins,
            acc: MeanVarianceAccumulator::new(),
        }
    }
}

impl TransformStatistics for StdDevStats {
    fn observe_value(&mut self, value: f64) {
        self.acc.observe(value);
    }

    fn observe_sparse(&mut self, _count: u64) {}

    fn generate_transformer(&self) -> Result<Box<dyn Transformer>, TransformError> {
        let mean = self.acc.mean();
        let std_dev = self.acc.std_dev();

        let mut bins = Vec::with_capacity(self.num_bins);
        let mut values = Vec::with_capacity(self.num_bins);
        // Boundaries at mean + k * std_dev for k in -(n/2)+1 ..= n/2, so the
        // bins sit symmetrically about the mean with open-ended edges.
        let mut bin_count = -((self.num_bins / 2) as i64);
        for i in 0..self.num_bins {
            values.push((i + 1) as f64);
            bin_count += 1;
            bins.push(mean + bin_count as f64 * std_dev);
        }

        Ok(Box::new(BinningTransformer {
            kind: BinningType::StdDevs,
            bins,
            values,
        }))
    }
}

/// A fitted binning transform: ascending boundaries and their bin labels.
#[derive(Clone, Debug, PartialEq)]
pub struct BinningTransformer {
    kind: BinningType,
    bins: Vec<f64>,
    values: Vec<f64>,
}

impl BinningTransformer {
    /// Reconstruct a binning transformer from frozen parameters.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidParameter`] if the boundary and label
    /// arrays are empty or of mismatched length.
    pub fn new(
        kind: BinningType,
        bins: Vec<f64>,
        values: Vec<f64>,
    ) -> Result<Self, TransformError> {
        if bins.is_empty() || bins.len() != values.len() {
            return Err(TransformError::InvalidParameter(format!(
                "Bin boundaries and labels must be non-empty and of equal length, \
                 found {} boundaries and {} labels",
                bins.len(),
                values.len()
            )));
        }
        Ok(Self { kind, bins, values })
    }

    /// The binning strategy that produced this transformer.
    pub fn kind(&self) -> BinningType {
        self.kind
    }

    /// The ascending bin boundaries.
    pub fn bins(&self) -> &[f64] {
        &self.bins
    }
}

impl Transformer for BinningTransformer {
    fn transform(&self, input: f64) -> f64 {
        let last = self.bins.len() - 1;
        if input > self.bins[last] {
            // Clamp above the final boundary to the final bin.
            self.values[last]
        } else {
            // Insertion point over the ascending boundaries; exact boundary
            // matches resolve to that bin.
            let index = self.bins.partition_point(|&b| b < input);
            self.values[index.min(last)]
        }
    }

    fn extract_params(&self) -> TransformerParams {
        TransformerParams::Binning {
            kind: self.kind,
            bins: self.bins.clone(),
            values: self.values.clone(),
        }
    }
}
