//! Summary statistics for datasets
//!
//! Provides the descriptive numbers drawn next to a key histogram:
//! - Min, max, range
//! - Mean
//! - Population variance and standard deviation (divide by N)
//! - Sample variance and standard deviation (divide by N - 1)

use crate::error::{validate_samples, StatsResult};
use serde::{Deserialize, Serialize};

/// Summary statistics for a numeric dataset
///
/// `variance` and `std_dev` use the population estimator. The unbiased
/// sample estimator is available through [`SummaryStats::sample_std_dev`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of values
    pub count: usize,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Mean (average)
    pub mean: f64,
    /// Population variance
    pub variance: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl SummaryStats {
    /// Compute summary statistics from data
    ///
    /// Fails with `EmptyInput` for an empty slice and `NonFiniteValue`
    /// if any sample is NaN or infinite.
    pub fn from_data(data: &[f64]) -> StatsResult<Self> {
        validate_samples(data)?;

        let count = data.len();
        let sum: f64 = data.iter().sum();
        let mean = sum / count as f64;

        let variance: f64 = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;
        let std_dev = variance.sqrt();

        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            count,
            min,
            max,
            mean,
            variance,
            std_dev,
        })
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Unbiased sample variance (divide by N - 1)
    ///
    /// Returns `None` for a single sample.
    pub fn sample_variance(&self) -> Option<f64> {
        if self.count < 2 {
            return None;
        }
        Some(self.variance * self.count as f64 / (self.count - 1) as f64)
    }

    /// Sample standard deviation (divide by N - 1)
    pub fn sample_std_dev(&self) -> Option<f64> {
        self.sample_variance().map(f64::sqrt)
    }

    /// One standard deviation band around the mean: (mean - std, mean + std)
    pub fn std_band(&self) -> (f64, f64) {
        (self.mean - self.std_dev, self.mean + self.std_dev)
    }

    /// Compute z-score for a value
    ///
    /// Constant datasets have zero spread; every value then scores 0.
    pub fn zscore(&self, x: f64) -> f64 {
        if self.std_dev == 0.0 {
            return 0.0;
        }
        (x - self.mean) / self.std_dev
    }
}
