//! Empirical Cumulative Distribution Function (ECDF)
//!
//! The ECDF is a step function that estimates the underlying CDF of a sample.
//! For a sample of n values, ECDF(x) = (number of values <= x) / n.
//!
//! This is the empirical counterpart of [`crate::ContinuousDistribution`]:
//! its [`Ecdf::curve`] feeds the same segment fitter as a sampled analytic
//! CDF, which is how a learned index models its key distribution.

use crate::error::{validate_samples, StatsResult};
use serde::{Deserialize, Serialize};

/// Empirical Cumulative Distribution Function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ecdf {
    /// Sorted values
    values: Vec<f64>,
    /// CDF values (0 to 1] at each sorted value
    cdf: Vec<f64>,
}

impl Ecdf {
    /// Build an ECDF from data
    ///
    /// Time complexity: O(n log n) for sorting
    pub fn from_data(data: &[f64]) -> StatsResult<Self> {
        validate_samples(data)?;

        let mut values = data.to_vec();
        values.sort_by(f64::total_cmp);

        let n = values.len() as f64;
        let cdf: Vec<f64> = (1..=values.len()).map(|i| i as f64 / n).collect();

        Ok(Self { values, cdf })
    }

    /// Evaluate the ECDF at a point
    ///
    /// Returns the proportion of values <= x
    /// Time complexity: O(log n)
    pub fn evaluate(&self, x: f64) -> f64 {
        let idx = self.values.partition_point(|&v| v <= x);
        if idx == 0 {
            0.0
        } else {
            self.cdf[idx - 1]
        }
    }

    /// Get the quantile (inverse CDF)
    ///
    /// Returns the smallest value x such that ECDF(x) >= p
    /// Time complexity: O(log n)
    pub fn quantile(&self, p: f64) -> Option<f64> {
        if !(0.0..=1.0).contains(&p) {
            return None;
        }
        let idx = self.cdf.partition_point(|&c| c < p);
        Some(self.values[idx.min(self.values.len() - 1)])
    }

    /// Get the median
    pub fn median(&self) -> Option<f64> {
        self.quantile(0.5)
    }

    /// Get the interquartile range (IQR)
    pub fn iqr(&self) -> Option<f64> {
        let q1 = self.quantile(0.25)?;
        let q3 = self.quantile(0.75)?;
        Some(q3 - q1)
    }

    /// Get the number of samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: construction rejects empty data
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the sorted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Monotonic (value, ECDF(value)) curve, one point per distinct value
    ///
    /// Duplicate keys collapse to their last occurrence so that x is strictly
    /// increasing and y is non-decreasing.
    pub fn curve(&self) -> Vec<(f64, f64)> {
        let mut points: Vec<(f64, f64)> = Vec::with_capacity(self.values.len());
        for (&x, &y) in self.values.iter().zip(self.cdf.iter()) {
            match points.last_mut() {
                Some(last) if last.0 == x => last.1 = y,
                _ => points.push((x, y)),
            }
        }
        points
    }
}
