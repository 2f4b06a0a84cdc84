//! Fixed-width histogram binning
//!
//! Edges start at the bin-width-aligned floor of the minimum and step by the
//! bin width until the last edge lies strictly above the maximum, so the
//! maximum always sits inside the final bin.
//!
//! Bins are left-closed, `[edges[i], edges[i + 1])`. The final bin is also
//! closed on the right.

use crate::ecdf::Ecdf;
use crate::error::{validate_samples, StatsError, StatsResult};
use serde::{Deserialize, Serialize};

/// Largest number of bins [`Histogram::build`] will allocate
pub const MAX_BINS: usize = 10_000_000;

/// A fixed-width histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges, `counts.len() + 1` entries
    pub edges: Vec<f64>,
    /// Number of samples per bin
    pub counts: Vec<usize>,
    /// Width shared by every bin
    pub bin_width: f64,
}

impl Histogram {
    /// Bin `data` with a fixed `bin_width`
    pub fn build(data: &[f64], bin_width: f64) -> StatsResult<Self> {
        if !(bin_width.is_finite() && bin_width > 0.0) {
            return Err(StatsError::InvalidBinWidth { width: bin_width });
        }
        validate_samples(data)?;

        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let start = (min / bin_width).floor() * bin_width;
        // Bound the count in f64 before it becomes an allocation size
        let required = ((max - start) / bin_width).floor() + 1.0;
        let too_many = |bins: f64| StatsError::TooManyBins {
            bins,
            bin_width,
            limit: MAX_BINS,
        };
        if !(required <= MAX_BINS as f64) {
            return Err(too_many(required));
        }
        let mut num_bins = required as usize;
        // Rounding in the division can leave the last edge at or below max
        while start + num_bins as f64 * bin_width <= max {
            num_bins += 1;
            if num_bins > MAX_BINS {
                return Err(too_many(num_bins as f64));
            }
        }

        let edges: Vec<f64> = (0..=num_bins)
            .map(|i| start + i as f64 * bin_width)
            .collect();

        let mut histogram = Self {
            edges,
            counts: vec![0; num_bins],
            bin_width,
        };
        for &x in data {
            if let Some(idx) = histogram.bin_index(x) {
                histogram.counts[idx] += 1;
            }
        }

        tracing::debug!(
            samples = data.len(),
            bins = num_bins,
            bin_width,
            "built histogram"
        );

        Ok(histogram)
    }

    /// Index of the bin containing `x`, or `None` outside the edges
    pub fn bin_index(&self, x: f64) -> Option<usize> {
        let num_bins = self.counts.len();
        let first = self.edges[0];
        let last = self.edges[num_bins];
        if !(first..=last).contains(&x) {
            return None;
        }

        let mut idx = (((x - first) / self.bin_width).floor() as usize).min(num_bins - 1);
        // Correct for floating point drift against the stored edges
        if idx > 0 && x < self.edges[idx] {
            idx -= 1;
        }
        if idx + 1 < num_bins && x >= self.edges[idx + 1] {
            idx += 1;
        }
        Some(idx)
    }

    /// Number of bins
    pub fn num_bins(&self) -> usize {
        self.counts.len()
    }

    /// Total number of binned samples
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Midpoint of each bin, for bar placement
    pub fn bin_centers(&self) -> Vec<f64> {
        self.edges
            .windows(2)
            .map(|pair| (pair[0] + pair[1]) / 2.0)
            .collect()
    }
}

/// Suggest a bin width with the Freedman-Diaconis rule
///
/// Uses `2 * IQR / n^(1/3)`. When the interquartile range is zero the full
/// range is used instead, and a constant dataset gets a width of 1.
pub fn suggest_bin_width(data: &[f64]) -> StatsResult<f64> {
    let ecdf = Ecdf::from_data(data)?;
    let n = ecdf.len() as f64;

    let mut spread = ecdf.iqr().unwrap_or(0.0);
    if spread <= 0.0 {
        let values = ecdf.values();
        spread = values[values.len() - 1] - values[0];
    }
    if spread <= 0.0 {
        return Ok(1.0);
    }

    Ok(2.0 * spread / n.cbrt())
}
