//! Continuous distributions
//!
//! [`ContinuousDistribution`] is the seam between the partitioner and the
//! concrete distribution. Implementors must provide a strictly increasing,
//! continuous CDF. A closed-form quantile function is optional: the default
//! [`ContinuousDistribution::quantile`] inverts the CDF by bisection.

use crate::error::{StatsError, StatsResult};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

/// Probability-space tolerance targeted by [`invert_cdf`]
pub const QUANTILE_TOLERANCE: f64 = 1e-10;

/// Maximum bisection steps; 200 halvings exhaust any f64 interval
const MAX_BISECTION_STEPS: usize = 200;

/// A continuous distribution with a strictly increasing CDF
pub trait ContinuousDistribution: Send + Sync {
    /// P(X <= x)
    fn cdf(&self, x: f64) -> f64;

    /// Probability density at x
    fn pdf(&self, x: f64) -> f64;

    /// Distribution mean, used to seed the inversion bracket
    fn mean(&self) -> f64;

    /// Distribution standard deviation, used to size the inversion bracket
    fn std_dev(&self) -> f64;

    /// Quantile function (inverse CDF)
    ///
    /// Returns -inf for p = 0, +inf for p = 1 and NaN outside [0, 1].
    fn quantile(&self, p: f64) -> f64 {
        invert_cdf(self, p)
    }
}

/// Normal distribution N(mean, std_dev²)
///
/// CDF and quantile are closed form: `mean + std_dev * Φ⁻¹(p)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalDistribution {
    mean: f64,
    std_dev: f64,
    inner: Normal,
}

impl NormalDistribution {
    /// Create a normal distribution
    ///
    /// Fails with `InvalidDistribution` unless `mean` is finite and
    /// `std_dev` is finite and positive.
    pub fn new(mean: f64, std_dev: f64) -> StatsResult<Self> {
        if !mean.is_finite() {
            return Err(StatsError::InvalidDistribution {
                message: format!("mean must be finite, got {}", mean),
            });
        }
        if !(std_dev.is_finite() && std_dev > 0.0) {
            return Err(StatsError::InvalidDistribution {
                message: format!("std_dev must be finite and > 0, got {}", std_dev),
            });
        }
        let inner = Normal::new(mean, std_dev).map_err(|e| StatsError::InvalidDistribution {
            message: e.to_string(),
        })?;
        Ok(Self {
            mean,
            std_dev,
            inner,
        })
    }

    /// Standard normal N(0, 1)
    pub fn standard() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
            inner: Normal::standard(),
        }
    }
}

impl ContinuousDistribution for NormalDistribution {
    fn cdf(&self, x: f64) -> f64 {
        self.inner.cdf(x)
    }

    fn pdf(&self, x: f64) -> f64 {
        self.inner.pdf(x)
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    fn std_dev(&self) -> f64 {
        self.std_dev
    }

    fn quantile(&self, p: f64) -> f64 {
        if p.is_nan() || !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        if p == 0.0 {
            return f64::NEG_INFINITY;
        }
        if p == 1.0 {
            return f64::INFINITY;
        }
        self.inner.inverse_cdf(p)
    }
}

/// Invert a CDF numerically
///
/// Starts from the bracket `mean ± 10·std_dev`, widens it until it contains
/// the target, then bisects until `|cdf(x) - p| <= QUANTILE_TOLERANCE` or the
/// bracket cannot shrink further.
pub fn invert_cdf<D: ContinuousDistribution + ?Sized>(dist: &D, p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    let center = dist.mean();
    let mut half_width = 10.0 * dist.std_dev();
    if !(half_width.is_finite() && half_width > 0.0) {
        half_width = 1.0;
    }
    let mut lo = center - half_width;
    let mut hi = center + half_width;

    for _ in 0..64 {
        if dist.cdf(lo) <= p {
            break;
        }
        half_width *= 2.0;
        lo = center - half_width;
    }
    for _ in 0..64 {
        if dist.cdf(hi) >= p {
            break;
        }
        half_width *= 2.0;
        hi = center + half_width;
    }

    let mut mid = lo + (hi - lo) / 2.0;
    for _ in 0..MAX_BISECTION_STEPS {
        let value = dist.cdf(mid);
        if (value - p).abs() <= QUANTILE_TOLERANCE {
            break;
        }
        if value > p {
            hi = mid;
        } else {
            lo = mid;
        }
        let next = lo + (hi - lo) / 2.0;
        if next == mid {
            break;
        }
        mid = next;
    }
    mid
}

/// `n` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = end;
            values
        }
    }
}

/// Sample (x, CDF(x)) on an evenly spaced grid
///
/// The result is ordered by x with non-decreasing y, the shape
/// [`crate::SegmentFit::fit`] expects.
pub fn sample_cdf<D: ContinuousDistribution + ?Sized>(
    dist: &D,
    x_min: f64,
    x_max: f64,
    n: usize,
) -> Vec<(f64, f64)> {
    linspace(x_min, x_max, n)
        .into_iter()
        .map(|x| (x, dist.cdf(x)))
        .collect()
}

/// Sample (x, pdf(x)) on an evenly spaced grid
pub fn sample_pdf<D: ContinuousDistribution + ?Sized>(
    dist: &D,
    x_min: f64,
    x_max: f64,
    n: usize,
) -> Vec<(f64, f64)> {
    linspace(x_min, x_max, n)
        .into_iter()
        .map(|x| (x, dist.pdf(x)))
        .collect()
}
