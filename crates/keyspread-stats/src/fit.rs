//! Least-squares line fits over a window of a CDF curve
//!
//! A CDF is far from linear over its whole domain but close to linear over a
//! narrow probability band. [`SegmentFit::fit`] keeps the points whose y
//! value lies inside a [`FitWindow`] and fits an ordinary least-squares line
//! to that run only.

use crate::error::{StatsError, StatsResult};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Probability band `[p_lo, p_hi]` selecting the points to fit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitWindow {
    pub p_lo: f64,
    pub p_hi: f64,
}

impl FitWindow {
    /// Create a window; both bounds in [0, 1] and `p_lo < p_hi`
    pub fn new(p_lo: f64, p_hi: f64) -> StatsResult<Self> {
        let in_unit = |p: f64| (0.0..=1.0).contains(&p);
        if !(in_unit(p_lo) && in_unit(p_hi) && p_lo < p_hi) {
            return Err(StatsError::InvalidFitWindow { p_lo, p_hi });
        }
        Ok(Self { p_lo, p_hi })
    }

    /// The whole unit interval
    pub fn full() -> Self {
        Self { p_lo: 0.0, p_hi: 1.0 }
    }

    /// Check if y lies inside the window (bounds inclusive)
    pub fn contains(&self, y: f64) -> bool {
        (self.p_lo..=self.p_hi).contains(&y)
    }
}

/// A fitted line y = slope * x + intercept
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Ordinary least-squares fit of `ys` against `xs`
    ///
    /// This is the normal-equation solution
    /// `slope = (nΣxy - ΣxΣy) / (nΣx² - (Σx)²)`,
    /// `intercept = (Σy - slope·Σx) / n`,
    /// evaluated in mean-centered form so keys around 1e7 do not lose their
    /// significant digits to cancellation.
    pub fn least_squares(xs: &[f64], ys: &[f64]) -> StatsResult<Self> {
        if xs.len() != ys.len() {
            return Err(StatsError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }

        let count = xs.len();
        if count < 2 {
            return Err(StatsError::InsufficientFitPoints { found: count });
        }

        let n = count as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (&x, &y) in xs.iter().zip(ys) {
            let dx = x - x_mean;
            sxx += dx * dx;
            sxy += dx * (y - y_mean);
        }

        if sxx == 0.0 {
            return Err(StatsError::DegenerateFitDomain { count, x: xs[0] });
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;
        Ok(Self { slope, intercept })
    }

    /// Evaluate the line at x
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Line fitted to the part of a curve inside a [`FitWindow`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentFit {
    pub line: LinearFit,
    pub window: FitWindow,
    /// Indices of the selected points in the input curve
    pub selected: Range<usize>,
    /// x of each selected point
    pub xs: Vec<f64>,
    /// Observed y of each selected point
    pub observed: Vec<f64>,
    /// Line evaluated at each selected x
    pub fitted: Vec<f64>,
}

impl SegmentFit {
    /// Fit a line to the points of `curve` whose y lies in `window`
    ///
    /// `curve` must be ordered by x with y non-decreasing, as produced by
    /// sampling a CDF on an increasing grid. The selection is then one
    /// contiguous run. Any NaN or infinite coordinate is rejected with
    /// `NonFiniteValue`.
    pub fn fit(curve: &[(f64, f64)], window: FitWindow) -> StatsResult<Self> {
        for (index, &(x, y)) in curve.iter().enumerate() {
            if !x.is_finite() {
                return Err(StatsError::NonFiniteValue { index, value: x });
            }
            if !y.is_finite() {
                return Err(StatsError::NonFiniteValue { index, value: y });
            }
        }
        if let Some(index) = curve.windows(2).position(|w| w[1].1 < w[0].1) {
            return Err(StatsError::NonMonotonicCurve { index: index + 1 });
        }

        let start = curve.partition_point(|&(_, y)| y < window.p_lo);
        let end = curve.partition_point(|&(_, y)| y <= window.p_hi);
        let selected = start..end.max(start);
        let points = &curve[selected.clone()];

        let xs: Vec<f64> = points.iter().map(|&(x, _)| x).collect();
        let observed: Vec<f64> = points.iter().map(|&(_, y)| y).collect();

        let line = LinearFit::least_squares(&xs, &observed)?;
        let fitted: Vec<f64> = xs.iter().map(|&x| line.predict(x)).collect();

        tracing::debug!(
            points = xs.len(),
            p_lo = window.p_lo,
            p_hi = window.p_hi,
            slope = line.slope,
            intercept = line.intercept,
            "fitted curve segment"
        );

        Ok(Self {
            line,
            window,
            selected,
            xs,
            observed,
            fitted,
        })
    }

    /// Slope of the fitted line
    pub fn slope(&self) -> f64 {
        self.line.slope
    }

    /// Intercept of the fitted line
    pub fn intercept(&self) -> f64 {
        self.line.intercept
    }

    /// Number of points the line was fitted to
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false: a fit needs at least two points
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Residuals observed - fitted
    pub fn residuals(&self) -> Vec<f64> {
        self.observed
            .iter()
            .zip(&self.fitted)
            .map(|(o, f)| o - f)
            .collect()
    }

    /// Sum of squared residuals
    pub fn residual_sum_of_squares(&self) -> f64 {
        self.residuals().iter().map(|r| r * r).sum()
    }

    /// Largest absolute residual
    pub fn max_abs_residual(&self) -> f64 {
        self.residuals()
            .iter()
            .fold(0.0_f64, |acc, r| acc.max(r.abs()))
    }
}
