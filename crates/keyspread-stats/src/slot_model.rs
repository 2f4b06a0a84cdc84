//! Key-to-slot CDF model
//!
//! A learned index routes a key to one of `slots` children by approximating
//! the key CDF with a line. Over a key range `[left, right)` the CDF is
//! rescaled so that `left` maps to slot 0 and `right` to slot `slots - 1`,
//! then fitted with ordinary least squares.

use crate::distribution::{linspace, ContinuousDistribution};
use crate::error::{StatsError, StatsResult};
use crate::fit::LinearFit;
use serde::{Deserialize, Serialize};

/// Upper bound on the number of CDF samples per fit
pub const MAX_SLOT_SAMPLES: usize = 500;

/// Linear key-to-slot model over a key range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotModel {
    pub line: LinearFit,
    pub left: f64,
    pub right: f64,
    pub slots: usize,
}

impl SlotModel {
    /// Fit a model mapping keys in `[left, right)` onto `slots` slots
    ///
    /// Samples `min(right - left, MAX_SLOT_SAMPLES)` evenly spaced keys
    /// starting at `left` (at least two).
    pub fn fit<D: ContinuousDistribution + ?Sized>(
        dist: &D,
        left: f64,
        right: f64,
        slots: usize,
    ) -> StatsResult<Self> {
        let invalid = || StatsError::InvalidSlotRange { left, right, slots };
        if !(left.is_finite() && right.is_finite() && right > left) || slots < 2 {
            return Err(invalid());
        }

        let cdf_left = dist.cdf(left);
        let cdf_right = dist.cdf(right);
        let mass = cdf_right - cdf_left;
        if !(mass > 0.0) {
            return Err(invalid());
        }

        let samples = ((right - left).floor() as usize).clamp(2, MAX_SLOT_SAMPLES);
        let step = (right - left) / samples as f64;
        // Half-open range: the last sample sits one step before `right`
        let xs = linspace(left, right - step, samples);
        let top = (slots - 1) as f64;
        let ys: Vec<f64> = xs
            .iter()
            .map(|&x| (dist.cdf(x) - cdf_left) * top / mass)
            .collect();

        let line = LinearFit::least_squares(&xs, &ys)?;

        tracing::debug!(left, right, slots, samples, "fitted slot model");

        Ok(Self {
            line,
            left,
            right,
            slots,
        })
    }

    /// Fractional slot position predicted for `key`
    pub fn predict(&self, key: f64) -> f64 {
        self.line.predict(key)
    }

    /// Slot index for `key`, rounded and clamped to `[0, slots - 1]`
    pub fn slot_for(&self, key: f64) -> usize {
        let top = (self.slots - 1) as f64;
        let position = self.predict(key).round();
        if position.is_nan() {
            return 0;
        }
        position.clamp(0.0, top) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::NormalDistribution;

    #[test]
    fn test_slot_model_validation() {
        let dist = NormalDistribution::new(0.0, 1e7).unwrap();
        assert!(SlotModel::fit(&dist, 10.0, 10.0, 8).is_err());
        assert!(SlotModel::fit(&dist, 10.0, 5.0, 8).is_err());
        assert!(SlotModel::fit(&dist, 0.0, 100.0, 1).is_err());
        assert!(SlotModel::fit(&dist, f64::NEG_INFINITY, 100.0, 8).is_err());
    }

    #[test]
    fn test_slot_model_zero_mass_range() {
        // Far tail: the CDF is flat at 1.0 in f64
        let dist = NormalDistribution::standard();
        let err = SlotModel::fit(&dist, 1e3, 2e3, 4).unwrap_err();
        assert!(matches!(err, StatsError::InvalidSlotRange { .. }));
    }

    #[test]
    fn test_slot_model_near_center_is_linear() {
        // Around the mean the normal CDF is almost a straight line
        let dist = NormalDistribution::new(0.0, 1e7).unwrap();
        let model = SlotModel::fit(&dist, -1e5, 1e5, 10).unwrap();

        assert!(model.line.slope > 0.0);
        assert_eq!(model.slot_for(-1e5), 0);
        assert_eq!(model.slot_for(1e4), 5);
        assert_eq!(model.slot_for(1e5), 9);
        assert!((model.predict(0.0) - 4.5).abs() < 0.05);
    }

    #[test]
    fn test_slot_for_clamps() {
        let dist = NormalDistribution::new(0.0, 1e7).unwrap();
        let model = SlotModel::fit(&dist, -1e6, 1e6, 16).unwrap();

        assert_eq!(model.slot_for(-1e9), 0);
        assert_eq!(model.slot_for(1e9), 15);
    }

    #[test]
    fn test_slot_for_monotonic() {
        let dist = NormalDistribution::new(0.0, 1e7).unwrap();
        let model = SlotModel::fit(&dist, -2e7, 2e7, 100).unwrap();

        let slots: Vec<usize> = (0..=40)
            .map(|i| model.slot_for(-2e7 + i as f64 * 1e6))
            .collect();
        assert!(slots.windows(2).all(|w| w[0] <= w[1]));
    }
}
