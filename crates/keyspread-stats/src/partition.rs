//! Equal-probability quantile partitions
//!
//! Splits a continuous distribution into N contiguous regions that each carry
//! probability mass 1/N. The boundaries are `quantile(k / N)` for
//! `k = 1..N-1`.
//!
//! The display domain is a separate presentation bound taken from a tail
//! cutoff, so a renderer can choose how much of the tails to show without
//! changing the partition.

use crate::distribution::ContinuousDistribution;
use crate::error::{StatsError, StatsResult};
use serde::{Deserialize, Serialize};

/// N-1 boundaries splitting a distribution into N equal-mass regions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantilePartition {
    /// Strictly increasing cut points
    pub boundaries: Vec<f64>,
    /// Mass carried by each region, 1/N
    pub region_mass: f64,
}

/// Visible x range derived from a tail cutoff
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayDomain {
    pub x_min: f64,
    pub x_max: f64,
    /// Tail probability the bounds were computed from
    pub tail: f64,
}

/// One region of a partition, clipped to a display domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartitionRegion {
    /// Region number, 0 = leftmost
    pub index: usize,
    pub left: f64,
    pub right: f64,
}

impl QuantilePartition {
    /// Partition `dist` into `count` equal-probability regions
    pub fn compute<D: ContinuousDistribution + ?Sized>(dist: &D, count: usize) -> StatsResult<Self> {
        if count < 2 {
            return Err(StatsError::InvalidPartitionCount { count });
        }

        let boundaries: Vec<f64> = (1..count)
            .map(|k| dist.quantile(k as f64 / count as f64))
            .collect();

        tracing::debug!(count, "computed quantile partition");

        Ok(Self {
            boundaries,
            region_mass: 1.0 / count as f64,
        })
    }

    /// Number of regions (boundaries + 1)
    pub fn num_regions(&self) -> usize {
        self.boundaries.len() + 1
    }

    /// Region containing `x`
    ///
    /// Regions are left-closed: a value equal to boundary k belongs to
    /// region k + 1.
    pub fn region_of(&self, x: f64) -> usize {
        self.boundaries.partition_point(|&b| b <= x)
    }

    /// Regions clipped to `domain`, in order
    ///
    /// The outer regions extend to ±∞ conceptually and are cut at the
    /// domain bounds. Interior boundaries outside the domain are clamped
    /// to it, which yields empty regions rather than dropping them.
    pub fn regions(&self, domain: &DisplayDomain) -> Vec<PartitionRegion> {
        let clamp = |x: f64| x.clamp(domain.x_min, domain.x_max);

        let mut lefts = Vec::with_capacity(self.num_regions());
        lefts.push(domain.x_min);
        lefts.extend(self.boundaries.iter().copied().map(clamp));

        let mut rights: Vec<f64> = self.boundaries.iter().copied().map(clamp).collect();
        rights.push(domain.x_max);

        lefts
            .into_iter()
            .zip(rights)
            .enumerate()
            .map(|(index, (left, right))| PartitionRegion { index, left, right })
            .collect()
    }
}

impl DisplayDomain {
    /// Bounds `(quantile(tail), quantile(1 - tail))`
    ///
    /// `tail` must lie in the open interval (0, 0.5).
    pub fn from_tail<D: ContinuousDistribution + ?Sized>(dist: &D, tail: f64) -> StatsResult<Self> {
        if !(tail > 0.0 && tail < 0.5) {
            return Err(StatsError::InvalidTailProbability { tail });
        }
        Ok(Self {
            x_min: dist.quantile(tail),
            x_max: dist.quantile(1.0 - tail),
            tail,
        })
    }

    /// Width of the domain
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Check if x lies inside the domain
    pub fn contains(&self, x: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x)
    }
}
