//! Combined analysis reports
//!
//! A report bundles every number one figure needs so that a renderer can
//! draw it without calling back into this crate.
//!
//! - [`EmpiricalReport`]: summary statistics, histogram and a CDF segment fit
//!   of a key dataset
//! - [`AnalyticReport`]: quantile partition, density and CDF curves, and the
//!   windowed and global CDF fits of a normal distribution

use crate::config::{AnalysisConfig, DistributionConfig};
use crate::distribution::{sample_cdf, sample_pdf, NormalDistribution};
use crate::ecdf::Ecdf;
use crate::error::{StatsError, StatsResult};
use crate::fit::{FitWindow, SegmentFit};
use crate::histogram::{suggest_bin_width, Histogram};
use crate::partition::{DisplayDomain, PartitionRegion, QuantilePartition};
use crate::summary::SummaryStats;
use serde::{Deserialize, Serialize};

/// Everything derived from an empirical dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpiricalReport {
    pub summary: SummaryStats,
    /// (mean - std, mean + std) marker lines
    pub std_band: (f64, f64),
    pub histogram: Histogram,
    /// Line fitted to the empirical CDF inside the configured window
    ///
    /// None when fewer than two distinct keys fall in the window.
    pub cdf_fit: Option<SegmentFit>,
}

impl EmpiricalReport {
    /// Analyze `samples` with the histogram and fit settings of `config`
    pub fn compute(samples: &[f64], config: &AnalysisConfig) -> StatsResult<Self> {
        let summary = SummaryStats::from_data(samples)?;

        let bin_width = match config.histogram.bin_width {
            Some(width) => width,
            None => suggest_bin_width(samples)?,
        };
        let histogram = Histogram::build(samples, bin_width)?;

        let window = FitWindow::new(config.fit.p_lo, config.fit.p_hi)?;
        let ecdf = Ecdf::from_data(samples)?;
        let cdf_fit = match SegmentFit::fit(&ecdf.curve(), window) {
            Ok(fit) => Some(fit),
            Err(
                err @ (StatsError::InsufficientFitPoints { .. }
                | StatsError::DegenerateFitDomain { .. }),
            ) => {
                tracing::warn!(
                    p_lo = window.p_lo,
                    p_hi = window.p_hi,
                    error = %err,
                    "skipping empirical CDF fit"
                );
                None
            }
            Err(err) => return Err(err),
        };

        tracing::info!(
            samples = summary.count,
            mean = summary.mean,
            std_dev = summary.std_dev,
            bins = histogram.num_bins(),
            "empirical analysis complete"
        );

        Ok(Self {
            std_band: summary.std_band(),
            summary,
            histogram,
            cdf_fit,
        })
    }
}

/// Everything derived from an analytic normal distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticReport {
    pub distribution: DistributionConfig,
    pub partition: QuantilePartition,
    /// Domain shown for the partition figure
    pub display_domain: DisplayDomain,
    /// Partition regions clipped to the display domain
    pub regions: Vec<PartitionRegion>,
    /// (x, pdf(x)) across the display domain
    pub density: Vec<(f64, f64)>,
    /// Domain the CDF is sampled over for fitting
    pub sampling_domain: DisplayDomain,
    /// (x, CDF(x)) across the sampling domain
    pub cdf: Vec<(f64, f64)>,
    /// Fit inside the configured probability window
    pub segment_fit: SegmentFit,
    /// Fit over the whole sampled curve, for comparison
    pub global_fit: SegmentFit,
}

impl AnalyticReport {
    /// Analyze the normal distribution described by `config`
    pub fn compute(config: &AnalysisConfig) -> StatsResult<Self> {
        let params = &config.distribution;
        let dist = NormalDistribution::new(params.mean, params.std_dev)?;

        let partition = QuantilePartition::compute(&dist, config.partition.count)?;
        let display_domain = DisplayDomain::from_tail(&dist, config.partition.tail_probability)?;
        let regions = partition.regions(&display_domain);
        let density = sample_pdf(
            &dist,
            display_domain.x_min,
            display_domain.x_max,
            config.fit.grid_points,
        );

        let sampling_domain = DisplayDomain::from_tail(&dist, config.fit.grid_tail)?;
        let cdf = sample_cdf(
            &dist,
            sampling_domain.x_min,
            sampling_domain.x_max,
            config.fit.grid_points,
        );

        let window = FitWindow::new(config.fit.p_lo, config.fit.p_hi)?;
        let segment_fit = SegmentFit::fit(&cdf, window)?;
        let global_fit = SegmentFit::fit(&cdf, FitWindow::full())?;

        tracing::info!(
            mean = params.mean,
            std_dev = params.std_dev,
            regions = partition.num_regions(),
            segment_rss = segment_fit.residual_sum_of_squares(),
            global_rss = global_fit.residual_sum_of_squares(),
            "analytic analysis complete"
        );

        Ok(Self {
            distribution: params.clone(),
            partition,
            display_domain,
            regions,
            density,
            sampling_domain,
            cdf,
            segment_fit,
            global_fit,
        })
    }
}
