//! Error types for keyspread-stats
//!
//! Every variant is a permanent input-validation failure detected before any
//! numeric result is produced. Nothing here is retryable.

use thiserror::Error;

/// Errors raised by the numeric routines
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// A statistic needs at least one sample
    #[error("Sample sequence is empty")]
    EmptyInput,

    /// NaN or infinite sample
    #[error("Sample at index {index} is not finite: {value}")]
    NonFiniteValue { index: usize, value: f64 },

    /// Histogram bin width must be finite and positive
    #[error("Invalid bin width: {width} (must be > 0)")]
    InvalidBinWidth { width: f64 },

    /// Span of the data would need more than `MAX_BINS` bins at this width
    #[error("Histogram needs {bins} bins at width {bin_width} (limit {limit})")]
    TooManyBins { bins: f64, bin_width: f64, limit: usize },

    /// Quantile partitions need at least two regions
    #[error("Invalid partition count: {count} (must be >= 2)")]
    InvalidPartitionCount { count: usize },

    /// Tail cutoff must lie strictly between 0 and 0.5
    #[error("Invalid tail probability: {tail} (must be in (0, 0.5))")]
    InvalidTailProbability { tail: f64 },

    /// Distribution parameters do not describe a proper distribution
    #[error("Invalid distribution: {message}")]
    InvalidDistribution { message: String },

    /// Fit window bounds out of [0, 1] or not ordered
    #[error("Invalid fit window [{p_lo}, {p_hi}]")]
    InvalidFitWindow { p_lo: f64, p_hi: f64 },

    /// Curve passed to the fitter decreases somewhere
    #[error("Curve is not monotonic non-decreasing at index {index}")]
    NonMonotonicCurve { index: usize },

    /// x and y inputs to a fit differ in length
    #[error("Fit inputs differ in length: {xs} x values, {ys} y values")]
    LengthMismatch { xs: usize, ys: usize },

    /// Fewer than two points fell inside the fit window
    #[error("Fit window selected {found} point(s), at least 2 required")]
    InsufficientFitPoints { found: usize },

    /// Every selected point has the same x, so the slope is undefined
    #[error("Fit domain is degenerate: all {count} selected x values equal {x}")]
    DegenerateFitDomain { count: usize, x: f64 },

    /// Key range or slot count for a slot model is unusable
    #[error("Invalid slot range: [{left}, {right}) with {slots} slots")]
    InvalidSlotRange { left: f64, right: f64, slots: usize },
}

/// Result type alias for numeric operations
pub type StatsResult<T> = Result<T, StatsError>;

/// Reject empty or non-finite sample sequences
pub(crate) fn validate_samples(data: &[f64]) -> StatsResult<()> {
    if data.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    if let Some((index, &value)) = data.iter().enumerate().find(|(_, x)| !x.is_finite()) {
        return Err(StatsError::NonFiniteValue { index, value });
    }
    Ok(())
}
