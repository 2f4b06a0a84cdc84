//! Configuration for keyspread analyses
//!
//! Centralized call-site parameters for the histogram, the quantile
//! partition, the CDF segment fit and the analytic distribution. Defaults
//! reproduce the standard key-distribution figures: 5000-wide bins,
//! N(0, 1e7²) split into deciles, and a [0.1, 0.3] CDF fit.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Complete analysis configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Histogram settings for the empirical path
    pub histogram: HistogramConfig,
    /// Quantile partition settings
    pub partition: PartitionConfig,
    /// CDF segment fit settings
    pub fit: FitConfig,
    /// Analytic distribution parameters
    pub distribution: DistributionConfig,
}

/// Histogram configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    /// Fixed bin width (None = Freedman-Diaconis)
    pub bin_width: Option<f64>,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            bin_width: Some(5000.0),
        }
    }
}

/// Quantile partition configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionConfig {
    /// Number of equal-probability regions
    pub count: usize,
    /// Tail probability cut from each side of the display domain
    pub tail_probability: f64,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            count: 10,
            tail_probability: 0.01,
        }
    }
}

/// CDF segment fit configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Lower probability bound of the fit window
    pub p_lo: f64,
    /// Upper probability bound of the fit window
    pub p_hi: f64,
    /// Number of CDF samples across the sampling domain
    pub grid_points: usize,
    /// Tail probability bounding the sampling domain
    pub grid_tail: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            p_lo: 0.1,
            p_hi: 0.3,
            grid_points: 1000,
            grid_tail: 0.001,
        }
    }
}

/// Normal distribution parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    pub mean: f64,
    pub std_dev: f64,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1e7,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    #[cfg(feature = "toml-config")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Serialize configuration to TOML
    #[cfg(feature = "toml-config")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(width) = self.histogram.bin_width {
            if !(width.is_finite() && width > 0.0) {
                return Err(ConfigError::OutOfRange(format!(
                    "histogram.bin_width must be > 0, got {}",
                    width
                )));
            }
        }

        if self.partition.count < 2 {
            return Err(ConfigError::OutOfRange(format!(
                "partition.count must be >= 2, got {}",
                self.partition.count
            )));
        }

        let tail = self.partition.tail_probability;
        if !(tail > 0.0 && tail < 0.5) {
            return Err(ConfigError::OutOfRange(format!(
                "partition.tail_probability must be in (0, 0.5), got {}",
                tail
            )));
        }

        let fit = &self.fit;
        if !((0.0..=1.0).contains(&fit.p_lo) && (0.0..=1.0).contains(&fit.p_hi)) {
            return Err(ConfigError::OutOfRange(
                "fit.p_lo and fit.p_hi must be between 0.0 and 1.0".to_string(),
            ));
        }
        if fit.p_lo >= fit.p_hi {
            return Err(ConfigError::InvalidWindow(format!(
                "fit.p_lo ({}) must be less than fit.p_hi ({})",
                fit.p_lo, fit.p_hi
            )));
        }
        if fit.grid_points < 2 {
            return Err(ConfigError::OutOfRange(
                "fit.grid_points must be >= 2".to_string(),
            ));
        }
        if !(fit.grid_tail > 0.0 && fit.grid_tail < 0.5) {
            return Err(ConfigError::OutOfRange(format!(
                "fit.grid_tail must be in (0, 0.5), got {}",
                fit.grid_tail
            )));
        }

        let dist = &self.distribution;
        if !dist.mean.is_finite() || !(dist.std_dev.is_finite() && dist.std_dev > 0.0) {
            return Err(ConfigError::OutOfRange(format!(
                "distribution needs a finite mean and std_dev > 0, got N({}, {})",
                dist.mean, dist.std_dev
            )));
        }

        Ok(())
    }
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Fit window bounds are invalid relative to each other
    #[error("Invalid fit window: {0}")]
    InvalidWindow(String),
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.histogram.bin_width, Some(5000.0));
        assert_eq!(config.partition.count, 10);
    }

    #[test]
    fn test_json_serialization() {
        let config = AnalysisConfig::default();
        let json = config.to_json().unwrap();
        let parsed = AnalysisConfig::from_json(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AnalysisConfig::from_json(r#"{"partition": {"count": 4}}"#).unwrap();
        assert_eq!(config.partition.count, 4);
        assert_eq!(config.partition.tail_probability, 0.01);
        assert_eq!(config.fit, FitConfig::default());
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_toml_round_trip() {
        let config = AnalysisConfig::from_toml("[fit]\np_lo = 0.2\np_hi = 0.4\n").unwrap();
        assert_eq!(config.fit.p_lo, 0.2);
        assert_eq!(config.fit.grid_points, 1000);
        let text = config.to_toml().unwrap();
        assert!(text.contains("p_hi = 0.4"));
    }

    #[test]
    fn test_invalid_window() {
        let mut config = AnalysisConfig::default();
        config.fit.p_lo = 0.5;
        config.fit.p_hi = 0.2;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWindow(_))));
    }

    #[test]
    fn test_out_of_range() {
        let mut config = AnalysisConfig::default();
        config.partition.tail_probability = 0.5;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.partition.count = 1;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.histogram.bin_width = Some(0.0);
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.distribution.std_dev = 0.0;
        assert!(config.validate().is_err());
    }
}
