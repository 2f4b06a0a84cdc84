//! keyspread-stats - Numeric core for key distribution analysis
//!
//! This crate turns raw integer keys or an analytic distribution into the
//! numbers a plotting front end needs:
//!
//! - **Summary**: range, mean, population standard deviation
//! - **Histogram**: fixed-width bins aligned to the bin width
//! - **Partition**: equal-probability quantile boundaries of a distribution
//! - **Fit**: least-squares line over a probability window of a CDF curve
//!
//! Supporting modules provide continuous distributions, the empirical CDF,
//! a key-to-slot CDF model, analysis configuration and combined reports.
//!
//! # Design Philosophy
//!
//! Every routine is a pure function of its inputs. Invalid input is reported
//! through [`StatsError`] rather than turned into NaN or a zero slope, so a
//! renderer never draws a misleading figure.

pub mod config;
pub mod distribution;
pub mod ecdf;
pub mod error;
pub mod fit;
pub mod histogram;
pub mod partition;
pub mod report;
pub mod slot_model;
pub mod summary;

pub use config::*;
pub use distribution::*;
pub use ecdf::*;
pub use error::*;
pub use fit::*;
pub use histogram::*;
pub use partition::*;
pub use report::*;
pub use slot_model::*;
pub use summary::*;
