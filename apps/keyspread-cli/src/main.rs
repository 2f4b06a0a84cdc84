//! keyspread CLI
//!
//! Computes key-distribution reports and prints them as JSON for an external
//! renderer. Set `RUST_LOG=debug` to trace the numeric core.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use keyspread_stats::{AnalysisConfig, AnalyticReport, EmpiricalReport, NormalDistribution, SlotModel};
use tracing_subscriber::EnvFilter;

/// Key-distribution statistics for learned-index experiments
#[derive(Parser, Debug)]
#[command(name = "keyspread", version, about, long_about = None)]
struct Cli {
    /// TOML analysis configuration; defaults apply to anything it omits
    #[arg(global = true, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summary statistics, histogram and CDF fit of an integer key file
    Empirical(EmpiricalArgs),
    /// Quantile partition and CDF fits of a normal distribution
    Analytic(AnalyticArgs),
    /// Key-to-slot linear model over a key range
    Slot(SlotArgs),
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Args, Debug)]
struct EmpiricalArgs {
    /// File with one integer key per line
    file: PathBuf,

    /// Histogram bin width
    #[arg(long)]
    bin_width: Option<f64>,

    /// Pick the bin width with the Freedman-Diaconis rule
    #[arg(long, conflicts_with = "bin_width")]
    auto_bins: bool,
}

#[derive(Args, Debug)]
struct AnalyticArgs {
    #[command(flatten)]
    normal: NormalArgs,

    /// Number of equal-probability regions
    #[arg(long)]
    partitions: Option<usize>,

    /// Tail probability trimmed from each side of the display domain
    #[arg(long)]
    tail: Option<f64>,

    /// Lower probability bound of the fit window
    #[arg(long)]
    fit_lo: Option<f64>,

    /// Upper probability bound of the fit window
    #[arg(long)]
    fit_hi: Option<f64>,
}

#[derive(Args, Debug)]
struct NormalArgs {
    /// Distribution mean
    #[arg(long, allow_hyphen_values = true)]
    mean: Option<f64>,

    /// Distribution standard deviation
    #[arg(long)]
    std_dev: Option<f64>,
}

#[derive(Args, Debug)]
struct SlotArgs {
    #[command(flatten)]
    normal: NormalArgs,

    /// Inclusive lower bound of the key range
    #[arg(long, allow_hyphen_values = true)]
    left: f64,

    /// Exclusive upper bound of the key range
    #[arg(long, allow_hyphen_values = true)]
    right: f64,

    /// Number of slots keys are mapped onto
    #[arg(long)]
    slots: usize,
}

impl NormalArgs {
    fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(mean) = self.mean {
            config.distribution.mean = mean;
        }
        if let Some(std_dev) = self.std_dev {
            config.distribution.std_dev = std_dev;
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };
    let text = std::fs::read_to_string(path)?;
    let config = AnalysisConfig::from_toml(&text)?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Empirical(args) => {
            if args.auto_bins {
                config.histogram.bin_width = None;
            } else if let Some(width) = args.bin_width {
                config.histogram.bin_width = Some(width);
            }
            config.validate()?;

            let samples = keyspread_io::read_samples(&args.file)?;
            let report = EmpiricalReport::compute(&samples, &config)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Analytic(args) => {
            args.normal.apply(&mut config);
            if let Some(count) = args.partitions {
                config.partition.count = count;
            }
            if let Some(tail) = args.tail {
                config.partition.tail_probability = tail;
            }
            if let Some(p_lo) = args.fit_lo {
                config.fit.p_lo = p_lo;
            }
            if let Some(p_hi) = args.fit_hi {
                config.fit.p_hi = p_hi;
            }
            config.validate()?;

            let report = AnalyticReport::compute(&config)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Slot(args) => {
            args.normal.apply(&mut config);
            config.validate()?;

            let params = &config.distribution;
            let dist = NormalDistribution::new(params.mean, params.std_dev)?;
            let model = SlotModel::fit(&dist, args.left, args.right, args.slots)?;
            println!("{}", serde_json::to_string_pretty(&model)?);
        }
        Command::Config => {
            config.validate()?;
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
