//! Command-line front end for the ToothGrowth report.
//!
//! # Usage
//!
//! ```bash
//! # Report on the embedded dataset
//! toothgrowth
//!
//! # Report on a CSV export, as JSON
//! toothgrowth --data ToothGrowth.csv --format json
//!
//! # Stricter tests, classic mean-centered Levene, debug logging
//! toothgrowth --alpha 0.01 --levene-center mean --verbose
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use toothgrowth::stats::Center;
use toothgrowth::{load_csv, output, run, Config, Dataset};
use tracing_subscriber::EnvFilter;

/// Reproducible ANOVA report for the ToothGrowth dataset
#[derive(Parser, Debug)]
#[command(name = "toothgrowth")]
#[command(about = "Assumption checks, sequential ANOVA and Tukey HSD for ToothGrowth")]
#[command(version)]
struct Args {
    /// CSV file with len, supp and dose columns (default: embedded dataset)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Terminal)]
    format: Format,

    /// Significance level for every test (overrides TOOTHGROWTH_ALPHA)
    #[arg(long)]
    alpha: Option<f64>,

    /// Tukey family-wise confidence level (overrides TOOTHGROWTH_CONF_LEVEL)
    #[arg(long)]
    conf_level: Option<f64>,

    /// Group center for Levene's test (overrides TOOTHGROWTH_LEVENE_CENTER)
    #[arg(long, value_enum)]
    levene_center: Option<CenterArg>,

    /// Decimal places for printed statistics
    #[arg(long, default_value_t = 5)]
    decimals: usize,

    /// Log fitted quantities at debug level to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Terminal,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CenterArg {
    Median,
    Mean,
}

impl From<CenterArg> for Center {
    fn from(arg: CenterArg) -> Self {
        match arg {
            CenterArg::Median => Center::Median,
            CenterArg::Mean => Center::Mean,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(args: &Args) -> Result<Config, String> {
    let mut config = Config::from_env_or(Config::default());
    if let Some(alpha) = args.alpha {
        config.alpha = alpha;
    }
    if let Some(level) = args.conf_level {
        config.conf_level = level;
    }
    if let Some(center) = args.levene_center {
        config.levene_center = center.into();
    }
    config.decimals = args.decimals;
    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let dataset = match &args.data {
        Some(path) => match load_csv(path).and_then(|d| d.validate().map(|()| d)) {
            Ok(d) => d,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to load data");
                eprintln!("error: {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Dataset::tooth_growth(),
    };

    let report = match run(&dataset, &config) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(stage = %e.stage, error = %e.source, "pipeline failed");
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match args.format {
        Format::Terminal => println!("{}", output::format_report(&report)),
        Format::Json => match output::to_json_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize report");
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }
    ExitCode::SUCCESS
}
