//! # toothgrowth
//!
//! A reproducible ANOVA report for R's ToothGrowth dataset: odontoblast
//! length in 60 guinea pigs by vitamin C supplement (`OJ`, `VC`) and dose
//! (0.5, 1, 2 mg/day).
//!
//! The report runs a fixed sequence of stages:
//! - Descriptive statistics overall, by factor and by cell
//! - Shapiro-Wilk normality tests and Levene (Brown-Forsythe) tests
//! - Sequential ANOVA for `supp`, `dose`, `supp + dose` and `supp * dose`
//! - Tukey HSD for every term of the interaction model
//!
//! The numerics live in the `toothgrowth-core` crate; this crate supplies
//! the dataset, the pipeline, configuration and output.
//!
//! ## Quick Start
//!
//! ```ignore
//! use toothgrowth::{output, run, Config, Dataset};
//!
//! let report = run(&Dataset::tooth_growth(), &Config::default())?;
//! println!("{}", output::format_report(&report));
//!
//! let dose = report.post_hoc.dose.comparison("2-0.5").unwrap();
//! println!("2 vs 0.5 mg/day: {:+.2} ({:.5})", dose.mean_difference, dose.adjusted_p_value);
//! ```

#![warn(clippy::all)]

mod config;
mod pipeline;
mod result;

pub mod data;
pub mod figures;
pub mod output;

pub use config::{Config, ENV_ALPHA, ENV_CONF_LEVEL, ENV_LEVENE_CENTER};
pub use data::{load_csv, DataError, Dataset, Dose, Observation, Supplement};
pub use figures::{CellMean, Figures, LabelledBoxplot};
pub use pipeline::{run, PipelineError, Stage};
pub use result::{
    DatasetInfo, Descriptive, GroupNormality, GroupSummary, Homogeneity, Models, Normality,
    PostHoc, Report,
};

// Re-export the core crate for callers that need the statistical types.
pub use toothgrowth_core as stats;
