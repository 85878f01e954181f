//! Core statistical routines for the toothgrowth report.
//!
//! This crate holds the numerics behind every stage of the report and knows
//! nothing about the dataset it is applied to. Everything operates on plain
//! `f64` responses and [`Factor`] columns.
//!
//! # Modules
//!
//! - [`statistics`]: sample quantiles, summaries, boxplot and Q-Q data
//! - [`hypothesis`]: Shapiro-Wilk normality and Levene/Brown-Forsythe tests
//! - [`anova`]: factor design matrices and sequential (Type I) ANOVA
//! - [`posthoc`]: studentized range distribution and Tukey HSD
//!
//! # Usage
//!
//! ```ignore
//! use toothgrowth_core::{
//!     anova::{fit_anova, ModelFormula},
//!     posthoc::tukey_hsd,
//!     Factor,
//! };
//!
//! let supp = Factor::new("supp", vec!["OJ".into(), "VC".into()], supp_codes)?;
//! let dose = Factor::new("dose", vec!["0.5".into(), "1".into(), "2".into()], dose_codes)?;
//! let formula = ModelFormula::crossed(0, 1);
//! let fit = fit_anova(&len, &[supp, dose], &formula)?;
//! let dose_hsd = tukey_hsd(&fit, 1, 0.95)?;
//! ```

pub mod anova;
pub mod constants;
pub mod error;
pub mod hypothesis;
pub mod posthoc;
pub mod statistics;

mod factor;

pub use anova::{fit_anova, AnovaFit, AnovaRow, ModelFormula, ResidualRow, Term};
pub use error::{StatsError, StatsResult};
pub use factor::Factor;
pub use hypothesis::{levene, shapiro_wilk, Center, NormalityTest, VarianceTest};
pub use posthoc::{tukey_hsd, PairwiseComparison, StudentizedRange, TukeyTable};
pub use statistics::{BoxplotStats, QqPlot, Summary};
