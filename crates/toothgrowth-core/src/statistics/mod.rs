//! Descriptive statistics.
//!
//! - Quantiles (Type 7 and Tukey hinges)
//! - Per-sample summaries (mean, sd, se, quartiles)
//! - Figure data: boxplot statistics and normal Q-Q points
//! - Normal and F distribution helpers shared with the tests and models

mod distributions;
mod plotting;
mod quantile;
mod summary;

pub use distributions::{f_upper_tail, normal, std_normal_cdf, std_normal_quantile};
pub use plotting::{plotting_positions, BoxplotStats, QqPlot};
pub use quantile::{compute_quantile, fivenum_sorted, median, quantile_sorted, sorted_copy};
pub use summary::{sum_of_squares, Summary};
