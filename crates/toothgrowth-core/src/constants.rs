//! Constants shared across the statistical routines.

/// Default significance level for every test in the report.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Default family-wise confidence level for Tukey intervals.
pub const DEFAULT_CONF_LEVEL: f64 = 0.95;

/// Smallest and largest sample sizes the Shapiro-Wilk approximation covers.
pub const SHAPIRO_MIN_N: usize = 3;
pub const SHAPIRO_MAX_N: usize = 5000;

/// Whisker length for boxplots, in IQR units.
pub const BOXPLOT_COEF: f64 = 1.5;

/// Relative tolerance (against the largest singular value) below which a
/// singular value is treated as zero when ranking a design matrix.
pub const RANK_TOLERANCE: f64 = 1e-10;

/// 1 / sqrt(2 * pi).
pub const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
