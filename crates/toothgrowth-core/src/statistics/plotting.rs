//! Data behind the report's figures.
//!
//! Nothing here draws anything. These types carry exactly the numbers a
//! renderer needs for a boxplot or a normal Q-Q plot.

use serde::{Deserialize, Serialize};

use super::distributions::std_normal_quantile;
use super::quantile::{fivenum_sorted, quantile_sorted, sorted_copy};
use crate::constants::BOXPLOT_COEF;
use crate::error::{ensure_finite, StatsError, StatsResult};

/// Boxplot statistics for one group.
///
/// Hinges follow Tukey's five-number summary. Whiskers extend to the most
/// extreme observations within `1.5 * (upper_hinge - lower_hinge)` of the
/// hinges; anything beyond is listed in `outliers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxplotStats {
    pub lower_whisker: f64,
    pub lower_hinge: f64,
    pub median: f64,
    pub upper_hinge: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
    pub n: usize,
}

impl BoxplotStats {
    pub fn of(data: &[f64]) -> StatsResult<Self> {
        if data.is_empty() {
            return Err(StatsError::insufficient("boxplot", 1, 0));
        }
        ensure_finite("boxplot", data)?;

        let sorted = sorted_copy(data);
        let [_, lower_hinge, median, upper_hinge, _] = fivenum_sorted(&sorted);
        let reach = BOXPLOT_COEF * (upper_hinge - lower_hinge);
        let (lo_fence, hi_fence) = (lower_hinge - reach, upper_hinge + reach);

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&x| x >= lo_fence)
            .unwrap_or(lower_hinge);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&x| x <= hi_fence)
            .unwrap_or(upper_hinge);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&x| x < lo_fence || x > hi_fence)
            .collect();

        Ok(Self {
            lower_whisker,
            lower_hinge,
            median,
            upper_hinge,
            upper_whisker,
            outliers,
            n: sorted.len(),
        })
    }
}

/// Points and reference line of a normal Q-Q plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QqPlot {
    /// Standard normal quantiles at the plotting positions.
    pub theoretical: Vec<f64>,
    /// Sorted sample.
    pub sample: Vec<f64>,
    /// Intercept of the line through the first and third quartile pairs.
    pub line_intercept: f64,
    /// Slope of that line.
    pub line_slope: f64,
}

impl QqPlot {
    pub fn of(data: &[f64]) -> StatsResult<Self> {
        if data.len() < 2 {
            return Err(StatsError::insufficient("Q-Q plot", 2, data.len()));
        }
        ensure_finite("Q-Q plot", data)?;

        let sample = sorted_copy(data);
        let theoretical = plotting_positions(sample.len())
            .into_iter()
            .map(std_normal_quantile)
            .collect::<StatsResult<Vec<_>>>()?;

        let (y1, y3) = (quantile_sorted(&sample, 0.25), quantile_sorted(&sample, 0.75));
        let (x1, x3) = (std_normal_quantile(0.25)?, std_normal_quantile(0.75)?);
        let line_slope = (y3 - y1) / (x3 - x1);
        let line_intercept = y1 - line_slope * x1;

        Ok(Self {
            theoretical,
            sample,
            line_intercept,
            line_slope,
        })
    }
}

/// Blom-type plotting positions `(i - a) / (n + 1 - 2a)`, with `a = 3/8`
/// for n <= 10 and `a = 1/2` otherwise.
pub fn plotting_positions(n: usize) -> Vec<f64> {
    let a = if n <= 10 { 0.375 } else { 0.5 };
    let nf = n as f64;
    (1..=n)
        .map(|i| (i as f64 - a) / (nf + 1.0 - 2.0 * a))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxplot_flags_outlier() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 40.0];
        let b = BoxplotStats::of(&data).unwrap();
        assert_eq!(b.lower_hinge, 3.0);
        assert_eq!(b.upper_hinge, 8.0);
        assert_eq!(b.median, 5.5);
        assert_eq!(b.lower_whisker, 1.0);
        assert_eq!(b.upper_whisker, 9.0);
        assert_eq!(b.outliers, vec![40.0]);
    }

    #[test]
    fn test_boxplot_no_outliers() {
        let data = [25.5, 26.4, 22.4, 24.5, 24.8, 30.9, 26.4, 27.3, 29.4, 23.0];
        let b = BoxplotStats::of(&data).unwrap();
        assert!(b.outliers.is_empty());
        assert_eq!(b.lower_whisker, 22.4);
        assert_eq!(b.upper_whisker, 30.9);
    }

    #[test]
    fn test_plotting_positions() {
        let p = plotting_positions(3);
        // a = 3/8: (i - 0.375) / 3.25
        assert!((p[0] - 0.625 / 3.25).abs() < 1e-15);
        assert!((p[1] - 0.5).abs() < 1e-15);

        let p = plotting_positions(20);
        assert!((p[0] - 0.025).abs() < 1e-15);
        assert!((p[19] - 0.975).abs() < 1e-15);
    }

    #[test]
    fn test_qq_symmetric_positions() {
        let qq = QqPlot::of(&[3.0, 1.0, 2.0, 5.0, 4.0]).unwrap();
        assert_eq!(qq.sample, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(qq.theoretical[2].abs() < 1e-12);
        assert!((qq.theoretical[0] + qq.theoretical[4]).abs() < 1e-12);
        assert!(qq.line_slope > 0.0);
        // Symmetric data: the line passes through (0, median)
        assert!((qq.line_intercept - 3.0).abs() < 1e-9);
    }
}
