//! Descriptive summaries of a sample.

use serde::{Deserialize, Serialize};

use super::quantile::{quantile_sorted, sorted_copy};
use crate::error::{ensure_finite, StatsError, StatsResult};

/// Descriptive statistics for one sample.
///
/// Quartiles use the Type 7 definition; `sd` and `variance` use the
/// unbiased `n - 1` denominator and are zero for a single observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub n: usize,
    pub mean: f64,
    pub variance: f64,
    pub sd: f64,
    /// Standard error of the mean, `sd / sqrt(n)`.
    pub se: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Summary {
    /// Summarize a non-empty sample of finite values.
    pub fn of(data: &[f64]) -> StatsResult<Self> {
        if data.is_empty() {
            return Err(StatsError::insufficient("summary", 1, 0));
        }
        ensure_finite("summary", data)?;

        let n = data.len();
        let nf = n as f64;
        let mean = data.iter().sum::<f64>() / nf;
        let variance = if n > 1 {
            data.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
        } else {
            0.0
        };
        let sd = variance.sqrt();

        let sorted = sorted_copy(data);
        Ok(Self {
            n,
            mean,
            variance,
            sd,
            se: sd / nf.sqrt(),
            min: sorted[0],
            q1: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q3: quantile_sorted(&sorted, 0.75),
            max: sorted[n - 1],
        })
    }

    /// Interquartile range `q3 - q1`.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Sum of squared deviations from the mean.
pub fn sum_of_squares(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mean = data.iter().sum::<f64>() / data.len() as f64;
    data.iter().map(|x| (x - mean) * (x - mean)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_known_values() {
        // VC at 0.5 mg/day
        let data = [4.2, 11.5, 7.3, 5.8, 6.4, 10.0, 11.2, 11.2, 5.2, 7.0];
        let s = Summary::of(&data).unwrap();
        assert_eq!(s.n, 10);
        assert!((s.mean - 7.98).abs() < 1e-12);
        assert!((s.sd - 2.746634).abs() < 1e-6);
        assert!((s.se - 0.868562).abs() < 1e-6);
        assert_eq!(s.min, 4.2);
        assert_eq!(s.max, 11.5);
        assert!((s.median - 7.15).abs() < 1e-12);
        assert!((s.q1 - 5.95).abs() < 1e-12);
        assert!((s.q3 - 10.9).abs() < 1e-12);
    }

    #[test]
    fn test_summary_single_observation() {
        let s = Summary::of(&[3.0]).unwrap();
        assert_eq!(s.variance, 0.0);
        assert_eq!(s.sd, 0.0);
        assert_eq!(s.iqr(), 0.0);
    }

    #[test]
    fn test_summary_rejects_empty_and_nan() {
        assert!(matches!(
            Summary::of(&[]),
            Err(StatsError::InsufficientData { .. })
        ));
        assert!(matches!(
            Summary::of(&[1.0, f64::NAN]),
            Err(StatsError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_sum_of_squares() {
        assert!((sum_of_squares(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-12);
        assert_eq!(sum_of_squares(&[]), 0.0);
    }
}
