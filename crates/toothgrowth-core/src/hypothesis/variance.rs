//! Levene's test for homogeneity of variance.
//!
//! Each observation is replaced by its absolute deviation from its group's
//! center, and a one-way ANOVA F statistic is computed on those deviations:
//!
//! ```text
//! z_ij = |y_ij - center_i|
//! F    = [Σ n_i (z̄_i - z̄)² / (k - 1)] / [Σ Σ (z_ij - z̄_i)² / (N - k)]
//! ```
//!
//! Centering on the group median (Brown & Forsythe 1974) is the robust
//! default; centering on the mean gives Levene's original test.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, StatsError, StatsResult};
use crate::statistics::{f_upper_tail, median};

/// Group center used to compute absolute deviations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Center {
    /// Brown-Forsythe variant, robust to non-normality.
    #[default]
    Median,
    /// Levene's original variant.
    Mean,
}

impl std::fmt::Display for Center {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Center::Median => write!(f, "median"),
            Center::Mean => write!(f, "mean"),
        }
    }
}

/// Result of a variance-homogeneity test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarianceTest {
    /// F statistic on the absolute deviations.
    pub statistic: f64,
    /// Numerator degrees of freedom, k - 1.
    pub df_between: usize,
    /// Denominator degrees of freedom, N - k.
    pub df_within: usize,
    /// P-value for H0: all group variances are equal.
    pub p_value: f64,
    pub center: Center,
}

impl VarianceTest {
    /// Whether homogeneity is rejected at level `alpha`.
    pub fn rejects_homogeneity(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Levene's test over `groups`, centering each on its median or mean.
///
/// # Errors
///
/// - `InsufficientData` for fewer than two groups or N <= k
/// - `EmptyGroup` if any group has no observations
/// - `NonFinite` for NaN or infinite values
/// - `ZeroRange` if every deviation is zero, which leaves F undefined
pub fn levene<G: AsRef<[f64]>>(groups: &[G], center: Center) -> StatsResult<VarianceTest> {
    const WHAT: &str = "Levene test";

    let k = groups.len();
    if k < 2 {
        return Err(StatsError::insufficient("Levene test groups", 2, k));
    }
    for (i, g) in groups.iter().enumerate() {
        let g = g.as_ref();
        if g.is_empty() {
            return Err(StatsError::EmptyGroup {
                group: format!("#{}", i + 1),
            });
        }
        ensure_finite(WHAT, g)?;
    }
    let total: usize = groups.iter().map(|g| g.as_ref().len()).sum();
    if total <= k {
        return Err(StatsError::insufficient(WHAT, k + 1, total));
    }

    let deviations: Vec<Vec<f64>> = groups
        .iter()
        .map(|g| {
            let g = g.as_ref();
            let c = match center {
                Center::Median => median(g),
                Center::Mean => g.iter().sum::<f64>() / g.len() as f64,
            };
            g.iter().map(|y| (y - c).abs()).collect()
        })
        .collect();

    let grand_mean = deviations.iter().flatten().sum::<f64>() / total as f64;
    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for z in &deviations {
        let zbar = z.iter().sum::<f64>() / z.len() as f64;
        ss_between += z.len() as f64 * (zbar - grand_mean) * (zbar - grand_mean);
        ss_within += z.iter().map(|v| (v - zbar) * (v - zbar)).sum::<f64>();
    }

    let df_between = k - 1;
    let df_within = total - k;
    if ss_within <= 0.0 {
        return Err(StatsError::ZeroRange { what: WHAT.into() });
    }

    let statistic = (ss_between / df_between as f64) / (ss_within / df_within as f64);
    let p_value = f_upper_tail(statistic, df_between as f64, df_within as f64)?;
    tracing::trace!(k, total, statistic, p_value, %center, "levene");

    Ok(VarianceTest {
        statistic,
        df_between,
        df_within,
        p_value,
        center,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells() -> Vec<Vec<f64>> {
        vec![
            vec![15.2, 21.5, 17.6, 9.7, 14.5, 10.0, 8.2, 9.4, 16.5, 9.7],
            vec![4.2, 11.5, 7.3, 5.8, 6.4, 10.0, 11.2, 11.2, 5.2, 7.0],
            vec![19.7, 23.3, 23.6, 26.4, 20.0, 25.2, 25.8, 21.2, 14.5, 27.3],
            vec![16.5, 16.5, 15.2, 17.3, 22.5, 17.3, 13.6, 14.5, 18.8, 15.5],
            vec![25.5, 26.4, 22.4, 24.5, 24.8, 30.9, 26.4, 27.3, 29.4, 23.0],
            vec![23.6, 18.5, 33.9, 25.5, 26.4, 32.5, 26.7, 21.5, 23.3, 29.5],
        ]
    }

    #[test]
    fn test_brown_forsythe_reference_values() {
        // Reference: F(5, 54) = 1.7086, p = 0.1484
        let result = levene(&cells(), Center::Median).unwrap();
        assert_eq!(result.df_between, 5);
        assert_eq!(result.df_within, 54);
        assert!(
            (result.statistic - 1.708578).abs() < 1e-5,
            "F = {}",
            result.statistic
        );
        assert!(
            (result.p_value - 0.148361).abs() < 1e-5,
            "p = {}",
            result.p_value
        );
        assert!(!result.rejects_homogeneity(0.05));
    }

    #[test]
    fn test_mean_centered_reference_values() {
        let result = levene(&cells(), Center::Mean).unwrap();
        assert!(
            (result.statistic - 1.940130).abs() < 1e-5,
            "F = {}",
            result.statistic
        );
        assert!(
            (result.p_value - 0.102730).abs() < 1e-5,
            "p = {}",
            result.p_value
        );
    }

    #[test]
    fn test_detects_unequal_spread() {
        let tight: Vec<f64> = (0..20).map(|i| 10.0 + 0.01 * (i % 5) as f64).collect();
        let wide: Vec<f64> = (0..20).map(|i| 10.0 + 5.0 * (i % 5) as f64).collect();
        let result = levene(&[tight, wide], Center::Median).unwrap();
        assert!(result.rejects_homogeneity(0.05), "p = {}", result.p_value);
    }

    #[test]
    fn test_rejects_bad_groups() {
        assert!(matches!(
            levene(&[vec![1.0, 2.0]], Center::Median),
            Err(StatsError::InsufficientData { .. })
        ));
        assert!(matches!(
            levene(&[vec![1.0, 2.0], vec![]], Center::Median),
            Err(StatsError::EmptyGroup { .. })
        ));
        assert!(matches!(
            levene(&[vec![1.0], vec![2.0]], Center::Median),
            Err(StatsError::InsufficientData { .. })
        ));
    }
}
