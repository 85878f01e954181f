//! Tukey's honest significant difference.
//!
//! For groups i < j of a model term, with group means ȳ and sizes n:
//!
//! ```text
//! diff = ȳ_j - ȳ_i
//! se   = sqrt(MSE / 2 * (1/n_i + 1/n_j))
//! CI   = diff ± q(conf; k, df) * se
//! p    = P(Q_{k,df} > |diff| / se)
//! ```
//!
//! MSE and df come from the residual line of the fitted model. With unequal
//! group sizes this is the Tukey-Kramer approximation.

use serde::{Deserialize, Serialize};

use super::StudentizedRange;
use crate::anova::AnovaFit;
use crate::error::{ensure_probability, StatsError, StatsResult};

/// One pairwise contrast between two levels of a term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseComparison {
    /// `later-earlier` in level order, e.g. `2-0.5`.
    pub group_pair: String,
    /// Mean of the later level minus mean of the earlier level.
    pub mean_difference: f64,
    pub lower_ci: f64,
    pub upper_ci: f64,
    /// Family-wise adjusted p-value.
    pub adjusted_p_value: f64,
    /// Standard error of the contrast, on the studentized range scale.
    pub std_error: f64,
}

impl PairwiseComparison {
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.adjusted_p_value < alpha
    }

    /// Half the width of the confidence interval.
    pub fn half_width(&self) -> f64 {
        0.5 * (self.upper_ci - self.lower_ci)
    }
}

/// All pairwise comparisons for one term of a fitted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TukeyTable {
    /// Term label, e.g. `dose` or `supp:dose`.
    pub term: String,
    pub conf_level: f64,
    /// Studentized range quantile `q(conf; k, df)`.
    pub critical_value: f64,
    /// Number of groups compared.
    pub num_groups: usize,
    pub df_residual: usize,
    pub comparisons: Vec<PairwiseComparison>,
}

impl TukeyTable {
    pub fn comparison(&self, group_pair: &str) -> Option<&PairwiseComparison> {
        self.comparisons.iter().find(|c| c.group_pair == group_pair)
    }

    /// Comparisons whose adjusted p-value is below `alpha`.
    pub fn significant(&self, alpha: f64) -> impl Iterator<Item = &PairwiseComparison> {
        self.comparisons
            .iter()
            .filter(move |c| c.is_significant(alpha))
    }
}

/// Tukey HSD for the `term_index`-th term of `fit`'s formula.
///
/// # Errors
///
/// - `InvalidFormula` if `term_index` is out of range
/// - `InvalidProbability` if `conf_level` is outside (0, 1)
/// - `InsufficientData` if the term has fewer than two levels
/// - `EmptyGroup` if any level has no observations
pub fn tukey_hsd(fit: &AnovaFit, term_index: usize, conf_level: f64) -> StatsResult<TukeyTable> {
    ensure_probability("confidence level", conf_level)?;
    let term = fit
        .formula()
        .terms()
        .get(term_index)
        .copied()
        .ok_or_else(|| {
            StatsError::InvalidFormula(format!(
                "term index {} out of range for {} terms",
                term_index,
                fit.formula().terms().len()
            ))
        })?;

    let grouping = term.grouping(fit.factors())?;
    let groups = grouping.split(fit.response())?;
    let k = groups.len();
    if k < 2 {
        return Err(StatsError::insufficient(
            format!("Tukey HSD on '{}' (levels)", grouping.name()),
            2,
            k,
        ));
    }
    if let Some(i) = groups.iter().position(|g| g.is_empty()) {
        return Err(StatsError::EmptyGroup {
            group: grouping.levels()[i].clone(),
        });
    }

    let means: Vec<f64> = groups
        .iter()
        .map(|g| g.iter().sum::<f64>() / g.len() as f64)
        .collect();
    let mse = fit.mse();
    let df = fit.df_residual();
    let dist = StudentizedRange::new(k, df as f64)?;
    let critical_value = dist.inverse_cdf(conf_level)?;
    let levels = grouping.levels();

    let mut comparisons = Vec::with_capacity(k * (k - 1) / 2);
    for i in 0..k {
        for j in (i + 1)..k {
            let (ni, nj) = (groups[i].len() as f64, groups[j].len() as f64);
            let diff = means[j] - means[i];
            let se = (mse / 2.0 * (1.0 / ni + 1.0 / nj)).sqrt();
            let half = critical_value * se;
            let adjusted_p_value = if se > 0.0 {
                dist.sf(diff.abs() / se)
            } else {
                0.0
            };
            comparisons.push(PairwiseComparison {
                group_pair: format!("{}-{}", levels[j], levels[i]),
                mean_difference: diff,
                lower_ci: diff - half,
                upper_ci: diff + half,
                adjusted_p_value,
                std_error: se,
            });
        }
    }
    tracing::debug!(
        term = grouping.name(),
        k,
        df,
        critical_value,
        "tukey hsd"
    );

    Ok(TukeyTable {
        term: grouping.name().to_string(),
        conf_level,
        critical_value,
        num_groups: k,
        df_residual: df,
        comparisons,
    })
}
