//! Sequential least-squares fitting.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use super::design::design_matrix;
use super::formula::{ModelFormula, Term};
use crate::constants::RANK_TOLERANCE;
use crate::error::{ensure_finite, StatsError, StatsResult};
use crate::factor::Factor;
use crate::statistics::{f_upper_tail, sum_of_squares};

/// One line of an ANOVA table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnovaRow {
    pub term: Term,
    /// Display label such as `supp:dose`.
    pub label: String,
    pub df: usize,
    /// Sequential sum of squares, adjusted for the terms above it only.
    pub sum_sq: f64,
    pub mean_sq: f64,
    pub f_statistic: f64,
    pub p_value: f64,
}

impl AnovaRow {
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Residual line of an ANOVA table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResidualRow {
    pub df: usize,
    pub sum_sq: f64,
    pub mean_sq: f64,
}

/// A fitted sequential ANOVA model.
///
/// Keeps its response and factors so post-hoc procedures can regroup the
/// data without the caller threading them through again.
#[derive(Debug, Clone, Serialize)]
pub struct AnovaFit {
    /// Right-hand side of the model, e.g. `supp + dose`.
    pub formula_label: String,
    pub rows: Vec<AnovaRow>,
    pub residual: ResidualRow,
    /// Corrected total sum of squares.
    pub total_sum_sq: f64,
    pub n: usize,
    #[serde(skip)]
    formula: ModelFormula,
    #[serde(skip)]
    response: Vec<f64>,
    #[serde(skip)]
    factors: Vec<Factor>,
}

impl AnovaFit {
    /// Row for the term labelled `label`, if the model has one.
    pub fn row(&self, label: &str) -> Option<&AnovaRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Residual mean square, the error variance estimate.
    pub fn mse(&self) -> f64 {
        self.residual.mean_sq
    }

    pub fn df_residual(&self) -> usize {
        self.residual.df
    }

    pub fn formula(&self) -> &ModelFormula {
        &self.formula
    }

    pub fn response(&self) -> &[f64] {
        &self.response
    }

    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }
}

/// Fit `response ~ formula` and compute the sequential (Type I) ANOVA table.
///
/// Each term's sum of squares is the drop in residual sum of squares when
/// it is added to the model containing every term listed before it, and its
/// degrees of freedom are the increase in design-matrix rank. Factors use
/// treatment coding with the first level as reference.
///
/// # Errors
///
/// - `InsufficientData` for an empty response
/// - `NonFinite` for NaN or infinite responses
/// - `LengthMismatch` if a factor's length differs from the response
/// - `InvalidFormula` if the formula fails [`ModelFormula::validate`]
/// - `AliasedTerm` if a term adds no rank to the model
/// - `NoResidualDf` if the full model is saturated
pub fn fit_anova(
    response: &[f64],
    factors: &[Factor],
    formula: &ModelFormula,
) -> StatsResult<AnovaFit> {
    let n = response.len();
    if n == 0 {
        return Err(StatsError::insufficient("ANOVA", 2, 0));
    }
    ensure_finite("ANOVA response", response)?;
    for f in factors {
        f.check_len(n)?;
    }
    formula.validate(factors.len())?;

    let y = DVector::from_column_slice(response);
    let total_sum_sq = sum_of_squares(response);

    // Intercept-only model: RSS is the corrected total, rank 1.
    let mut prev_rss = total_sum_sq;
    let mut prev_rank = 1usize;
    let mut partial = Vec::with_capacity(formula.terms().len());

    for (i, term) in formula.terms().iter().enumerate() {
        let label = term.label(factors);
        let x = design_matrix(factors, &formula.terms()[..=i], n);
        let (rss, rank) = least_squares(x, &y)?;
        let df = rank.saturating_sub(prev_rank);
        if df == 0 {
            return Err(StatsError::AliasedTerm { term: label });
        }
        let sum_sq = prev_rss - rss;
        tracing::debug!(term = %label, df, sum_sq, rss, "sequential term");
        partial.push((*term, label, df, sum_sq));
        prev_rss = rss;
        prev_rank = rank;
    }

    if prev_rank >= n {
        return Err(StatsError::NoResidualDf);
    }
    let df_residual = n - prev_rank;
    let residual = ResidualRow {
        df: df_residual,
        sum_sq: prev_rss,
        mean_sq: prev_rss / df_residual as f64,
    };

    let rows = partial
        .into_iter()
        .map(|(term, label, df, sum_sq)| {
            let mean_sq = sum_sq / df as f64;
            let f_statistic = if residual.mean_sq > 0.0 {
                mean_sq / residual.mean_sq
            } else {
                f64::INFINITY
            };
            let p_value = f_upper_tail(f_statistic, df as f64, df_residual as f64)?;
            Ok(AnovaRow {
                term,
                label,
                df,
                sum_sq,
                mean_sq,
                f_statistic,
                p_value,
            })
        })
        .collect::<StatsResult<Vec<_>>>()?;

    Ok(AnovaFit {
        formula_label: formula.describe(factors),
        rows,
        residual,
        total_sum_sq,
        n,
        formula: formula.clone(),
        response: response.to_vec(),
        factors: factors.to_vec(),
    })
}

/// Residual sum of squares and rank of the least-squares fit of `y` on `x`.
fn least_squares(x: DMatrix<f64>, y: &DVector<f64>) -> StatsResult<(f64, usize)> {
    let fitted_on = x.clone();
    let svd = x.svd(true, true);
    let eps = RANK_TOLERANCE * svd.singular_values.max();
    let rank = svd.rank(eps);
    let beta = svd
        .solve(y, eps)
        .map_err(|e| StatsError::LinearAlgebra(e.to_string()))?;
    let residuals = y - fitted_on * beta;
    Ok((residuals.norm_squared(), rank))
}
