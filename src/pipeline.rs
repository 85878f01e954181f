//! The fixed sequence of analysis stages.
//!
//! ```text
//! Descriptive -> Normality -> Homogeneity -> Anova -> PostHoc
//! ```
//!
//! The descriptive stage also builds the figure data. Each stage only reads
//! the dataset and, for post-hoc, the fitted interaction model. The first
//! failing stage aborts the run and is named in the returned
//! [`PipelineError`]. Assumption-check rejections are not failures; they
//! are logged and carried in the report.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use toothgrowth_core::{
    fit_anova, levene, shapiro_wilk, tukey_hsd, AnovaFit, Factor, ModelFormula, StatsError,
    StatsResult, Summary,
};

use crate::config::Config;
use crate::data::Dataset;
use crate::figures::Figures;
use crate::result::{
    DatasetInfo, Descriptive, GroupNormality, GroupSummary, Homogeneity, Models, Normality,
    PostHoc, Report,
};

/// Factor indices in the order passed to [`fit_anova`].
const SUPP: usize = 0;
const DOSE: usize = 1;

/// One step of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Descriptive,
    Normality,
    Homogeneity,
    Anova,
    PostHoc,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Descriptive => "descriptive statistics",
            Stage::Normality => "normality check",
            Stage::Homogeneity => "variance homogeneity check",
            Stage::Anova => "ANOVA",
            Stage::PostHoc => "post-hoc comparisons",
        };
        f.write_str(name)
    }
}

/// A statistical routine refused its input during `stage`.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: StatsError,
}

trait AtStage<T> {
    fn at(self, stage: Stage) -> Result<T, PipelineError>;
}

impl<T> AtStage<T> for StatsResult<T> {
    fn at(self, stage: Stage) -> Result<T, PipelineError> {
        self.map_err(|source| PipelineError { stage, source })
    }
}

/// Run every stage on `dataset` and collect the results.
///
/// # Errors
///
/// Returns the first stage whose statistical routine fails, e.g. an empty
/// `supp x dose` cell or a constant group.
pub fn run(dataset: &Dataset, config: &Config) -> Result<Report, PipelineError> {
    tracing::info!(source = dataset.source(), n = dataset.len(), "starting report");

    let descriptive = describe(dataset).at(Stage::Descriptive)?;
    let figures = Figures::build(dataset).at(Stage::Descriptive)?;
    tracing::info!(stage = %Stage::Descriptive, "stage complete");

    let normality = check_normality(dataset, config).at(Stage::Normality)?;
    tracing::info!(stage = %Stage::Normality, "stage complete");

    let homogeneity = check_homogeneity(dataset, config).at(Stage::Homogeneity)?;
    tracing::info!(stage = %Stage::Homogeneity, "stage complete");

    let anova = fit_models(dataset).at(Stage::Anova)?;
    tracing::info!(stage = %Stage::Anova, "stage complete");

    let post_hoc = compare_pairs(&anova.interaction, config).at(Stage::PostHoc)?;
    tracing::info!(stage = %Stage::PostHoc, "stage complete");

    Ok(Report {
        dataset: DatasetInfo {
            source: dataset.source().to_string(),
            n: dataset.len(),
        },
        config: config.clone(),
        descriptive,
        normality,
        homogeneity,
        anova,
        post_hoc,
        figures,
    })
}

fn describe(dataset: &Dataset) -> StatsResult<Descriptive> {
    let group = |label: String, data: &[f64]| -> StatsResult<GroupSummary> {
        Ok(GroupSummary {
            group: label,
            summary: Summary::of(data)?,
        })
    };

    let overall = Summary::of(&dataset.response())?;
    tracing::debug!(n = overall.n, mean = overall.mean, sd = overall.sd, "overall summary");

    Ok(Descriptive {
        overall,
        by_supp: dataset
            .by_supp()
            .into_iter()
            .map(|(s, g)| group(s.to_string(), &g))
            .collect::<StatsResult<_>>()?,
        by_dose: dataset
            .by_dose()
            .into_iter()
            .map(|(d, g)| group(d.to_string(), &g))
            .collect::<StatsResult<_>>()?,
        by_cell: dataset
            .cells()
            .into_iter()
            .map(|(s, d, g)| group(format!("{}:{}", s, d), &g))
            .collect::<StatsResult<_>>()?,
    })
}

fn check_normality(dataset: &Dataset, config: &Config) -> StatsResult<Normality> {
    let overall = shapiro_wilk(&dataset.response())?;
    tracing::debug!(w = overall.statistic, p = overall.p_value, "shapiro-wilk, all observations");
    if overall.rejects_normality(config.alpha) {
        tracing::warn!(p = overall.p_value, "normality rejected for all observations");
    }

    let mut by_cell = Vec::new();
    for (supp, dose, values) in dataset.cells() {
        let group = format!("{}:{}", supp, dose);
        let test = shapiro_wilk(&values)?;
        tracing::debug!(cell = %group, w = test.statistic, p = test.p_value, "shapiro-wilk");
        if test.rejects_normality(config.alpha) {
            tracing::warn!(cell = %group, p = test.p_value, "normality rejected");
        }
        by_cell.push(GroupNormality { group, test });
    }

    Ok(Normality { overall, by_cell })
}

fn check_homogeneity(dataset: &Dataset, config: &Config) -> StatsResult<Homogeneity> {
    let center = config.levene_center;
    let supp_groups: Vec<Vec<f64>> = dataset.by_supp().into_iter().map(|(_, g)| g).collect();
    let dose_groups: Vec<Vec<f64>> = dataset.by_dose().into_iter().map(|(_, g)| g).collect();
    let cell_groups: Vec<Vec<f64>> = dataset.cells().into_iter().map(|(_, _, g)| g).collect();

    let by_supp = levene(&supp_groups, center)?;
    let by_dose = levene(&dose_groups, center)?;
    let by_cell = levene(&cell_groups, center)?;

    let result = Homogeneity {
        by_supp,
        by_dose,
        by_cell,
    };
    for (grouping, test) in result.labelled() {
        tracing::debug!(grouping, f = test.statistic, p = test.p_value, "levene");
        if test.rejects_homogeneity(config.alpha) {
            tracing::warn!(grouping, p = test.p_value, "equal variances rejected");
        }
    }
    Ok(result)
}

fn fit_models(dataset: &Dataset) -> StatsResult<Models> {
    let response = dataset.response();
    let factors: [Factor; 2] = [dataset.supp_factor()?, dataset.dose_factor()?];
    let fit = |formula: ModelFormula| -> StatsResult<AnovaFit> {
        let fit = fit_anova(&response, &factors, &formula)?;
        tracing::debug!(
            formula = %fit.formula_label,
            rss = fit.residual.sum_sq,
            df = fit.df_residual(),
            "fitted model"
        );
        Ok(fit)
    };

    Ok(Models {
        supp: fit(ModelFormula::main(SUPP))?,
        dose: fit(ModelFormula::main(DOSE))?,
        additive: fit(ModelFormula::additive(SUPP, DOSE))?,
        interaction: fit(ModelFormula::crossed(SUPP, DOSE))?,
    })
}

fn compare_pairs(fit: &AnovaFit, config: &Config) -> StatsResult<PostHoc> {
    // Terms of `supp * dose`: supp, dose, supp:dose
    let table = |term: usize| tukey_hsd(fit, term, config.conf_level);
    Ok(PostHoc {
        supp: table(0)?,
        dose: table(1)?,
        interaction: table(2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dose, Observation, Supplement};

    #[test]
    fn test_run_on_embedded_data() {
        let report = run(&Dataset::tooth_growth(), &Config::default()).unwrap();
        assert_eq!(report.dataset.n, 60);
        assert_eq!(report.descriptive.by_cell.len(), 6);
        assert_eq!(report.normality.by_cell.len(), 6);
        assert_eq!(report.post_hoc.interaction.comparisons.len(), 15);
        assert_eq!(
            report.significant_terms(),
            vec!["supp", "dose", "supp:dose"]
        );
        assert!(report.warnings().is_empty());
    }

    #[test]
    fn test_failure_names_stage() {
        // A constant cell passes loading but Shapiro-Wilk refuses it.
        let mut observations = Dataset::tooth_growth().observations().to_vec();
        for o in observations
            .iter_mut()
            .filter(|o| o.supp == Supplement::OJ && o.dose == Dose::High)
        {
            o.len = 25.0;
        }
        let err = run(&Dataset::new(observations, "constant"), &Config::default()).unwrap_err();
        assert_eq!(err.stage, Stage::Normality);
        assert!(matches!(err.source, StatsError::ZeroRange { .. }));
        assert!(err.to_string().starts_with("normality check failed"));
    }

    #[test]
    fn test_empty_cell_fails_descriptive_stage() {
        let observations: Vec<Observation> = Dataset::tooth_growth()
            .observations()
            .iter()
            .copied()
            .filter(|o| !(o.supp == Supplement::VC && o.dose == Dose::Medium))
            .collect();
        let err = run(&Dataset::new(observations, "missing cell"), &Config::default())
            .unwrap_err();
        assert_eq!(err.stage, Stage::Descriptive);
    }

    #[test]
    fn test_figure_data_belongs_to_descriptive_stage() {
        let observations = vec![Observation {
            len: f64::NAN,
            supp: Supplement::OJ,
            dose: Dose::Low,
        }];
        let dataset = Dataset::new(observations, "nan");
        assert!(Figures::build(&dataset).is_err());
        let err = run(&dataset, &Config::default()).unwrap_err();
        assert_eq!(err.stage, Stage::Descriptive);
        assert!(err.to_string().starts_with("descriptive statistics failed"));
    }
}
