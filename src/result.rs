//! The report produced by a pipeline run.
//!
//! Every type here derives `Serialize`, so the whole report can be written
//! as JSON, and holds numbers only: formatting lives in [`crate::output`].

use serde::Serialize;
use toothgrowth_core::{AnovaFit, NormalityTest, Summary, TukeyTable, VarianceTest};

use crate::config::Config;
use crate::figures::Figures;

/// Complete output of [`crate::run`].
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub dataset: DatasetInfo,
    pub config: Config,
    pub descriptive: Descriptive,
    pub normality: Normality,
    pub homogeneity: Homogeneity,
    pub anova: Models,
    pub post_hoc: PostHoc,
    pub figures: Figures,
}

impl Report {
    /// Advisory findings: assumption checks rejected at `config.alpha`.
    ///
    /// None of these stop the analysis.
    pub fn warnings(&self) -> Vec<String> {
        let alpha = self.config.alpha;
        let mut out = Vec::new();
        if self.normality.overall.rejects_normality(alpha) {
            out.push(format!(
                "normality rejected for all observations (p = {:.5})",
                self.normality.overall.p_value
            ));
        }
        for cell in &self.normality.by_cell {
            if cell.test.rejects_normality(alpha) {
                out.push(format!(
                    "normality rejected in cell {} (p = {:.5})",
                    cell.group, cell.test.p_value
                ));
            }
        }
        for (name, test) in self.homogeneity.labelled() {
            if test.rejects_homogeneity(alpha) {
                out.push(format!(
                    "equal variances rejected across {} (p = {:.5})",
                    name, test.p_value
                ));
            }
        }
        out
    }

    /// Labels of interaction-model terms significant at `config.alpha`.
    pub fn significant_terms(&self) -> Vec<&str> {
        self.anova
            .interaction
            .rows
            .iter()
            .filter(|r| r.is_significant(self.config.alpha))
            .map(|r| r.label.as_str())
            .collect()
    }
}

/// Where the data came from and its size.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    pub source: String,
    pub n: usize,
}

/// A summary tagged with its group label.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub group: String,
    pub summary: Summary,
}

/// A normality test tagged with its group label.
#[derive(Debug, Clone, Serialize)]
pub struct GroupNormality {
    pub group: String,
    pub test: NormalityTest,
}

/// Summary statistics overall and by every grouping.
#[derive(Debug, Clone, Serialize)]
pub struct Descriptive {
    pub overall: Summary,
    pub by_supp: Vec<GroupSummary>,
    pub by_dose: Vec<GroupSummary>,
    /// `supp:dose` cells, `supp` varying fastest.
    pub by_cell: Vec<GroupSummary>,
}

/// Shapiro-Wilk on the whole response and on every cell.
#[derive(Debug, Clone, Serialize)]
pub struct Normality {
    pub overall: NormalityTest,
    pub by_cell: Vec<GroupNormality>,
}

/// Levene tests for each grouping.
#[derive(Debug, Clone, Serialize)]
pub struct Homogeneity {
    pub by_supp: VarianceTest,
    pub by_dose: VarianceTest,
    pub by_cell: VarianceTest,
}

impl Homogeneity {
    pub fn labelled(&self) -> [(&'static str, &VarianceTest); 3] {
        [
            ("supp", &self.by_supp),
            ("dose", &self.by_dose),
            ("supp:dose", &self.by_cell),
        ]
    }
}

/// The four fitted models, smallest first.
#[derive(Debug, Clone, Serialize)]
pub struct Models {
    /// `len ~ supp`
    pub supp: AnovaFit,
    /// `len ~ dose`
    pub dose: AnovaFit,
    /// `len ~ supp + dose`
    pub additive: AnovaFit,
    /// `len ~ supp * dose`
    pub interaction: AnovaFit,
}

impl Models {
    pub fn all(&self) -> [&AnovaFit; 4] {
        [&self.supp, &self.dose, &self.additive, &self.interaction]
    }
}

/// Tukey HSD for every term of the interaction model.
#[derive(Debug, Clone, Serialize)]
pub struct PostHoc {
    pub supp: TukeyTable,
    pub dose: TukeyTable,
    pub interaction: TukeyTable,
}

impl PostHoc {
    pub fn all(&self) -> [&TukeyTable; 3] {
        [&self.supp, &self.dose, &self.interaction]
    }
}
