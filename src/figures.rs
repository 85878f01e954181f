//! Numbers behind the report's plots.
//!
//! Nothing is drawn here. Each struct is what a plotting front end needs:
//!
//! - boxplots of `len` by dose, by supplement and by cell
//! - a normal Q-Q plot of all observations
//! - interaction means (one line per supplement across doses)
//! - a grouped bar chart of cell means with standard-error bars
//!
//! The forest plot of pairwise differences is drawn straight from the Tukey
//! tables; see [`crate::output::format_forest`].

use serde::Serialize;
use toothgrowth_core::{BoxplotStats, QqPlot, StatsResult, Summary};

use crate::data::{Dataset, Dose, Supplement};

/// All figure data for one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct Figures {
    pub boxplots_by_dose: Vec<LabelledBoxplot>,
    pub boxplots_by_supp: Vec<LabelledBoxplot>,
    pub boxplots_by_cell: Vec<LabelledBoxplot>,
    pub qq: QqPlot,
    /// One point per cell; `supp` varies fastest.
    pub cell_means: Vec<CellMean>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelledBoxplot {
    pub group: String,
    pub stats: BoxplotStats,
}

/// Mean and standard error of one `supp x dose` cell. Serves both the
/// interaction plot (means) and the bar chart (means with error bars).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CellMean {
    pub supp: Supplement,
    pub dose: Dose,
    pub mean: f64,
    pub se: f64,
}

impl CellMean {
    /// Error bar as `(mean - se, mean + se)`.
    pub fn error_bar(&self) -> (f64, f64) {
        (self.mean - self.se, self.mean + self.se)
    }
}

impl Figures {
    pub fn build(dataset: &Dataset) -> StatsResult<Self> {
        let boxplots_by_dose: Vec<_> = dataset
            .by_dose()
            .into_iter()
            .map(|(d, g)| labelled(d.label().to_string(), &g))
            .collect::<StatsResult<_>>()?;
        let boxplots_by_supp: Vec<_> = dataset
            .by_supp()
            .into_iter()
            .map(|(s, g)| labelled(s.label().to_string(), &g))
            .collect::<StatsResult<_>>()?;

        let cells = dataset.cells();
        let boxplots_by_cell: Vec<_> = cells
            .iter()
            .map(|(s, d, g)| labelled(format!("{}:{}", s, d), g))
            .collect::<StatsResult<_>>()?;
        let cell_means: Vec<_> = cells
            .iter()
            .map(|(supp, dose, g)| {
                let summary = Summary::of(g)?;
                Ok(CellMean {
                    supp: *supp,
                    dose: *dose,
                    mean: summary.mean,
                    se: summary.se,
                })
            })
            .collect::<StatsResult<_>>()?;

        Ok(Self {
            boxplots_by_dose,
            boxplots_by_supp,
            boxplots_by_cell,
            qq: QqPlot::of(&dataset.response())?,
            cell_means,
        })
    }

    /// Interaction-plot series for one supplement: `(dose, mean)` in dose order.
    pub fn interaction_line(&self, supp: Supplement) -> Vec<(f64, f64)> {
        self.cell_means
            .iter()
            .filter(|c| c.supp == supp)
            .map(|c| (c.dose.mg_per_day(), c.mean))
            .collect()
    }
}

fn labelled(group: String, data: &[f64]) -> StatsResult<LabelledBoxplot> {
    Ok(LabelledBoxplot {
        group,
        stats: BoxplotStats::of(data)?,
    })
}
