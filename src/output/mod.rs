//! Output formatting for reports.

mod json;
mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::{
    format_anova, format_forest, format_p, format_report, format_tukey, significance_stars,
    SEPARATOR,
};
