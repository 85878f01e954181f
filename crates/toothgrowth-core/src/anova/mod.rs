//! Linear models with categorical factors and sequential ANOVA tables.
//!
//! A model is fitted term by term. Each term's sum of squares is the
//! reduction in residual sum of squares it brings on top of the terms before
//! it (Type I sums of squares), so for unbalanced data the table depends on
//! term order. For balanced designs such as a full factorial with equal cell
//! sizes, the order does not matter.
//!
//! Least squares uses an SVD of the treatment-coded design matrix, which
//! also yields its numerical rank and so each term's degrees of freedom.

mod design;
mod fit;
mod formula;

pub use fit::{fit_anova, AnovaFit, AnovaRow, ResidualRow};
pub use formula::{ModelFormula, Term};
