//! Assumption checks run before fitting ANOVA models.
//!
//! Both tests are advisory: a rejection is reported but never stops the
//! analysis.

mod normality;
mod variance;

pub use normality::{shapiro_wilk, NormalityTest};
pub use variance::{levene, Center, VarianceTest};
