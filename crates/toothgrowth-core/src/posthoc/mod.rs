//! Post-hoc multiple comparisons after an ANOVA fit.

mod studentized_range;
mod tukey;

pub use studentized_range::StudentizedRange;
pub use tukey::{tukey_hsd, PairwiseComparison, TukeyTable};
