//! Model formulas over categorical factors.

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};
use crate::factor::Factor;

/// One term of a linear model, referring to factors by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// Main effect of a single factor.
    Main(usize),
    /// Two-way interaction between two distinct factors.
    Interaction(usize, usize),
}

impl Term {
    /// Display label, e.g. `supp` or `supp:dose`.
    pub fn label(&self, factors: &[Factor]) -> String {
        let name = |i: usize| {
            factors
                .get(i)
                .map(|f| f.name().to_string())
                .unwrap_or_else(|| format!("#{}", i))
        };
        match *self {
            Term::Main(a) => name(a),
            Term::Interaction(a, b) => format!("{}:{}", name(a), name(b)),
        }
    }

    /// The grouping this term induces: the factor itself, or the crossed
    /// factor for an interaction.
    pub fn grouping(&self, factors: &[Factor]) -> StatsResult<Factor> {
        let get = |i: usize| {
            factors.get(i).ok_or_else(|| {
                StatsError::InvalidFormula(format!(
                    "factor index {} out of range for {} factors",
                    i,
                    factors.len()
                ))
            })
        };
        match *self {
            Term::Main(a) => Ok(get(a)?.clone()),
            Term::Interaction(a, b) => get(a)?.interaction(get(b)?),
        }
    }

    fn factor_indices(&self) -> Vec<usize> {
        match *self {
            Term::Main(a) => vec![a],
            Term::Interaction(a, b) => vec![a, b],
        }
    }
}

/// Ordered list of terms on the right-hand side of a model.
///
/// Order matters: sums of squares are sequential, each term adjusted only
/// for the terms before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFormula {
    terms: Vec<Term>,
}

impl ModelFormula {
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    /// One-factor model `y ~ a`.
    pub fn main(a: usize) -> Self {
        Self::new(vec![Term::Main(a)])
    }

    /// Additive two-factor model `y ~ a + b`.
    pub fn additive(a: usize, b: usize) -> Self {
        Self::new(vec![Term::Main(a), Term::Main(b)])
    }

    /// Full two-factor model `y ~ a * b`, i.e. `a + b + a:b`.
    pub fn crossed(a: usize, b: usize) -> Self {
        Self::new(vec![Term::Main(a), Term::Main(b), Term::Interaction(a, b)])
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Right-hand side as text, e.g. `supp + dose + supp:dose`.
    pub fn describe(&self, factors: &[Factor]) -> String {
        self.terms
            .iter()
            .map(|t| t.label(factors))
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// Check the formula can be fitted against `num_factors` factors.
    ///
    /// Interactions are coded as products of treatment contrasts, which only
    /// spans the right space when both main effects precede the interaction.
    pub fn validate(&self, num_factors: usize) -> StatsResult<()> {
        if self.terms.is_empty() {
            return Err(StatsError::InvalidFormula("formula has no terms".into()));
        }
        for (i, term) in self.terms.iter().enumerate() {
            if let Some(&bad) = term.factor_indices().iter().find(|&&f| f >= num_factors) {
                return Err(StatsError::InvalidFormula(format!(
                    "factor index {} out of range for {} factors",
                    bad, num_factors
                )));
            }
            if self.terms[..i].contains(term) {
                return Err(StatsError::InvalidFormula(format!(
                    "term {:?} appears more than once",
                    term
                )));
            }
            if let Term::Interaction(a, b) = *term {
                if a == b {
                    return Err(StatsError::InvalidFormula(
                        "interaction of a factor with itself".into(),
                    ));
                }
                let earlier = &self.terms[..i];
                if !earlier.contains(&Term::Main(a)) || !earlier.contains(&Term::Main(b)) {
                    return Err(StatsError::InvalidFormula(
                        "interaction terms must follow both main effects".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}
