//! Treatment-coded design matrices.

use nalgebra::DMatrix;

use super::formula::Term;
use crate::factor::Factor;

/// Build `[1 | term columns...]` for the given terms.
///
/// Main effects get one indicator column per non-reference level; an
/// interaction gets the products of its factors' non-reference indicators.
/// The first level of each factor is the reference.
pub(crate) fn design_matrix(factors: &[Factor], terms: &[Term], n: usize) -> DMatrix<f64> {
    let mut columns: Vec<Vec<f64>> = vec![vec![1.0; n]];
    for term in terms {
        columns.extend(term_columns(factors, *term));
    }
    DMatrix::from_fn(n, columns.len(), |r, c| columns[c][r])
}

fn term_columns(factors: &[Factor], term: Term) -> Vec<Vec<f64>> {
    match term {
        Term::Main(a) => {
            let fa = &factors[a];
            (1..fa.num_levels())
                .map(|level| indicator(fa, level).collect())
                .collect()
        }
        Term::Interaction(a, b) => {
            let (fa, fb) = (&factors[a], &factors[b]);
            let mut cols = Vec::new();
            for lb in 1..fb.num_levels() {
                for la in 1..fa.num_levels() {
                    cols.push(
                        indicator(fa, la)
                            .zip(indicator(fb, lb))
                            .map(|(x, y)| x * y)
                            .collect(),
                    );
                }
            }
            cols
        }
    }
}

fn indicator(factor: &Factor, level: usize) -> impl Iterator<Item = f64> + '_ {
    factor
        .codes()
        .iter()
        .map(move |&c| if c == level { 1.0 } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_matrix_shape_and_coding() {
        let a = Factor::from_labels("a", &["p", "q", "p", "q"]);
        let b = Factor::from_labels("b", &["x", "y", "y", "z"]);
        let factors = [a, b];
        let terms = [Term::Main(0), Term::Main(1), Term::Interaction(0, 1)];
        let x = design_matrix(&factors, &terms, 4);

        // intercept + 1 (a) + 2 (b) + 1*2 (a:b)
        assert_eq!(x.shape(), (4, 6));
        assert!(x.column(0).iter().all(|&v| v == 1.0));
        // a = q indicator
        assert_eq!(x.column(1).as_slice(), &[0.0, 1.0, 0.0, 1.0]);
        // b = y and b = z indicators
        assert_eq!(x.column(2).as_slice(), &[0.0, 1.0, 1.0, 0.0]);
        assert_eq!(x.column(3).as_slice(), &[0.0, 0.0, 0.0, 1.0]);
        // q:y and q:z
        assert_eq!(x.column(4).as_slice(), &[0.0, 1.0, 0.0, 0.0]);
        assert_eq!(x.column(5).as_slice(), &[0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_intercept_only() {
        let x = design_matrix(&[], &[], 3);
        assert_eq!(x.shape(), (3, 1));
    }
}
