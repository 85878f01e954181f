//! Sample quantiles.
//!
//! Two definitions are provided, matching what the report's figures and
//! summaries need:
//!
//! **Type 7** (Hyndman & Fan 1996, the default of most statistics packages),
//! for sorted sample x of size n at probability p:
//! ```text
//! h = (n - 1) * p
//! q = x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])
//! ```
//!
//! **Tukey's five-number summary** (hinges), used for boxplots:
//! ```text
//! n4 = floor((n + 3) / 2) / 2
//! d  = [1, n4, (n + 1) / 2, n + 1 - n4, n]      (1-based depths)
//! q  = (x[floor(d)] + x[ceil(d)]) / 2
//! ```
//!
//! # Input Requirements
//!
//! All input data must be finite. In debug builds this is checked via
//! assertions; public entry points in other modules reject non-finite data
//! with an error before reaching here.
//!
//! # Reference
//!
//! Hyndman, R. J. & Fan, Y. (1996). "Sample quantiles in statistical packages."
//! The American Statistician 50(4):361–365.

/// Debug assertion that all values in the slice are finite.
#[inline]
fn debug_assert_finite(data: &[f64]) {
    debug_assert!(
        data.iter().all(|x| x.is_finite()),
        "quantile input must be finite (no NaN or infinity)"
    );
}

/// Return a sorted copy of `data`.
pub fn sorted_copy(data: &[f64]) -> Vec<f64> {
    debug_assert_finite(data);
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    sorted
}

/// Type 7 quantile of an already sorted slice.
///
/// # Panics
///
/// Panics if `sorted` is empty or if `p` is outside [0, 1].
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "Cannot compute quantile of empty slice");
    assert!(
        (0.0..=1.0).contains(&p),
        "Quantile probability must be in [0, 1]"
    );

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;

    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Type 7 quantile of an unsorted slice.
///
/// # Panics
///
/// Panics if `data` is empty or if `p` is outside [0, 1].
pub fn compute_quantile(data: &[f64], p: f64) -> f64 {
    assert!(!data.is_empty(), "Cannot compute quantile of empty slice");
    quantile_sorted(&sorted_copy(data), p)
}

/// Median of an unsorted slice.
///
/// Uses `select_nth_unstable_by` on a scratch copy, O(n) expected.
///
/// # Panics
///
/// Panics if `data` is empty.
pub fn median(data: &[f64]) -> f64 {
    assert!(!data.is_empty(), "Cannot compute median of empty slice");
    debug_assert_finite(data);

    let mut work = data.to_vec();
    let n = work.len();
    let cmp = |a: &f64, b: &f64| a.total_cmp(b);

    let (_, upper, _) = work.select_nth_unstable_by(n / 2, cmp);
    let upper = *upper;
    if n % 2 == 1 {
        return upper;
    }

    // Even n: the lower middle is the max of the left partition
    let lower = work[..n / 2]
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    (lower + upper) / 2.0
}

/// Tukey's five-number summary `[min, lower hinge, median, upper hinge, max]`
/// of an already sorted slice.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn fivenum_sorted(sorted: &[f64]) -> [f64; 5] {
    assert!(!sorted.is_empty(), "Cannot compute fivenum of empty slice");

    let n = sorted.len() as f64;
    let n4 = ((n + 3.0) / 2.0).floor() / 2.0;
    let depths = [1.0, n4, (n + 1.0) / 2.0, n + 1.0 - n4, n];

    let mut out = [0.0; 5];
    for (slot, d) in out.iter_mut().zip(depths) {
        // depths are 1-based
        let lo = d.floor() as usize - 1;
        let hi = d.ceil() as usize - 1;
        *slot = 0.5 * (sorted[lo] + sorted[hi]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_type7_interpolates() {
        // h = (4 - 1) * 0.25 = 0.75 -> 1 + 0.75 * (2 - 1)
        let data = [4.0, 1.0, 3.0, 2.0];
        assert!((compute_quantile(&data, 0.25) - 1.75).abs() < 1e-12);
        assert!((compute_quantile(&data, 0.5) - 2.5).abs() < 1e-12);
        assert!((compute_quantile(&data, 1.0) - 4.0).abs() < 1e-12);
        assert!((compute_quantile(&data, 0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_quantile_single_element() {
        assert_eq!(compute_quantile(&[7.5], 0.3), 7.5);
    }

    #[test]
    #[should_panic(expected = "Cannot compute quantile of empty slice")]
    fn test_quantile_empty_panics() {
        compute_quantile(&[], 0.5);
    }

    #[test]
    #[should_panic(expected = "Quantile probability must be in [0, 1]")]
    fn test_quantile_bad_probability_panics() {
        quantile_sorted(&[1.0, 2.0], 1.5);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(&[5.0]), 5.0);
    }

    #[test]
    fn test_median_matches_type7_half() {
        let data = [9.7, 15.2, 21.5, 17.6, 9.7, 14.5, 10.0, 8.2, 9.4, 16.5];
        assert!((median(&data) - compute_quantile(&data, 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_fivenum_even_and_odd() {
        // Even n = 10: n4 = floor(6.5) / 2 = 3 -> hinges are the 3rd and 8th values
        let even: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_eq!(fivenum_sorted(&even), [1.0, 3.0, 5.5, 8.0, 10.0]);

        // Odd n = 5: n4 = 2 -> hinges are the 2nd and 4th values
        assert_eq!(
            fivenum_sorted(&[1.0, 2.0, 3.0, 4.0, 5.0]),
            [1.0, 2.0, 3.0, 4.0, 5.0]
        );
    }
}
