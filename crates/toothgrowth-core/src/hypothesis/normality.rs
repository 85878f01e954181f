//! Shapiro-Wilk test of normality.
//!
//! Implements Royston's (1995) algorithm AS R94, which approximates the
//! Shapiro-Wilk coefficients from normal order statistics and transforms W
//! to an approximately standard normal variable for the p-value:
//!
//! - n = 3: exact p-value, `6/π · (asin(√W) − π/3)`
//! - 4 ≤ n ≤ 11: `−ln(γ − ln(1 − W))` is normal, γ = −2.273 + 0.459 n
//! - 12 ≤ n ≤ 5000: `ln(1 − W)` is normal with log-n polynomial moments
//!
//! The coefficient tables, thresholds and branch structure follow R's
//! `swilk.c` (R Core Team, GPL-2.0-or-later), from which this module is
//! derived.
//!
//! # Reference
//!
//! Royston, P. (1995). "Remark AS R94: A remark on algorithm AS 181: The
//! W-test for normality." Applied Statistics 44(4):547–551.

use serde::{Deserialize, Serialize};
use statrs::distribution::ContinuousCDF;

use crate::constants::{SHAPIRO_MAX_N, SHAPIRO_MIN_N};
use crate::error::{ensure_finite, StatsError, StatsResult};
use crate::statistics::{normal, sorted_copy, std_normal_quantile};

/// Data ranges below this count as zero.
const SMALL: f64 = 1e-19;

// Polynomial coefficients from AS R94
const G: [f64; 2] = [-2.273, 0.459];
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];

/// Result of a normality test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalityTest {
    /// The W statistic, in (0, 1].
    pub statistic: f64,
    /// P-value for H0: the sample is drawn from a normal distribution.
    pub p_value: f64,
    /// Sample size.
    pub n: usize,
}

impl NormalityTest {
    /// Whether normality is rejected at level `alpha`.
    pub fn rejects_normality(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Shapiro-Wilk W test on a sample of 3 to 5000 finite values.
///
/// # Errors
///
/// - `InsufficientData` for n < 3
/// - `TooManyObservations` for n > 5000
/// - `NonFinite` for NaN or infinite values
/// - `ZeroRange` if all values are identical
pub fn shapiro_wilk(sample: &[f64]) -> StatsResult<NormalityTest> {
    const WHAT: &str = "Shapiro-Wilk test";

    let n = sample.len();
    if n < SHAPIRO_MIN_N {
        return Err(StatsError::insufficient(WHAT, SHAPIRO_MIN_N, n));
    }
    if n > SHAPIRO_MAX_N {
        return Err(StatsError::TooManyObservations {
            what: WHAT.into(),
            max: SHAPIRO_MAX_N,
            got: n,
        });
    }
    ensure_finite(WHAT, sample)?;

    let x = sorted_copy(sample);
    let range = x[n - 1] - x[0];
    if range < SMALL {
        return Err(StatsError::ZeroRange { what: WHAT.into() });
    }

    let coefficients = coefficients(n)?;

    // W as the squared correlation between the scaled data and the
    // coefficients; w1 = 1 - W is computed directly to avoid cancellation
    // when W is close to 1.
    let nf = n as f64;
    let sa = coefficients.iter().sum::<f64>() / nf;
    let sx = x.iter().map(|v| v / range).sum::<f64>() / nf;
    let (mut ssa, mut ssx, mut sax) = (0.0, 0.0, 0.0);
    for (a, v) in coefficients.iter().zip(&x) {
        let asa = a - sa;
        let xsx = v / range - sx;
        ssa += asa * asa;
        ssx += xsx * xsx;
        sax += asa * xsx;
    }
    let ssassx = (ssa * ssx).sqrt();
    let w1 = (ssassx - sax) * (ssassx + sax) / (ssa * ssx);
    let w = 1.0 - w1;

    let p_value = p_value(n, w, w1)?;
    tracing::trace!(n, w, p_value, "shapiro-wilk");

    Ok(NormalityTest {
        statistic: w,
        p_value,
        n,
    })
}

/// Antisymmetric coefficient vector for a sorted sample of size n.
///
/// The upper half holds the AS R94 approximations `a[1..=n/2]` (largest
/// first from the top); the lower half mirrors them with negated sign and
/// the middle coefficient of an odd sample is zero.
fn coefficients(n: usize) -> StatsResult<Vec<f64>> {
    let nn2 = n / 2;
    // 1-based to match the published algorithm
    let mut a = vec![0.0; nn2 + 1];

    if n == 3 {
        a[1] = core::f64::consts::FRAC_1_SQRT_2;
    } else {
        let an = n as f64;
        let an25 = an + 0.25;
        let mut m = vec![0.0; nn2 + 1];
        let mut summ2 = 0.0;
        for i in 1..=nn2 {
            m[i] = std_normal_quantile((i as f64 - 0.375) / an25)?;
            summ2 += m[i] * m[i];
        }
        summ2 *= 2.0;
        let ssumm2 = summ2.sqrt();
        let rsn = 1.0 / an.sqrt();
        let a1 = poly(&C1, rsn) - m[1] / ssumm2;

        let (first_scaled, fac) = if n > 5 {
            let a2 = -m[2] / ssumm2 + poly(&C2, rsn);
            let fac = ((summ2 - 2.0 * m[1] * m[1] - 2.0 * m[2] * m[2])
                / (1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2))
                .sqrt();
            a[2] = a2;
            (3, fac)
        } else {
            let fac = ((summ2 - 2.0 * m[1] * m[1]) / (1.0 - 2.0 * a1 * a1)).sqrt();
            (2, fac)
        };
        a[1] = a1;
        for i in first_scaled..=nn2 {
            a[i] = -m[i] / fac;
        }
    }

    let mut full = vec![0.0; n];
    for (k, slot) in full.iter_mut().enumerate() {
        if k < nn2 {
            *slot = -a[k + 1];
        } else if k >= n - nn2 {
            *slot = a[n - k];
        }
    }
    Ok(full)
}

fn p_value(n: usize, w: f64, w1: f64) -> StatsResult<f64> {
    if n == 3 {
        const PI6: f64 = 6.0 / core::f64::consts::PI;
        const STQR: f64 = core::f64::consts::FRAC_PI_3;
        return Ok((PI6 * (w.min(1.0).sqrt().asin() - STQR)).max(0.0));
    }

    let an = n as f64;
    let mut y = w1.ln();
    let (mean, sd) = if n <= 11 {
        let gamma = poly(&G, an);
        if y >= gamma {
            // W so small the approximation breaks down; p is effectively zero
            return Ok(1e-99);
        }
        y = -(gamma - y).ln();
        (poly(&C3, an), poly(&C4, an).exp())
    } else {
        let ln_n = an.ln();
        (poly(&C5, ln_n), poly(&C6, ln_n).exp())
    };

    Ok(normal(mean, sd)?.sf(y))
}

/// Evaluate `c[0] + c[1] x + ... + c[k] x^k` the way AS R94 does.
fn poly(c: &[f64], x: f64) -> f64 {
    let mut result = c[0];
    if c.len() > 1 {
        let mut p = x * c[c.len() - 1];
        for j in (1..c.len() - 1).rev() {
            p = (p + c[j]) * x;
        }
        result += p;
    }
    result
}
