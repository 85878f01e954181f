//! Normal and F distribution helpers on top of `statrs`.

use statrs::distribution::{ContinuousCDF, FisherSnedecor, Normal};
use statrs::function::erf::erfc;

use crate::error::{StatsError, StatsResult};

/// Construct `N(mean, sd)`, mapping the `statrs` error into ours.
pub fn normal(mean: f64, sd: f64) -> StatsResult<Normal> {
    Normal::new(mean, sd).map_err(|e| StatsError::Distribution(e.to_string()))
}

/// Standard normal CDF, Φ(x) = erfc(-x/√2) / 2.
///
/// Written with `erfc` so the lower tail keeps full relative precision.
#[inline]
pub fn std_normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x * core::f64::consts::FRAC_1_SQRT_2)
}

/// Standard normal quantile Φ⁻¹(p).
pub fn std_normal_quantile(p: f64) -> StatsResult<f64> {
    Ok(normal(0.0, 1.0)?.inverse_cdf(p))
}

/// Upper-tail probability `P(F > f)` for `F ~ F(df1, df2)`.
///
/// Non-positive statistics return 1; an infinite statistic returns 0.
pub fn f_upper_tail(f: f64, df1: f64, df2: f64) -> StatsResult<f64> {
    let dist =
        FisherSnedecor::new(df1, df2).map_err(|e| StatsError::Distribution(e.to_string()))?;
    if f <= 0.0 {
        return Ok(1.0);
    }
    if f.is_infinite() {
        return Ok(0.0);
    }
    Ok(dist.sf(f))
}
