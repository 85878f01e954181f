//! Configuration for the report.

use serde::{Deserialize, Serialize};
use toothgrowth_core::constants::{DEFAULT_ALPHA, DEFAULT_CONF_LEVEL};
use toothgrowth_core::Center;

/// Environment variable overriding [`Config::alpha`].
pub const ENV_ALPHA: &str = "TOOTHGROWTH_ALPHA";
/// Environment variable overriding [`Config::conf_level`].
pub const ENV_CONF_LEVEL: &str = "TOOTHGROWTH_CONF_LEVEL";
/// Environment variable overriding [`Config::levene_center`]: `median` or `mean`.
pub const ENV_LEVENE_CENTER: &str = "TOOTHGROWTH_LEVENE_CENTER";

/// Settings that change the numbers or how they are printed.
///
/// Built with [`Config::new`] and the builder methods, which panic on
/// out-of-range values. Use [`Config::validate`] for a non-panicking check
/// of a config assembled by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Significance level for every test. Default: 0.05.
    pub alpha: f64,

    /// Family-wise confidence level for Tukey intervals. Default: 0.95.
    pub conf_level: f64,

    /// Group center for Levene's test. Default: median (Brown-Forsythe).
    pub levene_center: Center,

    /// Decimal places for printed statistics. Default: 5.
    pub decimals: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            conf_level: DEFAULT_CONF_LEVEL,
            levene_center: Center::Median,
            decimals: 5,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        assert!(alpha > 0.0 && alpha < 1.0, "alpha must be in (0, 1)");
        self.alpha = alpha;
        self
    }

    pub fn conf_level(mut self, level: f64) -> Self {
        assert!(level > 0.0 && level < 1.0, "conf_level must be in (0, 1)");
        self.conf_level = level;
        self
    }

    pub fn levene_center(mut self, center: Center) -> Self {
        self.levene_center = center;
        self
    }

    pub fn decimals(mut self, decimals: usize) -> Self {
        assert!(decimals <= 12, "decimals must be at most 12");
        self.decimals = decimals;
        self
    }

    /// Check if the configuration is valid.
    ///
    /// Returns an error message if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err("alpha must be in (0, 1)".to_string());
        }
        if !(self.conf_level > 0.0 && self.conf_level < 1.0) {
            return Err("conf_level must be in (0, 1)".to_string());
        }
        if self.decimals > 12 {
            return Err("decimals must be at most 12".to_string());
        }
        Ok(())
    }

    /// Overlay environment settings onto `default`.
    ///
    /// Checks `TOOTHGROWTH_ALPHA`, `TOOTHGROWTH_CONF_LEVEL` and
    /// `TOOTHGROWTH_LEVENE_CENTER`. Unset variables keep the default; values
    /// that fail to parse or fall outside (0, 1) are logged and ignored.
    pub fn from_env_or(default: Self) -> Self {
        let mut config = default;
        if let Some(alpha) = env_probability(ENV_ALPHA) {
            config.alpha = alpha;
        }
        if let Some(level) = env_probability(ENV_CONF_LEVEL) {
            config.conf_level = level;
        }
        match std::env::var(ENV_LEVENE_CENTER).ok().as_deref() {
            Some("median") | Some("brown-forsythe") => config.levene_center = Center::Median,
            Some("mean") => config.levene_center = Center::Mean,
            Some(other) => {
                tracing::warn!(var = ENV_LEVENE_CENTER, value = other, "ignoring unknown center")
            }
            None => {}
        }
        config
    }
}

fn env_probability(name: &str) -> Option<f64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<f64>() {
        Ok(v) if v > 0.0 && v < 1.0 => Some(v),
        _ => {
            tracing::warn!(var = name, value = %raw, "ignoring value outside (0, 1)");
            None
        }
    }
}
