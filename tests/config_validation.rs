//! Tests for configuration validation.
//!
//! Builder methods panic on out-of-range values; `validate` reports the same
//! problems without panicking; environment overrides skip bad values.

use toothgrowth::stats::Center;
use toothgrowth::{Config, ENV_ALPHA, ENV_CONF_LEVEL, ENV_LEVENE_CENTER};

// =============================================================================
// ALPHA VALIDATION
// =============================================================================

#[test]
#[should_panic(expected = "alpha must be in (0, 1)")]
fn alpha_zero_panics() {
    let _ = Config::new().alpha(0.0);
}

#[test]
#[should_panic(expected = "alpha must be in (0, 1)")]
fn alpha_one_panics() {
    let _ = Config::new().alpha(1.0);
}

#[test]
#[should_panic(expected = "alpha must be in (0, 1)")]
fn alpha_nan_panics() {
    let _ = Config::new().alpha(f64::NAN);
}

#[test]
fn alpha_strict_valid() {
    let config = Config::new().alpha(0.001);
    assert_eq!(config.alpha, 0.001);
}

// =============================================================================
// CONFIDENCE LEVEL VALIDATION
// =============================================================================

#[test]
#[should_panic(expected = "conf_level must be in (0, 1)")]
fn conf_level_one_panics() {
    let _ = Config::new().conf_level(1.0);
}

#[test]
#[should_panic(expected = "conf_level must be in (0, 1)")]
fn conf_level_percent_panics() {
    // Easy mistake: 95 instead of 0.95
    let _ = Config::new().conf_level(95.0);
}

#[test]
fn conf_level_99_valid() {
    let config = Config::new().conf_level(0.99);
    assert_eq!(config.conf_level, 0.99);
}

// =============================================================================
// DECIMALS VALIDATION
// =============================================================================

#[test]
#[should_panic(expected = "decimals must be at most 12")]
fn decimals_too_many_panics() {
    let _ = Config::new().decimals(13);
}

#[test]
fn decimals_zero_valid() {
    assert_eq!(Config::new().decimals(0).decimals, 0);
}

// =============================================================================
// NON-PANICKING VALIDATION
// =============================================================================

#[test]
fn validate_reports_hand_built_errors() {
    let config = Config {
        alpha: 1.5,
        ..Config::default()
    };
    assert_eq!(config.validate().unwrap_err(), "alpha must be in (0, 1)");

    let config = Config {
        conf_level: 0.0,
        ..Config::default()
    };
    assert_eq!(
        config.validate().unwrap_err(),
        "conf_level must be in (0, 1)"
    );

    assert!(Config::default().validate().is_ok());
}

// =============================================================================
// ENVIRONMENT OVERRIDES
// =============================================================================

// One test owns the process environment so parallel tests never race on it.
#[test]
fn env_overrides() {
    let clear = || {
        std::env::remove_var(ENV_ALPHA);
        std::env::remove_var(ENV_CONF_LEVEL);
        std::env::remove_var(ENV_LEVENE_CENTER);
    };

    clear();
    assert_eq!(Config::from_env_or(Config::default()), Config::default());

    std::env::set_var(ENV_ALPHA, "0.01");
    std::env::set_var(ENV_CONF_LEVEL, "0.99");
    std::env::set_var(ENV_LEVENE_CENTER, "mean");
    let config = Config::from_env_or(Config::default());
    assert_eq!(config.alpha, 0.01);
    assert_eq!(config.conf_level, 0.99);
    assert_eq!(config.levene_center, Center::Mean);
    assert_eq!(config.decimals, 5);

    std::env::set_var(ENV_ALPHA, "five percent");
    std::env::set_var(ENV_CONF_LEVEL, "95");
    std::env::set_var(ENV_LEVENE_CENTER, "trimmed");
    let base = Config::new().alpha(0.1);
    let config = Config::from_env_or(base.clone());
    assert_eq!(config, base);

    std::env::set_var(ENV_LEVENE_CENTER, "brown-forsythe");
    let config = Config::from_env_or(Config::new().levene_center(Center::Mean));
    assert_eq!(config.levene_center, Center::Median);

    clear();
}
