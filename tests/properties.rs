//! Structural properties of the report that hold for any balanced data.

use proptest::prelude::*;
use toothgrowth::stats::AnovaFit;
use toothgrowth::{output, run, Config, Dataset, Observation, Report};

fn with_lengths(lengths: &[f64]) -> Dataset {
    let observations = Dataset::tooth_growth()
        .observations()
        .iter()
        .zip(lengths)
        .map(|(obs, &len)| Observation { len, ..*obs })
        .collect();
    Dataset::new(observations, "generated")
}

fn check_decomposition(fit: &AnovaFit) {
    let explained: f64 = fit.rows.iter().map(|r| r.sum_sq).sum();
    let total = explained + fit.residual.sum_sq;
    assert!(
        (total - fit.total_sum_sq).abs() <= 1e-8 * fit.total_sum_sq.max(1.0),
        "{}: {} + {} != {}",
        fit.formula_label,
        explained,
        fit.residual.sum_sq,
        fit.total_sum_sq
    );
}

fn check_nested_residuals(report: &Report) {
    let m = &report.anova;
    let slack = 1e-9 * m.supp.total_sum_sq.max(1.0);
    assert!(m.dose.residual.sum_sq + slack >= m.additive.residual.sum_sq);
    assert!(m.supp.residual.sum_sq + slack >= m.additive.residual.sum_sq);
    assert!(m.additive.residual.sum_sq + slack >= m.interaction.residual.sum_sq);
}

fn check_symmetric_intervals(report: &Report) {
    for table in report.post_hoc.all() {
        for c in &table.comparisons {
            let below = c.mean_difference - c.lower_ci;
            let above = c.upper_ci - c.mean_difference;
            assert!(
                (below - above).abs() <= 1e-9 * below.abs().max(1.0),
                "{} {}: [{}, {}] around {}",
                table.term,
                c.group_pair,
                c.lower_ci,
                c.upper_ci,
                c.mean_difference
            );
            assert!(below > 0.0);
        }
    }
}

// =============================================================================
// TOOTHGROWTH
// =============================================================================

#[test]
fn residual_ss_non_increasing() {
    let report = run(&Dataset::tooth_growth(), &Config::default()).unwrap();
    check_nested_residuals(&report);
}

#[test]
fn ss_decomposition_every_model() {
    let report = run(&Dataset::tooth_growth(), &Config::default()).unwrap();
    for fit in report.anova.all() {
        check_decomposition(fit);
    }
}

#[test]
fn tukey_intervals_symmetric() {
    let report = run(&Dataset::tooth_growth(), &Config::default()).unwrap();
    check_symmetric_intervals(&report);
}

#[test]
fn rerun_is_bit_identical() {
    let data = Dataset::tooth_growth();
    let config = Config::default();
    let first = run(&data, &config).unwrap();
    let second = run(&data, &config).unwrap();

    for (a, b) in first.anova.all().into_iter().zip(second.anova.all()) {
        for (ra, rb) in a.rows.iter().zip(&b.rows) {
            assert_eq!(ra.f_statistic.to_bits(), rb.f_statistic.to_bits());
            assert_eq!(ra.p_value.to_bits(), rb.p_value.to_bits());
        }
    }
    assert_eq!(first.post_hoc.all(), second.post_hoc.all());
    assert_eq!(
        output::to_json(&first).unwrap(),
        output::to_json(&second).unwrap()
    );
}

#[test]
fn rerun_prints_identically() {
    colored::control::set_override(false);
    let data = Dataset::tooth_growth();
    let first = output::format_report(&run(&data, &Config::default()).unwrap());
    let second = output::format_report(&run(&data, &Config::default()).unwrap());
    assert_eq!(first, second);
}

// =============================================================================
// GENERATED DATA
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn structure_holds_for_balanced_data(
        lengths in prop::collection::vec(1.0f64..40.0, 60)
    ) {
        let report = run(&with_lengths(&lengths), &Config::default()).unwrap();
        for fit in report.anova.all() {
            check_decomposition(fit);
        }
        check_nested_residuals(&report);
        check_symmetric_intervals(&report);

        prop_assert_eq!(report.post_hoc.interaction.comparisons.len(), 15);
        for table in report.post_hoc.all() {
            for c in &table.comparisons {
                prop_assert!((0.0..=1.0).contains(&c.adjusted_p_value));
            }
        }
    }

    #[test]
    fn shifting_response_leaves_tests_unchanged(
        lengths in prop::collection::vec(1.0f64..40.0, 60),
        shift in -10.0f64..10.0
    ) {
        let base = run(&with_lengths(&lengths), &Config::default()).unwrap();
        let shifted: Vec<f64> = lengths.iter().map(|v| v + shift).collect();
        let moved = run(&with_lengths(&shifted), &Config::default()).unwrap();

        let a = &base.anova.interaction;
        let b = &moved.anova.interaction;
        for (ra, rb) in a.rows.iter().zip(&b.rows) {
            prop_assert!((ra.sum_sq - rb.sum_sq).abs() <= 1e-6 * ra.sum_sq.max(1.0));
        }
        let da = &base.post_hoc.dose.comparisons;
        let db = &moved.post_hoc.dose.comparisons;
        for (ca, cb) in da.iter().zip(db) {
            prop_assert!((ca.mean_difference - cb.mean_difference).abs() < 1e-9);
        }
    }
}
