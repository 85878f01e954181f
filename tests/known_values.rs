//! Known values for the ToothGrowth report.
//!
//! Reference numbers come from R 4.x: `shapiro.test`, `car::leveneTest`,
//! `summary(aov(...))` and `TukeyHSD(aov(len ~ supp * dose))`.

use toothgrowth::stats::Center;
use toothgrowth::{run, Config, Dataset, Report};

fn report() -> Report {
    run(&Dataset::tooth_growth(), &Config::default()).expect("pipeline should succeed")
}

fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{}: expected {}, got {} (tol {})",
        what,
        expected,
        actual,
        tol
    );
}

// =============================================================================
// DESCRIPTIVE
// =============================================================================

#[test]
fn overall_summary() {
    let s = report().descriptive.overall;
    assert_eq!(s.n, 60);
    assert_close(s.mean, 18.813333, 1e-6, "mean");
    assert_close(s.sd, 7.649315, 1e-6, "sd");
    assert_close(s.min, 4.2, 1e-12, "min");
    assert_close(s.median, 19.25, 1e-12, "median");
    assert_close(s.max, 33.9, 1e-12, "max");
}

#[test]
fn group_means() {
    let d = report().descriptive;
    let oj = &d.by_supp[0];
    assert_eq!(oj.group, "OJ");
    assert_close(oj.summary.mean, 20.663333, 1e-6, "OJ mean");
    assert_close(d.by_supp[1].summary.mean, 16.963333, 1e-6, "VC mean");
    assert_close(d.by_dose[0].summary.mean, 10.605, 1e-9, "dose 0.5 mean");
    assert_close(d.by_dose[1].summary.mean, 19.735, 1e-9, "dose 1 mean");
    assert_close(d.by_dose[2].summary.mean, 26.1, 1e-9, "dose 2 mean");
}

// =============================================================================
// ASSUMPTION CHECKS
// =============================================================================

#[test]
fn shapiro_wilk_all_observations() {
    let n = report().normality.overall;
    assert_close(n.statistic, 0.96743, 1e-5, "W");
    assert_close(n.p_value, 0.10910, 1e-5, "p");
}

#[test]
fn shapiro_wilk_cells() {
    let expected = [
        ("OJ:0.5", 0.89274, 0.18204),
        ("VC:0.5", 0.89000, 0.16956),
        ("OJ:1", 0.92660, 0.41530),
        ("VC:1", 0.90834, 0.26979),
        ("OJ:2", 0.96258, 0.81479),
        ("VC:2", 0.97328, 0.91945),
    ];
    let normality = report().normality;
    for (cell, (group, w, p)) in normality.by_cell.iter().zip(expected) {
        assert_eq!(cell.group, group);
        assert_close(cell.test.statistic, w, 1e-5, group);
        assert_close(cell.test.p_value, p, 1e-5, group);
    }
}

#[test]
fn levene_brown_forsythe() {
    let h = report().homogeneity;
    assert_eq!((h.by_cell.df_between, h.by_cell.df_within), (5, 54));
    assert_close(h.by_cell.statistic, 1.70858, 1e-5, "cells F");
    assert_close(h.by_cell.p_value, 0.14836, 1e-5, "cells p");
    assert_close(h.by_supp.statistic, 1.21357, 1e-5, "supp F");
    assert_close(h.by_supp.p_value, 0.27518, 1e-5, "supp p");
    assert_close(h.by_dose.statistic, 0.64573, 1e-5, "dose F");
    assert_close(h.by_dose.p_value, 0.52807, 1e-5, "dose p");
}

#[test]
fn levene_mean_centered() {
    let config = Config::new().levene_center(Center::Mean);
    let report = run(&Dataset::tooth_growth(), &config).unwrap();
    assert_close(report.homogeneity.by_cell.statistic, 1.94013, 1e-5, "F");
    assert_close(report.homogeneity.by_cell.p_value, 0.10273, 1e-5, "p");
}

// =============================================================================
// ANOVA
// =============================================================================

#[test]
fn supp_only_anova_not_significant() {
    let fit = report().anova.supp;
    let row = fit.row("supp").unwrap();
    assert_close(row.f_statistic, 3.66825, 1e-5, "F");
    assert_close(row.p_value, 0.0604, 1e-4, "p");
    assert!(!row.is_significant(0.05));
}

#[test]
fn dose_only_anova_significant() {
    let fit = report().anova.dose;
    let row = fit.row("dose").unwrap();
    assert_close(row.f_statistic, 67.41574, 1e-4, "F");
    assert!(row.p_value < 0.001);
}

#[test]
fn interaction_anova_table() {
    let fit = report().anova.interaction;
    let supp = fit.row("supp").unwrap();
    let dose = fit.row("dose").unwrap();
    let inter = fit.row("supp:dose").unwrap();

    assert_close(supp.sum_sq, 205.35, 1e-6, "supp SS");
    assert_close(dose.sum_sq, 2426.434333, 1e-5, "dose SS");
    assert_close(inter.sum_sq, 108.319, 1e-6, "supp:dose SS");
    assert_close(fit.residual.sum_sq, 712.106, 1e-6, "residual SS");
    assert_eq!(fit.residual.df, 54);

    assert_close(supp.f_statistic, 15.57198, 1e-4, "supp F");
    assert_close(dose.f_statistic, 91.99996, 1e-4, "dose F");
    assert_close(inter.f_statistic, 4.10699, 1e-5, "supp:dose F");
    assert_close(inter.p_value, 0.0219, 1e-4, "supp:dose p");
}

// =============================================================================
// TUKEY HSD
// =============================================================================

#[test]
fn tukey_dose_high_vs_low() {
    let table = report().post_hoc.dose;
    let c = table.comparison("2-0.5").unwrap();
    assert_close(c.mean_difference, 15.495, 1e-9, "diff");
    assert_close(c.lower_ci, 12.72749, 1e-3, "lwr");
    assert_close(c.upper_ci, 18.26251, 1e-3, "upr");
    assert!(c.adjusted_p_value < 0.001);
}

#[test]
fn tukey_supp() {
    let table = report().post_hoc.supp;
    assert_eq!(table.comparisons.len(), 1);
    let c = &table.comparisons[0];
    assert_eq!(c.group_pair, "VC-OJ");
    assert_close(c.mean_difference, -3.7, 1e-9, "diff");
    assert_close(c.lower_ci, -5.579828, 1e-3, "lwr");
    assert_close(c.upper_ci, -1.820172, 1e-3, "upr");
    assert_close(c.adjusted_p_value, 0.000231, 1e-6, "p adj");
}

#[test]
fn tukey_interaction_cells() {
    let table = report().post_hoc.interaction;
    assert_eq!(table.comparisons.len(), 15);
    let c = table.comparison("VC:0.5-OJ:0.5").unwrap();
    assert_close(c.mean_difference, -5.25, 1e-9, "diff");
    assert!(c.is_significant(0.05));
    let c = table.comparison("VC:2-OJ:2").unwrap();
    assert!(!c.is_significant(0.05));
}
