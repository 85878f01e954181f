//! Terminal output with colors and a fixed-width layout.
//!
//! Colors come from the `colored` crate, which respects `NO_COLOR`,
//! `CLICOLOR_FORCE` and TTY detection. Test statistics are printed with
//! [`Config::decimals`] places (5 by default).

use std::fmt::Write;

use colored::Colorize;
use toothgrowth_core::{AnovaFit, Summary, TukeyTable};

use crate::config::Config;
use crate::result::{GroupSummary, Report};

/// Separator line used in output.
pub const SEPARATOR: &str = "──────────────────────────────────────────────────────────────";

/// Width of the forest plot track, in characters.
const FOREST_WIDTH: usize = 40;

/// Format a full report for human-readable terminal output.
pub fn format_report(report: &Report) -> String {
    let mut out = String::new();
    let cfg = &report.config;

    writeln!(out, "{}", "ToothGrowth analysis".bold()).unwrap();
    writeln!(out, "{}", SEPARATOR).unwrap();
    writeln!(
        out,
        "  Data: {} ({} observations)",
        report.dataset.source, report.dataset.n
    )
    .unwrap();
    writeln!(
        out,
        "  alpha = {}, Tukey confidence = {}%",
        cfg.alpha,
        cfg.conf_level * 100.0
    )
    .unwrap();
    writeln!(out).unwrap();

    format_descriptive(&mut out, report, cfg);
    format_assumptions(&mut out, report, cfg);
    for fit in report.anova.all() {
        format_anova(&mut out, fit, cfg);
    }
    for table in report.post_hoc.all() {
        format_tukey(&mut out, table, cfg);
    }

    let warnings = report.warnings();
    if !warnings.is_empty() {
        writeln!(out, "  {} Assumption warnings", "\u{26A0}".yellow()).unwrap();
        for w in &warnings {
            writeln!(out, "    \u{2022} {}", w).unwrap();
        }
        writeln!(out).unwrap();
    }

    let significant = report.significant_terms();
    let verdict = if significant.is_empty() {
        "No significant terms in len ~ supp * dose".to_string()
    } else {
        format!("Significant in len ~ supp * dose: {}", significant.join(", "))
    };
    writeln!(out, "{}", SEPARATOR).unwrap();
    writeln!(out, "  {}", verdict.bold()).unwrap();
    out
}

fn format_descriptive(out: &mut String, report: &Report, cfg: &Config) {
    let d = &report.descriptive;
    writeln!(out, "  {}", "Descriptive statistics".bold()).unwrap();
    writeln!(
        out,
        "    {:<10} {:>3} {:>10} {:>10} {:>10} {:>10}",
        "group", "n", "mean", "sd", "se", "median"
    )
    .unwrap();
    summary_row(out, "all", &d.overall, cfg);
    let groups: Vec<&GroupSummary> = d
        .by_supp
        .iter()
        .chain(&d.by_dose)
        .chain(&d.by_cell)
        .collect();
    for g in groups {
        summary_row(out, &g.group, &g.summary, cfg);
    }
    writeln!(out).unwrap();
}

fn summary_row(out: &mut String, label: &str, s: &Summary, cfg: &Config) {
    let dp = cfg.decimals;
    writeln!(
        out,
        "    {:<10} {:>3} {:>10.*} {:>10.*} {:>10.*} {:>10.*}",
        label, s.n, dp, s.mean, dp, s.sd, dp, s.se, dp, s.median
    )
    .unwrap();
}

fn format_assumptions(out: &mut String, report: &Report, cfg: &Config) {
    let dp = cfg.decimals;
    writeln!(out, "  {}", "Normality (Shapiro-Wilk)".bold()).unwrap();
    let overall = &report.normality.overall;
    let rows = std::iter::once(("all", overall)).chain(
        report
            .normality
            .by_cell
            .iter()
            .map(|c| (c.group.as_str(), &c.test)),
    );
    for (label, test) in rows {
        let verdict = if test.rejects_normality(cfg.alpha) {
            "non-normal".yellow().to_string()
        } else {
            "OK".green().to_string()
        };
        writeln!(
            out,
            "    {:<10} W = {:.*}  p = {}  {}",
            label,
            dp,
            test.statistic,
            format_p(test.p_value, dp),
            verdict
        )
        .unwrap();
    }
    writeln!(out).unwrap();

    writeln!(
        out,
        "  {}",
        format!(
            "Homogeneity of variance (Levene, center = {})",
            cfg.levene_center
        )
        .bold()
    )
    .unwrap();
    for (label, test) in report.homogeneity.labelled() {
        let verdict = if test.rejects_homogeneity(cfg.alpha) {
            "unequal".yellow().to_string()
        } else {
            "OK".green().to_string()
        };
        writeln!(
            out,
            "    {:<10} F({}, {}) = {:.*}  p = {}  {}",
            label,
            test.df_between,
            test.df_within,
            dp,
            test.statistic,
            format_p(test.p_value, dp),
            verdict
        )
        .unwrap();
    }
    writeln!(out).unwrap();
}

/// Format one ANOVA table in R's `summary(aov(...))` layout.
pub fn format_anova(out: &mut String, fit: &AnovaFit, cfg: &Config) {
    let dp = cfg.decimals;
    writeln!(out, "  {}", format!("ANOVA: len ~ {}", fit.formula_label).bold()).unwrap();
    writeln!(
        out,
        "    {:<10} {:>3} {:>14} {:>14} {:>12} {:>12}",
        "", "Df", "Sum Sq", "Mean Sq", "F value", "Pr(>F)"
    )
    .unwrap();
    for row in &fit.rows {
        let p = format!("{:>12}", format_p(row.p_value, dp));
        let p = if row.is_significant(cfg.alpha) {
            p.bold().to_string()
        } else {
            p
        };
        writeln!(
            out,
            "    {:<10} {:>3} {:>14.*} {:>14.*} {:>12.*} {} {}",
            row.label,
            row.df,
            dp,
            row.sum_sq,
            dp,
            row.mean_sq,
            dp,
            row.f_statistic,
            p,
            significance_stars(row.p_value)
        )
        .unwrap();
    }
    writeln!(
        out,
        "    {:<10} {:>3} {:>14.*} {:>14.*}",
        "Residuals", fit.residual.df, dp, fit.residual.sum_sq, dp, fit.residual.mean_sq
    )
    .unwrap();
    writeln!(out).unwrap();
}

/// Format a Tukey table followed by its forest plot.
pub fn format_tukey(out: &mut String, table: &TukeyTable, cfg: &Config) {
    let dp = cfg.decimals;
    writeln!(
        out,
        "  {}",
        format!(
            "Tukey HSD: {} ({}% family-wise confidence)",
            table.term,
            table.conf_level * 100.0
        )
        .bold()
    )
    .unwrap();
    writeln!(
        out,
        "    {:<12} {:>11} {:>11} {:>11} {:>11}",
        "pair", "diff", "lwr", "upr", "p adj"
    )
    .unwrap();
    for c in &table.comparisons {
        let line = format!(
            "    {:<12} {:>11.*} {:>11.*} {:>11.*} {:>11}",
            c.group_pair,
            dp,
            c.mean_difference,
            dp,
            c.lower_ci,
            dp,
            c.upper_ci,
            format_p(c.adjusted_p_value, dp)
        );
        if c.is_significant(cfg.alpha) {
            writeln!(out, "{}", line.bold()).unwrap();
        } else {
            writeln!(out, "{}", line).unwrap();
        }
    }
    writeln!(out).unwrap();
    out.push_str(&format_forest(table, FOREST_WIDTH));
    writeln!(out).unwrap();
}

/// Draw a text forest plot of a Tukey table's intervals.
///
/// Each comparison gets one line: the interval as `─`, the estimate as `●`
/// and zero as `│`. All lines share one scale spanning every interval and
/// zero. No colors are used.
pub fn format_forest(table: &TukeyTable, width: usize) -> String {
    let width = width.max(3);
    let mut lo = 0.0f64;
    let mut hi = 0.0f64;
    for c in &table.comparisons {
        lo = lo.min(c.lower_ci);
        hi = hi.max(c.upper_ci);
    }
    let span = if hi > lo { hi - lo } else { 1.0 };
    let col = |x: f64| -> usize {
        let pos = ((x - lo) / span * (width - 1) as f64).round();
        (pos.max(0.0) as usize).min(width - 1)
    };

    let mut out = String::new();
    let zero = col(0.0);
    for c in &table.comparisons {
        let mut track = vec![' '; width];
        for cell in &mut track[col(c.lower_ci)..=col(c.upper_ci)] {
            *cell = '─';
        }
        if track[zero] == ' ' {
            track[zero] = '│';
        } else {
            track[zero] = '┼';
        }
        track[col(c.mean_difference)] = '●';
        let track: String = track.into_iter().collect();
        writeln!(out, "    {:<12} {}", c.group_pair, track).unwrap();
    }
    writeln!(
        out,
        "    {:<12} {:<w$}{:>w2$}",
        "",
        format!("{:.1}", lo),
        format!("{:.1}", hi),
        w = width / 2,
        w2 = width - width / 2
    )
    .unwrap();
    out
}

/// Fixed-decimal p-value, or `<0.00001`-style when it rounds to zero.
pub fn format_p(p: f64, decimals: usize) -> String {
    let floor = 10f64.powi(-(decimals as i32));
    if p < floor {
        format!("<{:.*}", decimals, floor)
    } else {
        format!("{:.*}", decimals, p)
    }
}

/// R's significance codes.
pub fn significance_stars(p: f64) -> &'static str {
    if p < 0.001 {
        "***"
    } else if p < 0.01 {
        "**"
    } else if p < 0.05 {
        "*"
    } else if p < 0.1 {
        "."
    } else {
        ""
    }
}
