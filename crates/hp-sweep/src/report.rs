//! Caller-facing text summary of a sweep report.

use std::fmt::Write as _;

use crate::sweep::{SweepReport, SweepStatus};

/// Render a plain-text summary table.
///
/// Deviation columns print as "-" for rows without reference data; the
/// closing line always states converged vs. attempted counts so a partial
/// sweep cannot be mistaken for a complete one.
pub fn render_summary(report: &SweepReport) -> String {
    let mut out = String::new();

    let device = report.device.as_deref().unwrap_or("default parameters");
    let _ = writeln!(out, "Validation sweep: {device}");

    if report.status == SweepStatus::NoConvergence {
        let _ = writeln!(out, "  No operating point converged ({} attempted).", report.attempted);
        for failure in &report.failures {
            let _ = writeln!(
                out,
                "  {:>8}  status {}: {}",
                failure.label, failure.status, failure.message
            );
        }
        return out;
    }

    let _ = writeln!(
        out,
        "  {:>8}  {:>6}  {:>8}  {:>8}  {:>8}  {:>8}  {:>9}",
        "point", "COP", "P_th kW", "P_el kW", "COP ref", "dCOP %", "dP_th %"
    );
    for row in &report.rows {
        let _ = writeln!(
            out,
            "  {:>8}  {:>6.2}  {:>8.2}  {:>8.2}  {:>8}  {:>8}  {:>9}",
            row.label,
            row.cop,
            row.p_th_kw,
            row.p_el_kw,
            opt_cell(row.cop_ref, 2),
            opt_cell(row.cop_dev_pct, 1),
            opt_cell(row.p_th_dev_pct, 1),
        );
    }
    for failure in &report.failures {
        let _ = writeln!(
            out,
            "  {:>8}  did not converge (status {}: {})",
            failure.label, failure.status, failure.message
        );
    }

    let _ = writeln!(
        out,
        "  {} of {} points converged.",
        report.converged, report.attempted
    );
    match (report.fit, report.mean_cop_deviation_pct) {
        (Some(fit), Some(mean)) => {
            let _ = writeln!(
                out,
                "  Mean |COP deviation|: {mean:.1} % ({})",
                fit.as_str()
            );
        }
        _ => {
            let _ = writeln!(out, "  No reference data; classification skipped.");
        }
    }
    out
}

fn opt_cell(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "-".to_string(),
    }
}
