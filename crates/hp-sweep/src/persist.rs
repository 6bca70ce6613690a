//! Persistence of sweep artifacts: a CSV result table and a JSON manifest.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::SweepResult;
use crate::sweep::{SweepReport, SweepStatus, ValidationRow};

/// Manifest written next to the result table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepManifest {
    pub device: Option<String>,
    pub solver: String,
    pub timestamp: String,
    pub attempted: usize,
    pub converged: usize,
    pub status: String,
    pub mean_cop_deviation_pct: Option<f64>,
    pub fit: Option<String>,
}

impl SweepManifest {
    pub fn new(report: &SweepReport, solver: &str) -> Self {
        Self {
            device: report.device.clone(),
            solver: solver.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            attempted: report.attempted,
            converged: report.converged,
            status: status_label(report.status).to_string(),
            mean_cop_deviation_pct: report.mean_cop_deviation_pct,
            fit: report.fit.map(|f| f.as_str().to_string()),
        }
    }
}

fn status_label(status: SweepStatus) -> &'static str {
    match status {
        SweepStatus::Completed => "completed",
        SweepStatus::Partial => "partial",
        SweepStatus::NoConvergence => "no_convergence",
    }
}

/// Stable column order of the result table. Reference and deviation cells
/// are left empty when no reference data matched.
pub const CSV_HEADER: &str = "testpoint,T_source_C,T_supply_C,COP,P_th_kW,P_el_kW,Q_source_kW,COP_ref,P_th_ref_kW,COP_dev_pct,P_th_dev_pct";

/// Render the validation table as CSV. Deterministic for identical inputs.
pub fn render_csv(rows: &[ValidationRow]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    for row in rows {
        csv.push_str(&format!(
            "{},{},{},{:.4},{:.4},{:.4},{:.4},{},{},{},{}\n",
            row.label,
            row.t_source_c,
            row.t_supply_c,
            row.cop,
            row.p_th_kw,
            row.p_el_kw,
            row.q_source_kw,
            opt_cell(row.cop_ref, 4),
            opt_cell(row.p_th_ref_kw, 4),
            opt_cell(row.cop_dev_pct, 2),
            opt_cell(row.p_th_dev_pct, 2),
        ));
    }
    csv
}

fn opt_cell(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => String::new(),
    }
}

/// Write `validation.csv` and `manifest.json` into `dir`, creating it if
/// needed.
pub fn save_report(dir: &Path, report: &SweepReport, solver: &str) -> SweepResult<()> {
    fs::create_dir_all(dir)?;

    let csv_path = dir.join("validation.csv");
    fs::write(csv_path, render_csv(&report.rows))?;

    let manifest = SweepManifest::new(report, solver);
    let manifest_path = dir.join("manifest.json");
    fs::write(manifest_path, serde_json::to_string_pretty(&manifest)?)?;

    Ok(())
}
