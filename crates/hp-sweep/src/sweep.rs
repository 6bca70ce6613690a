//! Sweep execution, reference joining and fit classification.

use serde::Serialize;
use tracing::{info, warn};

use hp_devices::{DeviceParams, ReferenceCurve};
use hp_model::{
    CycleSolver, OperatingPoint, PointResult, SolveOutcome, extract, heat_pump_topology, invoke,
    specify,
};
use hp_props::PropertyModel;

use crate::SweepResult;

/// The six canonical brine/water rating points: source temperature sweep at
/// a fixed 35 °C supply.
pub const STANDARD_TEST_POINTS: [(f64, f64); 6] = [
    (-10.0, 35.0),
    (-7.0, 35.0),
    (-5.0, 35.0),
    (0.0, 35.0),
    (5.0, 35.0),
    (10.0, 35.0),
];

/// Classification bands for the mean absolute COP deviation.
pub const FIT_GOOD_LIMIT_PCT: f64 = 10.0;
pub const FIT_ACCEPTABLE_LIMIT_PCT: f64 = 20.0;

/// Fit quality against the reference curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FitClass {
    Good,
    Acceptable,
    Poor,
}

impl FitClass {
    /// Classify a mean absolute COP deviation in percent.
    pub fn from_mean_abs_deviation_pct(pct: f64) -> Self {
        if pct < FIT_GOOD_LIMIT_PCT {
            Self::Good
        } else if pct <= FIT_ACCEPTABLE_LIMIT_PCT {
            Self::Acceptable
        } else {
            Self::Poor
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Acceptable => "acceptable",
            Self::Poor => "poor",
        }
    }
}

/// One converged point of the validation table. Reference columns are absent
/// when the curve has no entry at this source temperature; that is "no
/// reference data", not a failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationRow {
    pub label: String,
    pub t_source_c: f64,
    pub t_supply_c: f64,
    pub cop: f64,
    pub p_th_kw: f64,
    pub p_el_kw: f64,
    pub q_source_kw: f64,
    pub cop_ref: Option<f64>,
    pub p_th_ref_kw: Option<f64>,
    /// Signed deviation `(model − reference) / reference × 100`.
    pub cop_dev_pct: Option<f64>,
    pub p_th_dev_pct: Option<f64>,
}

/// A point the solver gave up on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedPoint {
    pub label: String,
    pub t_source_c: f64,
    pub status: i32,
    pub message: String,
}

/// Overall sweep outcome.
///
/// `NoConvergence` is reserved for "every point failed"; it is never used
/// for a sweep that merely lacks reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SweepStatus {
    /// Every attempted point converged.
    Completed,
    /// Some points converged, some failed.
    Partial,
    /// No point converged.
    NoConvergence,
}

/// Final artifact of a validation sweep. Rows are ordered by increasing
/// source temperature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub device: Option<String>,
    pub rows: Vec<ValidationRow>,
    pub failures: Vec<FailedPoint>,
    pub attempted: usize,
    pub converged: usize,
    pub status: SweepStatus,
    /// Mean absolute COP deviation over rows with reference data; `None`
    /// when nothing could be joined.
    pub mean_cop_deviation_pct: Option<f64>,
    /// Classification of the mean deviation; skipped (not defaulted) when
    /// there is no reference data to classify against.
    pub fit: Option<FitClass>,
}

/// Run the full pipeline for a single operating point.
///
/// `Ok(None)` means the solver did not converge, which is an expected
/// outcome; errors are reserved for specification and contract violations.
pub fn simulate_point(
    point: &OperatingPoint,
    params: &DeviceParams,
    props: &dyn PropertyModel,
    solver: &dyn CycleSolver,
) -> SweepResult<Option<PointResult>> {
    match solve_one(point, params, props, solver)? {
        PointOutcome::Converged(result) => Ok(Some(result)),
        PointOutcome::Failed { status, message } => {
            warn!(point = %point, status, message = %message, "point did not converge");
            Ok(None)
        }
    }
}

/// Run the validation sweep over the six canonical points.
///
/// Each point gets a fresh topology; a failed point is recorded and the
/// sweep continues. Converged points are joined against `reference` by exact
/// source-temperature match.
pub fn run_sweep(
    params: &DeviceParams,
    props: &dyn PropertyModel,
    solver: &dyn CycleSolver,
    reference: &ReferenceCurve,
) -> SweepResult<SweepReport> {
    let mut rows = Vec::new();
    let mut failures = Vec::new();

    for (t_source_c, t_supply_c) in STANDARD_TEST_POINTS {
        let point = OperatingPoint::from_celsius(t_source_c, t_supply_c);
        match solve_one(&point, params, props, solver)? {
            PointOutcome::Converged(result) => {
                rows.push(join_reference(&point, &result, reference));
            }
            PointOutcome::Failed { status, message } => {
                warn!(point = %point, status, message = %message, "point did not converge");
                failures.push(FailedPoint {
                    label: point.label(),
                    t_source_c,
                    status,
                    message,
                });
            }
        }
    }

    let attempted = STANDARD_TEST_POINTS.len();
    let converged = rows.len();
    let status = if converged == 0 {
        SweepStatus::NoConvergence
    } else if converged < attempted {
        SweepStatus::Partial
    } else {
        SweepStatus::Completed
    };

    let deviations: Vec<f64> = rows.iter().filter_map(|row| row.cop_dev_pct).collect();
    let mean_cop_deviation_pct = if deviations.is_empty() {
        None
    } else {
        Some(deviations.iter().map(|d| d.abs()).sum::<f64>() / deviations.len() as f64)
    };
    let fit = mean_cop_deviation_pct.map(FitClass::from_mean_abs_deviation_pct);

    info!(
        device = params.device_name.as_deref().unwrap_or("default"),
        converged,
        attempted,
        fit = fit.map(FitClass::as_str).unwrap_or("n/a"),
        "sweep finished"
    );

    Ok(SweepReport {
        device: params.device_name.clone(),
        rows,
        failures,
        attempted,
        converged,
        status,
        mean_cop_deviation_pct,
        fit,
    })
}

enum PointOutcome {
    Converged(PointResult),
    Failed { status: i32, message: String },
}

fn solve_one(
    point: &OperatingPoint,
    params: &DeviceParams,
    props: &dyn PropertyModel,
    solver: &dyn CycleSolver,
) -> SweepResult<PointOutcome> {
    let mut topology = heat_pump_topology().map_err(hp_model::ModelError::from)?;
    specify(&mut topology, point, params, props)?;
    match invoke(solver, &topology)? {
        SolveOutcome::Converged(state) => {
            let result = extract(point, &state)?;
            Ok(PointOutcome::Converged(result))
        }
        SolveOutcome::NotConverged { status, message } => {
            Ok(PointOutcome::Failed { status, message })
        }
    }
}

fn join_reference(
    point: &OperatingPoint,
    result: &PointResult,
    reference: &ReferenceCurve,
) -> ValidationRow {
    let matched = reference.lookup(point.t_source_c());
    let cop_ref = matched.map(|p| p.cop_ref);
    let p_th_ref_kw = matched.map(|p| p.p_th_ref_kw);
    ValidationRow {
        label: point.label(),
        t_source_c: point.t_source_c(),
        t_supply_c: point.t_supply_c(),
        cop: result.cop,
        p_th_kw: result.p_th_kw,
        p_el_kw: result.p_el_kw,
        q_source_kw: result.q_source_kw,
        cop_ref,
        p_th_ref_kw,
        cop_dev_pct: cop_ref.map(|r| signed_deviation_pct(result.cop, r)),
        p_th_dev_pct: p_th_ref_kw.map(|r| signed_deviation_pct(result.p_th_kw, r)),
    }
}

fn signed_deviation_pct(model: f64, reference: f64) -> f64 {
    (model - reference) / reference * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use hp_model::DesignPointSolver;
    use hp_props::CorrelationModel;

    #[test]
    fn classification_bands() {
        assert_eq!(FitClass::from_mean_abs_deviation_pct(0.0), FitClass::Good);
        assert_eq!(FitClass::from_mean_abs_deviation_pct(9.99), FitClass::Good);
        assert_eq!(
            FitClass::from_mean_abs_deviation_pct(10.0),
            FitClass::Acceptable
        );
        assert_eq!(
            FitClass::from_mean_abs_deviation_pct(20.0),
            FitClass::Acceptable
        );
        assert_eq!(FitClass::from_mean_abs_deviation_pct(20.01), FitClass::Poor);
    }

    #[test]
    fn signed_deviation_keeps_direction() {
        assert!((signed_deviation_pct(3.3, 3.0) - 10.0).abs() < 1e-9);
        assert!((signed_deviation_pct(2.7, 3.0) + 10.0).abs() < 1e-9);
    }

    #[test]
    fn full_sweep_with_example_reference() {
        let report = run_sweep(
            &DeviceParams::default(),
            &CorrelationModel::new(),
            &DesignPointSolver::new(),
            &ReferenceCurve::synthetic_example(),
        )
        .unwrap();

        assert_eq!(report.status, SweepStatus::Completed);
        assert_eq!(report.attempted, 6);
        assert_eq!(report.converged, 6);
        assert_eq!(report.rows.len(), 6);
        assert!(report.failures.is_empty());
        assert!(report.fit.is_some());
        assert!(report.mean_cop_deviation_pct.unwrap() > 0.0);

        // Rows in increasing source-temperature order, all joined.
        let temps: Vec<f64> = report.rows.iter().map(|r| r.t_source_c).collect();
        assert_eq!(temps, vec![-10.0, -7.0, -5.0, 0.0, 5.0, 10.0]);
        assert!(report.rows.iter().all(|r| r.cop_ref.is_some()));
        assert!(report.rows.iter().all(|r| r.cop_dev_pct.is_some()));
    }

    #[test]
    fn simulate_point_returns_metrics() {
        let point = OperatingPoint::from_celsius(0.0, 35.0);
        let result = simulate_point(
            &point,
            &DeviceParams::default(),
            &CorrelationModel::new(),
            &DesignPointSolver::new(),
        )
        .unwrap()
        .expect("point should converge");
        assert!(result.cop > 1.0 && result.cop.is_finite());
        assert!((result.p_th_kw - 5.0).abs() < 1e-9);
    }
}
