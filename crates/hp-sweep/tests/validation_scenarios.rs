//! End-to-end sweep scenarios: missing reference data, partial convergence,
//! total non-convergence.

use std::fs;

use hp_core::units::as_celsius;
use hp_devices::{DeviceParams, ReferenceCurve};
use hp_model::{CycleSolver, DesignPointSolver, SolverReturn};
use hp_props::CorrelationModel;
use hp_sweep::{SweepStatus, run_sweep};
use hp_topology::CycleTopology;

/// Delegates to the built-in solver but fails for chosen source temperatures.
struct SelectiveFailSolver {
    inner: DesignPointSolver,
    fail_at_source_c: Vec<f64>,
}

impl CycleSolver for SelectiveFailSolver {
    fn name(&self) -> &str {
        "selective-fail"
    }

    fn solve(&self, topology: &CycleTopology) -> SolverReturn {
        let t_source_c = topology
            .find_connection("q_in")
            .ok()
            .and_then(|conn| conn.spec.temperature)
            .map(as_celsius);
        if let Some(t) = t_source_c
            && self.fail_at_source_c.iter().any(|f| (f - t).abs() < 1e-9)
        {
            return SolverReturn::failed(7, "maximum iterations exceeded");
        }
        self.inner.solve(topology)
    }
}

struct AlwaysFailSolver;

impl CycleSolver for AlwaysFailSolver {
    fn name(&self) -> &str {
        "always-fail"
    }

    fn solve(&self, _topology: &CycleTopology) -> SolverReturn {
        SolverReturn::failed(1, "singular Jacobian")
    }
}

fn empty_reference_curve() -> ReferenceCurve {
    let path = std::env::temp_dir().join("hp-sweep-empty-reference.csv");
    fs::write(
        &path,
        "Testpoint,T_source,T_supply,COP_ref,P_th_ref_kW,P_el_ref_kW\n",
    )
    .unwrap();
    let curve = ReferenceCurve::load(&path, None).unwrap();
    let _ = fs::remove_file(&path);
    curve
}

#[test]
fn sweep_without_reference_data_skips_classification() {
    let report = run_sweep(
        &DeviceParams::default(),
        &CorrelationModel::new(),
        &DesignPointSolver::new(),
        &empty_reference_curve(),
    )
    .unwrap();

    assert_eq!(report.status, SweepStatus::Completed);
    assert_eq!(report.rows.len(), 6);
    // Metrics still reported per point, deviations absent, no fit class.
    assert!(report.rows.iter().all(|r| r.cop > 0.0));
    assert!(report.rows.iter().all(|r| r.cop_ref.is_none()));
    assert!(report.rows.iter().all(|r| r.cop_dev_pct.is_none()));
    assert!(report.fit.is_none());
    assert!(report.mean_cop_deviation_pct.is_none());
}

#[test]
fn failed_point_recorded_and_sweep_continues() {
    let solver = SelectiveFailSolver {
        inner: DesignPointSolver::new(),
        fail_at_source_c: vec![-7.0],
    };
    let report = run_sweep(
        &DeviceParams::default(),
        &CorrelationModel::new(),
        &solver,
        &ReferenceCurve::synthetic_example(),
    )
    .unwrap();

    assert_eq!(report.status, SweepStatus::Partial);
    assert_eq!(report.converged, 5);
    assert_eq!(report.attempted, 6);
    assert_eq!(report.rows.len(), 5);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].label, "B-7/W35");
    assert_eq!(report.failures[0].status, 7);
    // The surviving rows still classify.
    assert!(report.fit.is_some());
}

#[test]
fn all_points_failing_is_a_distinct_status() {
    let report = run_sweep(
        &DeviceParams::default(),
        &CorrelationModel::new(),
        &AlwaysFailSolver,
        &ReferenceCurve::synthetic_example(),
    )
    .unwrap();

    assert_eq!(report.status, SweepStatus::NoConvergence);
    assert!(report.rows.is_empty());
    assert_eq!(report.failures.len(), 6);
    assert_eq!(report.converged, 0);
    assert!(report.fit.is_none());
}

#[test]
fn energy_balance_closes_on_every_converged_point() {
    let report = run_sweep(
        &DeviceParams::default(),
        &CorrelationModel::new(),
        &DesignPointSolver::new(),
        &ReferenceCurve::synthetic_example(),
    )
    .unwrap();
    for row in &report.rows {
        let residual = (row.p_th_kw - row.q_source_kw - row.p_el_kw).abs();
        assert!(residual < 1e-9, "residual {residual} kW at {}", row.label);
    }
}
