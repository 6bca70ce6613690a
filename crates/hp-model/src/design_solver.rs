//! A coarse built-in cycle solver.
//!
//! `DesignPointSolver` is a stand-in for the external nonlinear
//! equation-of-state solver, good enough to run the validation pipeline end
//! to end in demos and tests. It does no iteration: with both secondary
//! loops fully specified, the condenser and evaporator duties are fixed by
//! the boundary values alone, the compressor power follows from the energy
//! balance, and the refrigerant states are reconstructed on a synthetic
//! enthalpy scale that closes every balance exactly.
//!
//! It honors every fixed specification, reports infeasible operating points
//! through a non-zero status, and produces states that pass the invocation
//! contract. What it does not do is evaluate a real equation of state; the
//! compressor's isentropic efficiency and the exchanger UA values are
//! feasibility inputs here, not resolved quantities.

use hp_core::units::constants::{CP_WATER_KJ_PER_KG_K, T_CELSIUS_ZERO_K};
use hp_core::units::{as_bar, as_celsius, as_kgps};
use hp_topology::{ComponentKind, ComponentParams, Connection, CycleTopology};

use crate::cycle::labels;
use crate::solve::{ComponentEnergy, ConnectionState, CycleSolver, SolvedState, SolverReturn};
use crate::specify::GUESS_APPROACH_K;

/// Synthetic latent-heat scale [kJ/kg] setting the refrigerant mass flow.
const LATENT_SCALE_KJ_PER_KG: f64 = 200.0;

/// Enthalpy of the evaporator-inlet state on the synthetic scale [kJ/kg].
const BASE_ENTHALPY_KJ_PER_KG: f64 = 250.0;

/// Compressor discharge superheat above condensing temperature [K].
const DISCHARGE_SUPERHEAT_K: f64 = 20.0;

/// Secondary-loop water pressure [bar].
const WATER_PRESSURE_BAR: f64 = 2.0;

/// Exit statuses, mirroring how the external solver reports failures.
const STATUS_INFEASIBLE: i32 = 1;
const STATUS_MISSING_SPEC: i32 = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct DesignPointSolver {}

impl DesignPointSolver {
    pub fn new() -> Self {
        Self {}
    }
}

impl CycleSolver for DesignPointSolver {
    fn name(&self) -> &str {
        "built-in design-point solver"
    }

    fn solve(&self, topology: &CycleTopology) -> SolverReturn {
        match solve_design_point(topology) {
            Ok(state) => SolverReturn::converged(state),
            Err(failure) => SolverReturn::failed(failure.status, failure.message),
        }
    }
}

struct SolveFailure {
    status: i32,
    message: String,
}

impl SolveFailure {
    fn missing(what: &str) -> Self {
        Self {
            status: STATUS_MISSING_SPEC,
            message: format!("missing specification: {what}"),
        }
    }

    fn infeasible(message: String) -> Self {
        Self {
            status: STATUS_INFEASIBLE,
            message,
        }
    }
}

fn solve_design_point(topology: &CycleTopology) -> Result<SolvedState, SolveFailure> {
    // Secondary boundary values; all fixed by the specifier.
    let t_return_c = fixed_temperature_c(topology, labels::HEATING_IN)?;
    let t_supply_c = fixed_temperature_c(topology, labels::HEATING_OUT)?;
    let m_heating = fixed_mass_flow_kgps(topology, labels::HEATING_IN)?;
    let t_source_in_c = fixed_temperature_c(topology, labels::SOURCE_IN)?;
    let t_source_out_c = fixed_temperature_c(topology, labels::SOURCE_OUT)?;
    let m_source = fixed_mass_flow_kgps(topology, labels::SOURCE_IN)?;

    // Both exchanger duties follow directly from the boundary values.
    let p_th_kw = m_heating * CP_WATER_KJ_PER_KG_K * (t_supply_c - t_return_c);
    let q_source_kw = m_source * CP_WATER_KJ_PER_KG_K * (t_source_in_c - t_source_out_c);
    if p_th_kw <= 0.0 || q_source_kw <= 0.0 {
        return Err(SolveFailure::infeasible(format!(
            "non-positive duty (heating {p_th_kw} kW, source {q_source_kw} kW)"
        )));
    }
    let p_el_kw = p_th_kw - q_source_kw;
    if p_el_kw <= 0.0 {
        return Err(SolveFailure::infeasible(format!(
            "source duty {q_source_kw} kW exceeds heating duty {p_th_kw} kW"
        )));
    }

    // Feasibility: the implied COP must stay below the Carnot limit at the
    // approach temperatures, otherwise no real cycle can realize it.
    let t_evap_c = t_source_in_c - GUESS_APPROACH_K;
    let t_cond_c = t_supply_c + GUESS_APPROACH_K;
    let t_evap_k = t_evap_c + T_CELSIUS_ZERO_K;
    let t_cond_k = t_cond_c + T_CELSIUS_ZERO_K;
    if t_cond_k <= t_evap_k {
        return Err(SolveFailure::infeasible(format!(
            "non-positive temperature lift ({t_evap_c} °C to {t_cond_c} °C)"
        )));
    }
    let cop = p_th_kw / p_el_kw;
    let cop_carnot = t_cond_k / (t_cond_k - t_evap_k);
    if cop >= cop_carnot {
        return Err(SolveFailure::infeasible(format!(
            "implied COP {cop:.2} exceeds Carnot limit {cop_carnot:.2}"
        )));
    }

    // Refrigerant loop on the synthetic enthalpy scale. The mass flow is
    // chosen so the evaporator adds exactly the latent scale, and the loop
    // closes at the base enthalpy after the isenthalpic valve.
    let m_ref = q_source_kw / LATENT_SCALE_KJ_PER_KG;
    let h0 = BASE_ENTHALPY_KJ_PER_KG;
    let h1 = h0 + q_source_kw / m_ref;
    let h2 = h1 + p_el_kw / m_ref;
    let h3 = h2 - p_th_kw / m_ref;

    let p_lo_bar = guess_pressure_bar(topology, labels::REF_EVAP_IN)?;
    let p_hi_bar = guess_pressure_bar(topology, labels::REF_COND_IN)?;
    let pr_evap = exchanger_pr_working(topology, ComponentKind::Evaporator)?;
    let pr_cond = exchanger_pr_working(topology, ComponentKind::Condenser)?;

    let refrigerant = [
        (labels::REF_EVAP_IN, p_lo_bar, h0, t_evap_c),
        (labels::REF_COMP_IN, p_lo_bar * pr_evap, h1, t_evap_c),
        (
            labels::REF_COND_IN,
            p_hi_bar,
            h2,
            t_cond_c + DISCHARGE_SUPERHEAT_K,
        ),
        (labels::REF_VALVE_IN, p_hi_bar * pr_cond, h3, t_cond_c),
        (labels::REF_CLOSER_IN, p_lo_bar, h3, t_evap_c),
    ];
    let water = [
        (labels::HEATING_IN, m_heating, t_return_c),
        (labels::HEATING_OUT, m_heating, t_supply_c),
        (labels::SOURCE_IN, m_source, t_source_in_c),
        (labels::SOURCE_OUT, m_source, t_source_out_c),
    ];

    let mut connections = Vec::with_capacity(refrigerant.len() + water.len());
    for (label, p_bar, h, t_c) in refrigerant {
        connections.push(ConnectionState {
            label: label.to_string(),
            mass_flow_kgps: m_ref,
            pressure_bar: p_bar,
            enthalpy_kj_per_kg: h,
            temperature_c: t_c,
        });
    }
    for (label, m, t_c) in water {
        connections.push(ConnectionState {
            label: label.to_string(),
            mass_flow_kgps: m,
            pressure_bar: WATER_PRESSURE_BAR,
            enthalpy_kj_per_kg: CP_WATER_KJ_PER_KG_K * t_c,
            temperature_c: t_c,
        });
    }

    Ok(SolvedState {
        connections,
        components: vec![
            ComponentEnergy {
                component: "Evaporator".to_string(),
                energy_kw: q_source_kw,
            },
            ComponentEnergy {
                component: "Compressor".to_string(),
                energy_kw: p_el_kw,
            },
            ComponentEnergy {
                component: "Condenser".to_string(),
                energy_kw: -p_th_kw,
            },
        ],
        iterations: 1,
        residual: 0.0,
    })
}

fn find_connection<'a>(
    topology: &'a CycleTopology,
    label: &str,
) -> Result<&'a Connection, SolveFailure> {
    topology
        .find_connection(label)
        .map_err(|_| SolveFailure::missing(label))
}

fn fixed_temperature_c(topology: &CycleTopology, label: &str) -> Result<f64, SolveFailure> {
    find_connection(topology, label)?
        .spec
        .temperature
        .map(as_celsius)
        .ok_or_else(|| SolveFailure::missing(&format!("temperature on '{label}'")))
}

fn fixed_mass_flow_kgps(topology: &CycleTopology, label: &str) -> Result<f64, SolveFailure> {
    find_connection(topology, label)?
        .spec
        .mass_flow
        .map(as_kgps)
        .ok_or_else(|| SolveFailure::missing(&format!("mass flow on '{label}'")))
}

fn guess_pressure_bar(topology: &CycleTopology, label: &str) -> Result<f64, SolveFailure> {
    find_connection(topology, label)?
        .spec
        .pressure_guess
        .map(as_bar)
        .ok_or_else(|| SolveFailure::missing(&format!("pressure guess on '{label}'")))
}

fn exchanger_pr_working(
    topology: &CycleTopology,
    kind: ComponentKind,
) -> Result<f64, SolveFailure> {
    let comp = topology
        .component_of_kind(kind)
        .map_err(|_| SolveFailure::missing(kind.as_str()))?;
    match &comp.params {
        ComponentParams::Evaporator { pr_working, .. }
        | ComponentParams::Condenser { pr_working, .. } => pr_working
            .map(|pr| pr.value)
            .ok_or_else(|| SolveFailure::missing(&format!("pr on '{}'", kind.as_str()))),
        _ => Err(SolveFailure::missing(kind.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::heat_pump_topology;
    use crate::extract::extract;
    use crate::operating_point::OperatingPoint;
    use crate::solve::{SolveOutcome, invoke};
    use crate::specify::specify;
    use hp_devices::DeviceParams;
    use hp_props::CorrelationModel;

    fn solve_point(t_source_c: f64, t_supply_c: f64) -> SolveOutcome {
        let mut topo = heat_pump_topology().unwrap();
        let point = OperatingPoint::from_celsius(t_source_c, t_supply_c);
        specify(
            &mut topo,
            &point,
            &DeviceParams::default(),
            &CorrelationModel::new(),
        )
        .unwrap();
        invoke(&DesignPointSolver::new(), &topo).unwrap()
    }

    #[test]
    fn standard_points_converge() {
        for t_source in [-10.0, -7.0, -5.0, 0.0, 5.0, 10.0] {
            let outcome = solve_point(t_source, 35.0);
            assert!(outcome.is_converged(), "B{t_source}/W35 did not converge");
        }
    }

    #[test]
    fn duties_follow_the_boundary_values() {
        // Default 5 kW device: heating duty equals the nominal rating, the
        // source duty is 1.2 × (3/5) of it, the rest is compressor work.
        let SolveOutcome::Converged(state) = solve_point(0.0, 35.0) else {
            panic!("expected convergence");
        };
        let point = OperatingPoint::from_celsius(0.0, 35.0);
        let result = extract(&point, &state).unwrap();
        assert!((result.p_th_kw - 5.0).abs() < 1e-9);
        assert!((result.q_source_kw - 3.6).abs() < 1e-9);
        assert!((result.p_el_kw - 1.4).abs() < 1e-9);
        assert!((result.cop - 5.0 / 1.4).abs() < 1e-9);
        assert!(result.energy_residual_kw.abs() < 1e-12);
    }

    #[test]
    fn refrigerant_loop_closes_on_the_enthalpy_scale() {
        let SolveOutcome::Converged(state) = solve_point(2.0, 35.0) else {
            panic!("expected convergence");
        };
        let h = |label: &str| state.connection(label).unwrap().enthalpy_kj_per_kg;
        // Isenthalpic valve, then the closer hands the state back unchanged.
        assert!((h("c3") - h("c4")).abs() < 1e-9);
        assert!((h("c4") - h("c0")).abs() < 1e-9);
        // Evaporation adds exactly the latent scale.
        assert!((h("c1") - h("c0") - LATENT_SCALE_KJ_PER_KG).abs() < 1e-9);
    }

    #[test]
    fn pressure_levels_split_low_and_high() {
        let SolveOutcome::Converged(state) = solve_point(0.0, 35.0) else {
            panic!("expected convergence");
        };
        let p = |label: &str| state.connection(label).unwrap().pressure_bar;
        assert!(p("c2") > p("c1"));
        assert!(p("c3") > p("c4"));
        // Exchanger pressure loss on the working side.
        assert!(p("c1") < p("c0"));
        assert!(p("c3") < p("c2"));
    }

    #[test]
    fn all_nine_connections_reported() {
        let SolveOutcome::Converged(state) = solve_point(0.0, 35.0) else {
            panic!("expected convergence");
        };
        assert_eq!(state.connections.len(), 9);
    }

    #[test]
    fn extreme_lift_fails_with_infeasible_status() {
        // At a -60 °C source the Carnot limit drops below the COP implied by
        // the fixed loop duties; a real solver would diverge here.
        let outcome = solve_point(-60.0, 35.0);
        match outcome {
            SolveOutcome::NotConverged { status, message } => {
                assert_eq!(status, STATUS_INFEASIBLE);
                assert!(message.contains("Carnot"), "message: {message}");
            }
            SolveOutcome::Converged(_) => panic!("expected infeasibility"),
        }
    }

    #[test]
    fn missing_boundary_values_reported_as_status_two() {
        let topo = heat_pump_topology().unwrap();
        let ret = DesignPointSolver::new().solve(&topo);
        assert_eq!(ret.status, STATUS_MISSING_SPEC);
        assert!(ret.message.contains("missing specification"));
    }
}
