//! Performance metric extraction from a converged cycle state.

use tracing::{debug, warn};

use crate::cycle::labels;
use crate::error::{ModelError, ModelResult};
use crate::operating_point::OperatingPoint;
use crate::solve::SolvedState;

/// Energy residual [kW] above which a converged state is flagged at warn
/// level. Well above honest floating-point noise, well below any physically
/// meaningful imbalance at domestic heat-pump scale.
pub const ENERGY_RESIDUAL_WARN_KW: f64 = 1e-3;

/// Floor for the electrical power in the COP quotient [kW], so a degenerate
/// state yields a huge finite COP instead of infinity.
pub const ELECTRICAL_POWER_FLOOR_KW: f64 = 1e-9;

/// Performance metrics of one solved operating point.
///
/// All duties are magnitudes: `p_th_kw` is heat delivered to the heating
/// loop, `p_el_kw` is compressor power drawn, `q_source_kw` is heat absorbed
/// from the source loop. The cycle-detail fields are present when the state
/// carries the corresponding refrigerant connections.
#[derive(Debug, Clone, PartialEq)]
pub struct PointResult {
    pub point: OperatingPoint,
    pub cop: f64,
    pub p_th_kw: f64,
    pub p_el_kw: f64,
    pub q_source_kw: f64,
    /// First-law closure defect, `|p_th − q_source − p_el|` [kW].
    pub energy_residual_kw: f64,
    pub iterations: u32,

    // Cycle detail for reporting.
    pub t_evaporation_c: Option<f64>,
    pub t_condensation_c: Option<f64>,
    pub p_evaporation_bar: Option<f64>,
    pub p_condensation_bar: Option<f64>,
    pub m_refrigerant_kgps: Option<f64>,
}

/// Compute performance metrics from a converged state.
///
/// Reads the three energy flows off the named components and derives COP
/// from their magnitudes. A residual beyond `ENERGY_RESIDUAL_WARN_KW` is
/// reported at warn level but does not reject the point; a missing component
/// entry does, since nothing meaningful can be computed without it.
pub fn extract(point: &OperatingPoint, state: &SolvedState) -> ModelResult<PointResult> {
    let q_source_kw = component_energy(state, "Evaporator")?.abs();
    let p_el_kw = component_energy(state, "Compressor")?.abs();
    let p_th_kw = component_energy(state, "Condenser")?.abs();

    let energy_residual_kw = (p_th_kw - q_source_kw - p_el_kw).abs();
    if energy_residual_kw > ENERGY_RESIDUAL_WARN_KW {
        warn!(
            point = %point,
            residual_kw = energy_residual_kw,
            "energy balance does not close"
        );
    }

    let cop = p_th_kw / p_el_kw.max(ELECTRICAL_POWER_FLOOR_KW);
    debug!(point = %point, cop, p_th_kw, p_el_kw, "extracted point result");

    // Cycle detail is read at the evaporator outlet (after the working-side
    // pressure drop) and at the condenser inlet/outlet.
    let evap_out = state.connection(labels::REF_COMP_IN);
    let cond_out = state.connection(labels::REF_VALVE_IN);
    let cond_in = state.connection(labels::REF_COND_IN);

    Ok(PointResult {
        point: *point,
        cop,
        p_th_kw,
        p_el_kw,
        q_source_kw,
        energy_residual_kw,
        iterations: state.iterations,
        t_evaporation_c: evap_out.map(|cs| cs.temperature_c),
        t_condensation_c: cond_out.map(|cs| cs.temperature_c),
        p_evaporation_bar: evap_out.map(|cs| cs.pressure_bar),
        p_condensation_bar: cond_in.map(|cs| cs.pressure_bar),
        m_refrigerant_kgps: evap_out.map(|cs| cs.mass_flow_kgps),
    })
}

fn component_energy(state: &SolvedState, component: &str) -> ModelResult<f64> {
    state
        .component_energy(component)
        .ok_or_else(|| ModelError::Extraction {
            detail: format!("no energy entry for component '{component}'"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solve::{ComponentEnergy, ConnectionState};

    fn state_with(q_evap: f64, p_comp: f64, q_cond: f64) -> SolvedState {
        SolvedState {
            connections: Vec::new(),
            components: vec![
                ComponentEnergy {
                    component: "Evaporator".into(),
                    energy_kw: q_evap,
                },
                ComponentEnergy {
                    component: "Compressor".into(),
                    energy_kw: p_comp,
                },
                ComponentEnergy {
                    component: "Condenser".into(),
                    energy_kw: q_cond,
                },
            ],
            iterations: 9,
            residual: 1e-9,
        }
    }

    fn point() -> OperatingPoint {
        OperatingPoint::from_celsius(0.0, 35.0)
    }

    #[test]
    fn metrics_from_balanced_state() {
        // 3.8 kW from the source, 1.4 kW of work, 5.2 kW delivered.
        let result = extract(&point(), &state_with(3.8, 1.4, -5.2)).unwrap();
        assert!((result.p_th_kw - 5.2).abs() < 1e-12);
        assert!((result.p_el_kw - 1.4).abs() < 1e-12);
        assert!((result.q_source_kw - 3.8).abs() < 1e-12);
        assert!((result.cop - 5.2 / 1.4).abs() < 1e-12);
        assert!(result.energy_residual_kw < 1e-12);
        assert_eq!(result.iterations, 9);
    }

    #[test]
    fn signs_are_normalized_to_magnitudes() {
        // Same state with the solver's signed convention flattened out.
        let a = extract(&point(), &state_with(3.8, 1.4, -5.2)).unwrap();
        let b = extract(&point(), &state_with(3.8, 1.4, 5.2)).unwrap();
        assert_eq!(a.cop, b.cop);
        assert_eq!(a.p_th_kw, b.p_th_kw);
    }

    #[test]
    fn residual_reported_not_fatal() {
        let result = extract(&point(), &state_with(3.8, 1.4, -6.0)).unwrap();
        assert!((result.energy_residual_kw - 0.8).abs() < 1e-12);
    }

    #[test]
    fn tiny_electrical_power_yields_finite_cop() {
        let result = extract(&point(), &state_with(5.2, 0.0, -5.2)).unwrap();
        assert!(result.cop.is_finite());
        assert!(result.cop > 0.0);
    }

    #[test]
    fn missing_component_rejected() {
        let mut state = state_with(3.8, 1.4, -5.2);
        state.components.retain(|c| c.component != "Condenser");
        let err = extract(&point(), &state).unwrap_err();
        match err {
            ModelError::Extraction { detail } => assert!(detail.contains("Condenser")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn cycle_detail_absent_without_connection_states() {
        let result = extract(&point(), &state_with(3.8, 1.4, -5.2)).unwrap();
        assert!(result.t_evaporation_c.is_none());
        assert!(result.m_refrigerant_kgps.is_none());
    }

    #[test]
    fn cycle_detail_read_from_refrigerant_connections() {
        let mut state = state_with(3.8, 1.4, -5.2);
        state.connections = vec![
            ConnectionState {
                label: "c0".into(),
                mass_flow_kgps: 0.017,
                pressure_bar: 5.5,
                enthalpy_kj_per_kg: 250.0,
                temperature_c: -5.0,
            },
            ConnectionState {
                label: "c1".into(),
                mass_flow_kgps: 0.018,
                pressure_bar: 5.39,
                enthalpy_kj_per_kg: 450.0,
                temperature_c: -5.0,
            },
            ConnectionState {
                label: "c2".into(),
                mass_flow_kgps: 0.018,
                pressure_bar: 18.0,
                enthalpy_kj_per_kg: 527.8,
                temperature_c: 60.0,
            },
            ConnectionState {
                label: "c3".into(),
                mass_flow_kgps: 0.018,
                pressure_bar: 17.64,
                enthalpy_kj_per_kg: 250.0,
                temperature_c: 40.0,
            },
        ];
        let result = extract(&point(), &state).unwrap();
        assert_eq!(result.t_evaporation_c, Some(-5.0));
        assert_eq!(result.t_condensation_c, Some(40.0));
        assert_eq!(result.p_condensation_bar, Some(18.0));
        // Evaporation pressure and refrigerant flow come from the evaporator
        // outlet, after its working-side pressure drop.
        assert_eq!(result.p_evaporation_bar, Some(5.39));
        assert_eq!(result.m_refrigerant_kgps, Some(0.018));
    }
}
