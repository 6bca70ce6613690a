//! Operating-point specification.
//!
//! Turns a fresh topology plus one operating point into an exactly
//! determined boundary-value problem, and seeds the solver's initial
//! guesses. The rules run in a fixed order; after the last one the
//! degree-of-freedom budget is asserted, so an under- or over-specified
//! network fails here instead of surfacing as an opaque convergence failure.

use tracing::warn;

use hp_core::units::constants::CP_WATER_KJ_PER_KG_K;
use hp_core::units::{Pressure, Temperature, as_celsius, as_kw, bar, c, kgps, unitless};
use hp_props::{Fluid, FluidFamily, PropertyModel, Refrigerant};
use hp_devices::DeviceParams;
use hp_topology::{Circuit, ComponentKind, ComponentParams, CycleTopology, DofCheck};

use crate::cycle::labels;
use crate::error::{ModelError, ModelResult};
use crate::operating_point::OperatingPoint;

/// Heating-loop supply/return temperature spread [K] (EN 14511 convention).
pub const HEATING_SPREAD_K: f64 = 5.0;

/// Source-loop inlet/outlet temperature spread [K].
pub const SOURCE_SPREAD_K: f64 = 3.0;

/// Source-loop mass flow margin over the heating loop.
pub const SOURCE_FLOW_MARGIN: f64 = 1.2;

/// Ideal expansion valve: no pressure loss.
pub const VALVE_PRESSURE_RATIO: f64 = 1.0;

/// Approach temperature [K] for the initial-guess saturation states:
/// evaporation is guessed this far below the source temperature,
/// condensation this far above the supply temperature.
pub const GUESS_APPROACH_K: f64 = 5.0;

/// Refrigerant mass-flow guess: nominal duty [kW] divided by this. A coarse
/// rule of thumb (roughly the latent heat scale in kJ/kg); its only job is
/// to land the solver inside its convergence basin.
pub const REFRIGERANT_FLOW_GUESS_DIVISOR: f64 = 200.0;

/// Fallback pressure guesses [bar] when the property backend cannot answer:
/// (evaporating, condensing), per fluid family.
pub const FALLBACK_GUESS_MEDIUM_HFC_BAR: (f64, f64) = (5.5, 18.0);
pub const FALLBACK_GUESS_OTHER_BAR: (f64, f64) = (3.0, 12.0);

/// Close the degrees of freedom of `topology` for one operating point.
///
/// Rules, in order:
/// 1. fluid composition on each circuit's reference connection only,
/// 2. secondary-loop temperatures and derived mass flows,
/// 3. component parameters from the device parameter set,
/// 4. refrigerant pressure guesses from saturation states (with fallback),
/// 5. refrigerant mass-flow guess.
///
/// Fails only on a degree-of-freedom mismatch, which is a specification bug,
/// not a data-dependent condition.
pub fn specify(
    topology: &mut CycleTopology,
    point: &OperatingPoint,
    params: &DeviceParams,
    props: &dyn PropertyModel,
) -> ModelResult<()> {
    // Rule 1: fluid on the designated reference connection of each circuit.
    // Fixing it on more than one connection per loop adds no equations but
    // can mask specification bugs, so it is done exactly once.
    let ref_label = topology
        .reference_connection(Circuit::Refrigerant)?
        .label
        .clone();
    topology.spec_mut(&ref_label)?.fluid =
        Some(Fluid::Refrigerant(params.refrigerant.clone()));
    for circuit in [Circuit::Heating, Circuit::Source] {
        let label = topology.reference_connection(circuit)?.label.clone();
        topology.spec_mut(&label)?.fluid = Some(Fluid::Water);
    }

    // Rule 2: secondary loops. Mass flow is derived from the nominal rating,
    // not chosen arbitrarily: m = P_th / (cp · ΔT).
    let p_th_kw = as_kw(params.p_th_nominal);
    let m_heating = secondary_mass_flow_kgps(p_th_kw, HEATING_SPREAD_K);
    let t_return = c(point.t_supply_c() - HEATING_SPREAD_K);
    {
        let spec = topology.spec_mut(labels::HEATING_IN)?;
        spec.temperature = Some(t_return);
        spec.mass_flow = Some(kgps(m_heating));
    }
    topology.spec_mut(labels::HEATING_OUT)?.temperature = Some(point.t_supply());

    let m_source = m_heating * SOURCE_FLOW_MARGIN;
    {
        let spec = topology.spec_mut(labels::SOURCE_IN)?;
        spec.temperature = Some(point.t_source());
        spec.mass_flow = Some(kgps(m_source));
    }
    topology.spec_mut(labels::SOURCE_OUT)?.temperature =
        Some(c(point.t_source_c() - SOURCE_SPREAD_K));

    // Rule 3: component parameters from the device parameter set.
    if let ComponentParams::Evaporator {
        pr_working,
        pr_secondary,
        ua_kw_per_k,
    } = topology.params_mut(ComponentKind::Evaporator)?
    {
        *pr_working = Some(params.pr_evaporator);
        *pr_secondary = Some(params.pr_evaporator);
        *ua_kw_per_k = Some(params.ua_evaporator_kw_per_k);
    }
    if let ComponentParams::Condenser {
        pr_working,
        pr_secondary,
        ua_kw_per_k,
    } = topology.params_mut(ComponentKind::Condenser)?
    {
        *pr_working = Some(params.pr_condenser);
        *pr_secondary = Some(params.pr_condenser);
        *ua_kw_per_k = Some(params.ua_condenser_kw_per_k);
    }
    if let ComponentParams::Compressor { eta_s } =
        topology.params_mut(ComponentKind::Compressor)?
    {
        *eta_s = Some(params.eta_s);
    }
    if let ComponentParams::ExpansionValve { pr } =
        topology.params_mut(ComponentKind::ExpansionValve)?
    {
        *pr = Some(unitless(VALVE_PRESSURE_RATIO));
    }

    // Rule 4: refrigerant pressure guesses. Low-pressure side on the
    // connections around evaporator and cycle closer, high-pressure side on
    // the connections around condenser.
    let (p_evap, p_cond) = initial_pressure_guesses(
        props,
        &params.refrigerant,
        point.t_source(),
        point.t_supply(),
    );
    for label in [labels::REF_EVAP_IN, labels::REF_COMP_IN, labels::REF_CLOSER_IN] {
        topology.spec_mut(label)?.pressure_guess = Some(p_evap);
    }
    for label in [labels::REF_COND_IN, labels::REF_VALVE_IN] {
        topology.spec_mut(label)?.pressure_guess = Some(p_cond);
    }

    // Rule 5: refrigerant mass-flow guess.
    topology.spec_mut(labels::REF_EVAP_IN)?.mass_flow_guess =
        Some(kgps(p_th_kw / REFRIGERANT_FLOW_GUESS_DIVISOR));

    // The budget must balance exactly; anything else is a specifier bug.
    match DofCheck::of(topology) {
        DofCheck::Balanced => Ok(()),
        DofCheck::Underdetermined { missing } => Err(ModelError::Underdetermined {
            missing,
            required: hp_topology::required_specification_count(topology),
        }),
        DofCheck::Overdetermined { excess } => Err(ModelError::Overdetermined {
            excess,
            required: hp_topology::required_specification_count(topology),
        }),
    }
}

/// Secondary-loop mass flow [kg/s] from a thermal duty [kW] and spread [K].
pub fn secondary_mass_flow_kgps(p_th_kw: f64, spread_k: f64) -> f64 {
    p_th_kw / (CP_WATER_KJ_PER_KG_K * spread_k)
}

/// Initial-guess pressures (evaporating, condensing) for the refrigerant
/// loop.
///
/// Queries the property backend for saturation pressure at
/// `t_source − GUESS_APPROACH_K` and `t_supply + GUESS_APPROACH_K`. When the
/// backend cannot answer (temperature out of range, unknown refrigerant),
/// both guesses fall back to fluid-family constants so the pipeline degrades
/// gracefully instead of aborting.
pub fn initial_pressure_guesses(
    props: &dyn PropertyModel,
    refrigerant: &Refrigerant,
    t_source: Temperature,
    t_supply: Temperature,
) -> (Pressure, Pressure) {
    let t_evap = c(as_celsius(t_source) - GUESS_APPROACH_K);
    let t_cond = c(as_celsius(t_supply) + GUESS_APPROACH_K);

    let evap = props.saturation_pressure(refrigerant, t_evap);
    let cond = props.saturation_pressure(refrigerant, t_cond);
    match (evap, cond) {
        (Ok(p_evap), Ok(p_cond)) => (p_evap, p_cond),
        (evap, cond) => {
            let cause = evap.err().or(cond.err());
            let (lo, hi) = match refrigerant.family() {
                FluidFamily::MediumPressureHfc => FALLBACK_GUESS_MEDIUM_HFC_BAR,
                FluidFamily::Other => FALLBACK_GUESS_OTHER_BAR,
            };
            warn!(
                refrigerant = %refrigerant,
                error = %cause.map(|e| e.to_string()).unwrap_or_default(),
                fallback_bar = ?(lo, hi),
                "property backend could not estimate pressures, using family fallback"
            );
            (bar(lo), bar(hi))
        }
    }
}
