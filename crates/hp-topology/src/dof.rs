//! Degree-of-freedom accounting.
//!
//! The external equation solver needs the network to be exactly determined:
//! the number of fixed boundary specifications must equal the number of
//! unknowns not already covered by component equations. That failure mode is
//! silent: an under- or over-specified network just fails to converge. This
//! module makes the budget a named, computable constant of the topology so
//! the specifier can assert it up front.

use crate::component::ComponentKind;
use crate::topology::CycleTopology;

/// Unknowns per connection: fluid composition, mass flow, pressure, enthalpy.
/// (Temperature, vapor quality, subcooling and superheat are property
/// relations on these, not independent unknowns.)
pub const UNKNOWNS_PER_CONNECTION: usize = 4;

/// Equations a component contributes regardless of any fixed parameters.
///
/// | kind           | count | breakdown                                                        |
/// |----------------|-------|------------------------------------------------------------------|
/// | Evaporator     | 5     | 2 mass balances, 2 composition propagations, 1 energy balance    |
/// | Condenser      | 6     | as evaporator + saturated liquid at working-side outlet          |
/// | Compressor     | 2     | mass balance, composition propagation                            |
/// | ExpansionValve | 3     | mass balance, composition propagation, isenthalpic constraint    |
/// | CycleCloser    | 3     | mass balance, pressure equality, enthalpy equality               |
/// | FeedSource     | 0     | boundary endpoint                                                |
/// | DrainSink      | 0     | boundary endpoint                                                |
///
/// The cycle closer deliberately does not propagate composition; that is why
/// the refrigerant must be fixed on exactly one connection of the loop.
pub fn intrinsic_equation_count(kind: ComponentKind) -> usize {
    match kind {
        ComponentKind::Evaporator => 5,
        ComponentKind::Condenser => 6,
        ComponentKind::Compressor => 2,
        ComponentKind::ExpansionValve => 3,
        ComponentKind::CycleCloser => 3,
        ComponentKind::FeedSource | ComponentKind::DrainSink => 0,
    }
}

/// Required number of fixed specifications for the topology to be exactly
/// determined. For the standard five-node heat-pump loop with two secondary
/// loops this evaluates to 17.
pub fn required_specification_count(topology: &CycleTopology) -> usize {
    let unknowns = topology.connections().len() * UNKNOWNS_PER_CONNECTION;
    let equations: usize = topology
        .components()
        .iter()
        .map(|comp| intrinsic_equation_count(comp.kind))
        .sum();
    unknowns.saturating_sub(equations)
}

/// Fixed specifications currently present: connection boundary values plus
/// fixed component parameters. Initial guesses are excluded.
pub fn fixed_specification_count(topology: &CycleTopology) -> usize {
    let conn_specs: usize = topology
        .connections()
        .iter()
        .map(|conn| conn.spec.fixed_count())
        .sum();
    let comp_specs: usize = topology
        .components()
        .iter()
        .map(|comp| comp.params.fixed_count())
        .sum();
    conn_specs + comp_specs
}

/// Outcome of comparing fixed specifications against the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DofCheck {
    /// Exactly determined.
    Balanced,
    /// Too few specifications; the solver would report a singular system.
    Underdetermined { missing: usize },
    /// Too many specifications; the solver would report an inconsistent one.
    Overdetermined { excess: usize },
}

impl DofCheck {
    pub fn of(topology: &CycleTopology) -> Self {
        let required = required_specification_count(topology);
        let fixed = fixed_specification_count(topology);
        match fixed.cmp(&required) {
            std::cmp::Ordering::Less => Self::Underdetermined {
                missing: required - fixed,
            },
            std::cmp::Ordering::Equal => Self::Balanced,
            std::cmp::Ordering::Greater => Self::Overdetermined {
                excess: fixed - required,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TopologyBuilder;
    use crate::connection::Circuit;
    use hp_core::units::{bar, c, kgps};
    use hp_props::Fluid;

    fn single_pipe() -> CycleTopology {
        let mut builder = TopologyBuilder::new();
        let src = builder.add_component(ComponentKind::FeedSource, "SourceInlet");
        let snk = builder.add_component(ComponentKind::DrainSink, "SourceOutlet");
        builder.connect(src, snk, Circuit::Source, "q");
        builder.build().unwrap()
    }

    #[test]
    fn endpoint_only_circuit_needs_four_specs() {
        let topo = single_pipe();
        assert_eq!(required_specification_count(&topo), 4);
        assert_eq!(
            DofCheck::of(&topo),
            DofCheck::Underdetermined { missing: 4 }
        );
    }

    #[test]
    fn budget_tracks_added_specs() {
        let mut topo = single_pipe();
        {
            let spec = topo.spec_mut("q").unwrap();
            spec.fluid = Some(Fluid::Water);
            spec.temperature = Some(c(10.0));
            spec.mass_flow = Some(kgps(0.28));
        }
        assert_eq!(
            DofCheck::of(&topo),
            DofCheck::Underdetermined { missing: 1 }
        );

        topo.spec_mut("q").unwrap().pressure = Some(bar(2.0));
        assert_eq!(DofCheck::of(&topo), DofCheck::Balanced);

        topo.spec_mut("q").unwrap().vapor_quality = Some(0.0);
        assert_eq!(DofCheck::of(&topo), DofCheck::Overdetermined { excess: 1 });
    }

    #[test]
    fn guesses_never_move_the_budget() {
        let mut topo = single_pipe();
        let before = fixed_specification_count(&topo);
        {
            let spec = topo.spec_mut("q").unwrap();
            spec.pressure_guess = Some(bar(2.0));
            spec.temperature_guess = Some(c(10.0));
            spec.mass_flow_guess = Some(kgps(0.28));
        }
        assert_eq!(fixed_specification_count(&topo), before);
    }
}
