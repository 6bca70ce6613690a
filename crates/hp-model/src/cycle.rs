//! The fixed heat-pump cycle topology.

use hp_topology::{Circuit, ComponentKind, CycleTopology, TopologyBuilder, TopologyResult};

/// Connection labels of the standard topology, following the usual numbering
/// of the refrigerant loop (c0 leaves the cycle closer).
pub mod labels {
    pub const REF_EVAP_IN: &str = "c0";
    pub const REF_COMP_IN: &str = "c1";
    pub const REF_COND_IN: &str = "c2";
    pub const REF_VALVE_IN: &str = "c3";
    pub const REF_CLOSER_IN: &str = "c4";
    pub const HEATING_IN: &str = "h_in";
    pub const HEATING_OUT: &str = "h_out";
    pub const SOURCE_IN: &str = "q_in";
    pub const SOURCE_OUT: &str = "q_out";
}

/// Build the five-node refrigerant loop plus the two secondary water loops.
///
/// Refrigerant: cycle closer → evaporator → compressor → condenser →
/// expansion valve → cycle closer. Heating water passes through the
/// condenser's secondary side, source water through the evaporator's.
///
/// Pure construction; returns a fresh, unspecified topology every call so no
/// operating point can leak boundary values into another. The only failure
/// modes are programming-error-class invariant violations caught by the
/// builder's validation.
pub fn heat_pump_topology() -> TopologyResult<CycleTopology> {
    let mut builder = TopologyBuilder::new();

    let evaporator = builder.add_component(ComponentKind::Evaporator, "Evaporator");
    let compressor = builder.add_component(ComponentKind::Compressor, "Compressor");
    let condenser = builder.add_component(ComponentKind::Condenser, "Condenser");
    let valve = builder.add_component(ComponentKind::ExpansionValve, "ExpansionValve");
    let closer = builder.add_component(ComponentKind::CycleCloser, "CycleCloser");

    let heating_return = builder.add_component(ComponentKind::FeedSource, "HeatingReturn");
    let heating_supply = builder.add_component(ComponentKind::DrainSink, "HeatingSupply");
    let source_inlet = builder.add_component(ComponentKind::FeedSource, "SourceInlet");
    let source_outlet = builder.add_component(ComponentKind::DrainSink, "SourceOutlet");

    builder.connect(closer, evaporator, Circuit::Refrigerant, labels::REF_EVAP_IN);
    builder.connect(evaporator, compressor, Circuit::Refrigerant, labels::REF_COMP_IN);
    builder.connect(compressor, condenser, Circuit::Refrigerant, labels::REF_COND_IN);
    builder.connect(condenser, valve, Circuit::Refrigerant, labels::REF_VALVE_IN);
    builder.connect(valve, closer, Circuit::Refrigerant, labels::REF_CLOSER_IN);

    builder.connect(heating_return, condenser, Circuit::Heating, labels::HEATING_IN);
    builder.connect(condenser, heating_supply, Circuit::Heating, labels::HEATING_OUT);

    builder.connect(source_inlet, evaporator, Circuit::Source, labels::SOURCE_IN);
    builder.connect(evaporator, source_outlet, Circuit::Source, labels::SOURCE_OUT);

    builder.build()
}
