//! Incremental topology builder.

use hp_core::{CompId, ConnId};

use crate::component::{Component, ComponentKind, ComponentParams};
use crate::connection::{Circuit, Connection, ConnectionSpec};
use crate::error::TopologyResult;
use crate::topology::CycleTopology;
use crate::validate;

/// Builder for constructing a cycle topology incrementally.
///
/// Use `add_component` and `connect` to build up the network, then call
/// `build()` to validate and freeze it into a `CycleTopology`. Construction
/// is pure: the only failure modes are programming-error-class invariant
/// violations caught by validation.
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    components: Vec<Component>,
    connections: Vec<Connection>,
}

impl TopologyBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component and return its ID.
    ///
    /// The parameter set starts out empty; the operating-point specifier
    /// fills it in later.
    pub fn add_component(&mut self, kind: ComponentKind, name: impl Into<String>) -> CompId {
        let id = CompId::from_index(self.components.len() as u32);
        self.components.push(Component {
            id,
            name: name.into(),
            kind,
            params: ComponentParams::unset(kind),
        });
        id
    }

    /// Add a directed connection between two components within a circuit.
    ///
    /// Connections start with an empty specification.
    pub fn connect(
        &mut self,
        from: CompId,
        to: CompId,
        circuit: Circuit,
        label: impl Into<String>,
    ) -> ConnId {
        let id = ConnId::from_index(self.connections.len() as u32);
        self.connections.push(Connection {
            id,
            label: label.into(),
            from,
            to,
            circuit,
            spec: ConnectionSpec::default(),
        });
        id
    }

    /// Validate and freeze the topology.
    pub fn build(self) -> TopologyResult<CycleTopology> {
        validate::validate_structure(&self.components, &self.connections)?;
        validate::validate_circuits(&self.components, &self.connections)?;
        Ok(CycleTopology {
            components: self.components,
            connections: self.connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TopologyError;

    #[test]
    fn builder_basic() {
        let mut builder = TopologyBuilder::new();
        let src = builder.add_component(ComponentKind::FeedSource, "HeatingReturn");
        let cond = builder.add_component(ComponentKind::Condenser, "Condenser");
        let snk = builder.add_component(ComponentKind::DrainSink, "HeatingSupply");
        builder.connect(src, cond, Circuit::Heating, "h_in");
        builder.connect(cond, snk, Circuit::Heating, "h_out");

        assert_eq!(builder.components.len(), 3);
        assert_eq!(builder.connections.len(), 2);
    }

    #[test]
    fn dangling_component_rejected() {
        let mut builder = TopologyBuilder::new();
        let src = builder.add_component(ComponentKind::FeedSource, "SourceInlet");
        let snk = builder.add_component(ComponentKind::DrainSink, "SourceOutlet");
        builder.add_component(ComponentKind::Compressor, "Orphan");
        builder.connect(src, snk, Circuit::Source, "q");

        let err = builder.build().unwrap_err();
        assert!(matches!(err, TopologyError::DanglingComponent { .. }));
    }

    #[test]
    fn duplicate_label_rejected() {
        let mut builder = TopologyBuilder::new();
        let src = builder.add_component(ComponentKind::FeedSource, "SourceInlet");
        let snk = builder.add_component(ComponentKind::DrainSink, "SourceOutlet");
        builder.connect(src, snk, Circuit::Source, "q");
        builder.connect(src, snk, Circuit::Source, "q");

        let err = builder.build().unwrap_err();
        assert!(matches!(err, TopologyError::DuplicateLabel { .. }));
    }
}
