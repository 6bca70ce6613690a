//! The validated cycle topology.

use hp_core::{CompId, ConnId};

use crate::component::{Component, ComponentKind, ComponentParams};
use crate::connection::{Circuit, Connection, ConnectionSpec};
use crate::error::{TopologyError, TopologyResult};

/// A validated flow topology for one operating point.
///
/// Structure (components, edges, circuits) is frozen at build time; only the
/// boundary specifications on connections and the parameter sets on
/// components remain mutable, which is exactly what the operating-point
/// specifier needs to touch.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleTopology {
    pub(crate) components: Vec<Component>,
    pub(crate) connections: Vec<Connection>,
}

impl CycleTopology {
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn component(&self, id: CompId) -> Option<&Component> {
        self.components.get(id.index() as usize)
    }

    pub fn connection(&self, id: ConnId) -> Option<&Connection> {
        self.connections.get(id.index() as usize)
    }

    /// Find a connection by label.
    pub fn find_connection(&self, label: &str) -> TopologyResult<&Connection> {
        self.connections
            .iter()
            .find(|conn| conn.label == label)
            .ok_or_else(|| TopologyError::UnknownConnection {
                label: label.to_string(),
            })
    }

    /// Mutable access to a connection's boundary specification, by label.
    pub fn spec_mut(&mut self, label: &str) -> TopologyResult<&mut ConnectionSpec> {
        self.connections
            .iter_mut()
            .find(|conn| conn.label == label)
            .map(|conn| &mut conn.spec)
            .ok_or_else(|| TopologyError::UnknownConnection {
                label: label.to_string(),
            })
    }

    /// The unique component of a given kind.
    ///
    /// The heat-pump topology has exactly one of each kind per circuit; for
    /// kinds that appear in multiple circuits (FeedSource, DrainSink) use
    /// component names instead.
    pub fn component_of_kind(&self, kind: ComponentKind) -> TopologyResult<&Component> {
        self.components
            .iter()
            .find(|comp| comp.kind == kind)
            .ok_or(TopologyError::MissingComponent {
                kind: kind.as_str(),
            })
    }

    /// Mutable access to the unique component of a given kind.
    pub fn params_mut(&mut self, kind: ComponentKind) -> TopologyResult<&mut ComponentParams> {
        self.components
            .iter_mut()
            .find(|comp| comp.kind == kind)
            .map(|comp| &mut comp.params)
            .ok_or(TopologyError::MissingComponent {
                kind: kind.as_str(),
            })
    }

    /// All connections of a circuit, in insertion (flow) order.
    pub fn circuit_connections(&self, circuit: Circuit) -> impl Iterator<Item = &Connection> {
        self.connections
            .iter()
            .filter(move |conn| conn.circuit == circuit)
    }

    /// The designated reference connection of a circuit: the connection
    /// immediately downstream of the circuit's loop-closing component.
    ///
    /// Fluid composition is fixed on this connection and nowhere else in the
    /// circuit; fixing it twice would not add solver equations but could mask
    /// specification bugs.
    pub fn reference_connection(&self, circuit: Circuit) -> TopologyResult<&Connection> {
        let closer_kind = match circuit {
            Circuit::Refrigerant => ComponentKind::CycleCloser,
            Circuit::Heating | Circuit::Source => ComponentKind::FeedSource,
        };
        self.circuit_connections(circuit)
            .find(|conn| {
                self.component(conn.from)
                    .is_some_and(|comp| comp.kind == closer_kind)
            })
            .ok_or(TopologyError::MissingComponent {
                kind: closer_kind.as_str(),
            })
    }
}
