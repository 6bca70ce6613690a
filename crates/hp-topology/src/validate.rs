//! Structural validation of cycle topologies.

use std::collections::{HashMap, HashSet};

use hp_core::CompId;

use crate::component::{Component, ComponentKind};
use crate::connection::{Circuit, Connection};
use crate::error::{TopologyError, TopologyResult};

/// Validate edge references, label uniqueness, edge uniqueness, and that no
/// component is left dangling.
pub(crate) fn validate_structure(
    components: &[Component],
    connections: &[Connection],
) -> TopologyResult<()> {
    let mut labels: HashSet<&str> = HashSet::new();
    for conn in connections {
        if !labels.insert(conn.label.as_str()) {
            return Err(TopologyError::DuplicateLabel {
                label: conn.label.clone(),
            });
        }
    }

    for conn in connections {
        for comp_id in [conn.from, conn.to] {
            if comp_id.index() as usize >= components.len() {
                return Err(TopologyError::InvalidComponentRef {
                    label: conn.label.clone(),
                    comp: comp_id,
                });
            }
        }
    }

    let mut edges: HashSet<(CompId, CompId, Circuit)> = HashSet::new();
    for conn in connections {
        if !edges.insert((conn.from, conn.to, conn.circuit)) {
            return Err(TopologyError::DuplicateEdge {
                label: conn.label.clone(),
                from: conn.from,
                to: conn.to,
            });
        }
    }

    let mut touched: HashSet<CompId> = HashSet::new();
    for conn in connections {
        touched.insert(conn.from);
        touched.insert(conn.to);
    }
    for comp in components {
        if !touched.contains(&comp.id) {
            return Err(TopologyError::DanglingComponent {
                name: comp.name.clone(),
            });
        }
    }

    Ok(())
}

/// Validate per-circuit flow-path shape and loop closure.
///
/// - Refrigerant circuit: exactly one CycleCloser; every member component has
///   exactly one inflow and one outflow (a single closed loop).
/// - Secondary circuits: exactly one FeedSource; the feed source has one
///   outflow and no inflow, the drain sink one inflow and no outflow, every
///   other member one of each (a single open path).
pub(crate) fn validate_circuits(
    components: &[Component],
    connections: &[Connection],
) -> TopologyResult<()> {
    for circuit in [Circuit::Refrigerant, Circuit::Heating, Circuit::Source] {
        let members: Vec<&Connection> = connections
            .iter()
            .filter(|conn| conn.circuit == circuit)
            .collect();
        if members.is_empty() {
            continue;
        }

        let mut inflow: HashMap<CompId, usize> = HashMap::new();
        let mut outflow: HashMap<CompId, usize> = HashMap::new();
        for conn in &members {
            *outflow.entry(conn.from).or_default() += 1;
            *inflow.entry(conn.to).or_default() += 1;
        }

        let closer_kind = match circuit {
            Circuit::Refrigerant => ComponentKind::CycleCloser,
            Circuit::Heating | Circuit::Source => ComponentKind::FeedSource,
        };
        let member_ids: HashSet<CompId> = members
            .iter()
            .flat_map(|conn| [conn.from, conn.to])
            .collect();
        let closer_count = member_ids
            .iter()
            .filter(|id| {
                components
                    .get(id.index() as usize)
                    .is_some_and(|comp| comp.kind == closer_kind)
            })
            .count();
        if closer_count != 1 {
            return Err(TopologyError::LoopClosureCount {
                circuit: circuit.as_str(),
                count: closer_count,
            });
        }

        for comp_id in &member_ids {
            let comp = &components[comp_id.index() as usize];
            let n_in = inflow.get(comp_id).copied().unwrap_or(0);
            let n_out = outflow.get(comp_id).copied().unwrap_or(0);
            let (want_in, want_out) = match (circuit, comp.kind) {
                (_, ComponentKind::FeedSource) => (0, 1),
                (_, ComponentKind::DrainSink) => (1, 0),
                _ => (1, 1),
            };
            if n_in != want_in || n_out != want_out {
                return Err(TopologyError::UnbalancedFlowPath {
                    name: comp.name.clone(),
                    circuit: circuit.as_str(),
                    inflow: n_in,
                    outflow: n_out,
                });
            }
        }
    }

    Ok(())
}
