//! Topology construction and validation errors.
//!
//! All of these are programming-error-class: a correct topology builder can
//! never trigger them at runtime.

use hp_core::CompId;
use thiserror::Error;

pub type TopologyResult<T> = Result<T, TopologyError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// A connection refers to a component that doesn't exist.
    #[error("Connection '{label}' refers to non-existent component {comp}")]
    InvalidComponentRef { label: String, comp: CompId },

    /// Two connections share the same label.
    #[error("Duplicate connection label '{label}'")]
    DuplicateLabel { label: String },

    /// The same directed edge appears twice in one circuit.
    #[error("Duplicate edge '{label}' between components {from} and {to}")]
    DuplicateEdge {
        label: String,
        from: CompId,
        to: CompId,
    },

    /// A component is not touched by any connection.
    #[error("Component '{name}' is dangling (no connections)")]
    DanglingComponent { name: String },

    /// A circuit must contain exactly one loop-closing component.
    #[error("Circuit {circuit} has {count} loop-closing components (expected 1)")]
    LoopClosureCount { circuit: &'static str, count: usize },

    /// A circuit member has the wrong number of incoming/outgoing edges.
    #[error("Component '{name}' has {inflow} inflows and {outflow} outflows in circuit {circuit}")]
    UnbalancedFlowPath {
        name: String,
        circuit: &'static str,
        inflow: usize,
        outflow: usize,
    },

    /// Lookup by label failed.
    #[error("No connection labelled '{label}'")]
    UnknownConnection { label: String },

    /// Lookup of a component by kind failed.
    #[error("No component of kind {kind}")]
    MissingComponent { kind: &'static str },
}
