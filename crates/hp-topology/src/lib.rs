//! hp-topology: the refrigerant-cycle flow topology.
//!
//! A `CycleTopology` is a validated, per-operating-point description of the
//! heat-pump flow network: components (evaporator, compressor, condenser,
//! expansion valve, cycle closer, secondary-loop endpoints) and directed
//! connections grouped into three circuits (refrigerant, heating water,
//! source water). Connections carry fixed boundary specifications and
//! initial guesses; the `dof` module turns the structure into an explicit
//! degree-of-freedom budget.
//!
//! Topologies are built fresh for every operating point and never reused,
//! so no specification state can leak from one solve into the next.

pub mod builder;
pub mod component;
pub mod connection;
pub mod dof;
pub mod error;
pub mod topology;
mod validate;

pub use builder::TopologyBuilder;
pub use component::{Component, ComponentKind, ComponentParams};
pub use connection::{Circuit, Connection, ConnectionSpec};
pub use dof::{DofCheck, fixed_specification_count, required_specification_count};
pub use error::{TopologyError, TopologyResult};
pub use topology::CycleTopology;
