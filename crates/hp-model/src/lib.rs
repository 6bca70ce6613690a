//! hp-model: the heat-pump cycle model.
//!
//! Ties the topology, property and device crates together into the
//! per-operating-point pipeline:
//!
//! 1. `cycle::heat_pump_topology` builds a fresh five-node refrigerant loop
//!    with two secondary water loops,
//! 2. `specify::specify` closes the degrees of freedom for one operating
//!    point and seeds the solver's initial guesses,
//! 3. `solve::invoke` hands the network to a `CycleSolver` implementation,
//! 4. `extract::extract` turns a converged state into performance metrics.
//!
//! The external nonlinear solver is only known through the `CycleSolver`
//! trait; `design_solver::DesignPointSolver` is a coarse built-in stand-in
//! for demos and tests.

pub mod cycle;
pub mod design_solver;
pub mod error;
pub mod extract;
pub mod operating_point;
pub mod solve;
pub mod specify;

pub use cycle::heat_pump_topology;
pub use design_solver::DesignPointSolver;
pub use error::{ModelError, ModelResult};
pub use extract::{PointResult, extract};
pub use operating_point::OperatingPoint;
pub use solve::{
    ComponentEnergy, ConnectionState, CycleSolver, SolveOutcome, SolvedState, SolverReturn, invoke,
};
pub use specify::{initial_pressure_guesses, specify};
