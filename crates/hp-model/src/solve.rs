//! Solver invocation boundary.
//!
//! The nonlinear equation solver is an external collaborator, known only
//! through the `CycleSolver` trait. `invoke` wraps every call: it refuses to
//! hand over an unbalanced network, classifies the solver's exit status, and
//! validates a "converged" state against the contract before anyone computes
//! metrics from it. Non-convergence is an expected, data-dependent outcome
//! and comes back as a value; a malformed state is an error.

use tracing::{debug, info, warn};

use hp_topology::{CycleTopology, DofCheck, required_specification_count};

use crate::error::{ModelError, ModelResult};

/// Converged values on one connection. Raw display units, matching the wire
/// format the solver exchanges.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionState {
    pub label: String,
    pub mass_flow_kgps: f64,
    pub pressure_bar: f64,
    pub enthalpy_kj_per_kg: f64,
    pub temperature_c: f64,
}

/// Energy flow across one component [kW], signed positive into the fluid
/// passing through it. Heat input and compression work are positive,
/// rejected heat is negative.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentEnergy {
    pub component: String,
    pub energy_kw: f64,
}

/// A converged cycle state.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedState {
    pub connections: Vec<ConnectionState>,
    pub components: Vec<ComponentEnergy>,
    pub iterations: u32,
    pub residual: f64,
}

impl SolvedState {
    pub fn connection(&self, label: &str) -> Option<&ConnectionState> {
        self.connections.iter().find(|conn| conn.label == label)
    }

    /// Energy flow [kW] of a component, by name.
    pub fn component_energy(&self, component: &str) -> Option<f64> {
        self.components
            .iter()
            .find(|comp| comp.component == component)
            .map(|comp| comp.energy_kw)
    }
}

/// Raw return of a solver run: an exit status plus, on success, the state.
///
/// Status 0 means converged; any other value is a solver-specific failure
/// code passed through for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverReturn {
    pub status: i32,
    pub message: String,
    pub state: Option<SolvedState>,
}

impl SolverReturn {
    pub fn converged(state: SolvedState) -> Self {
        Self {
            status: 0,
            message: String::new(),
            state: Some(state),
        }
    }

    pub fn failed(status: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            state: None,
        }
    }
}

/// The external steady-state cycle solver.
pub trait CycleSolver {
    /// Solver name (for logging and reports).
    fn name(&self) -> &str;

    /// Solve the network. Must not panic on unsolvable inputs; report them
    /// through a non-zero status instead.
    fn solve(&self, topology: &CycleTopology) -> SolverReturn;
}

/// Classified outcome of one solver invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    Converged(SolvedState),
    /// The solver gave up. Carries its exit status and message verbatim so a
    /// sweep report can show why a point is missing.
    NotConverged { status: i32, message: String },
}

impl SolveOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged(_))
    }
}

/// Run `solver` on `topology` and classify the result.
///
/// An unbalanced degree-of-freedom budget is rejected before the solver ever
/// sees the network. A non-zero exit status maps to
/// `SolveOutcome::NotConverged`; a zero status is only trusted after the
/// returned state covers every connection with finite values.
pub fn invoke(solver: &dyn CycleSolver, topology: &CycleTopology) -> ModelResult<SolveOutcome> {
    let required = required_specification_count(topology);
    match DofCheck::of(topology) {
        DofCheck::Balanced => {}
        DofCheck::Underdetermined { missing } => {
            return Err(ModelError::Underdetermined { missing, required });
        }
        DofCheck::Overdetermined { excess } => {
            return Err(ModelError::Overdetermined { excess, required });
        }
    }

    debug!(
        solver = solver.name(),
        connections = topology.connections().len(),
        "invoking cycle solver"
    );
    let ret = solver.solve(topology);

    if ret.status != 0 {
        warn!(
            solver = solver.name(),
            status = ret.status,
            message = %ret.message,
            "solver did not converge"
        );
        return Ok(SolveOutcome::NotConverged {
            status: ret.status,
            message: ret.message,
        });
    }

    let state = ret.state.ok_or_else(|| ModelError::SolverContract {
        detail: "status 0 without a solved state".to_string(),
    })?;
    validate_state(topology, &state)?;

    info!(
        solver = solver.name(),
        iterations = state.iterations,
        residual = state.residual,
        "solver converged"
    );
    Ok(SolveOutcome::Converged(state))
}

fn validate_state(topology: &CycleTopology, state: &SolvedState) -> ModelResult<()> {
    for conn in topology.connections() {
        let cs = state
            .connection(&conn.label)
            .ok_or_else(|| ModelError::SolverContract {
                detail: format!("no state for connection '{}'", conn.label),
            })?;
        let values = [
            cs.mass_flow_kgps,
            cs.pressure_bar,
            cs.enthalpy_kj_per_kg,
            cs.temperature_c,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::SolverContract {
                detail: format!("non-finite value on connection '{}'", conn.label),
            });
        }
        if cs.mass_flow_kgps <= 0.0 || cs.pressure_bar <= 0.0 {
            return Err(ModelError::SolverContract {
                detail: format!("non-physical value on connection '{}'", conn.label),
            });
        }
    }
    for comp in &state.components {
        if !comp.energy_kw.is_finite() {
            return Err(ModelError::SolverContract {
                detail: format!("non-finite energy on component '{}'", comp.component),
            });
        }
    }
    Ok(())
}
