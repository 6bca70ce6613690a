//! Model-level errors.

use hp_topology::TopologyError;
use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),

    /// Programmer-class specification bug: too few fixed boundary values.
    /// The solver would report a singular system; fix the specifier, do not
    /// retry.
    #[error("Underdetermined specification: {missing} of {required} fixed values missing")]
    Underdetermined { missing: usize, required: usize },

    /// Programmer-class specification bug: too many fixed boundary values.
    #[error("Overdetermined specification: {excess} values beyond the required {required}")]
    Overdetermined { excess: usize, required: usize },

    /// The solver reported success but its returned state violates the
    /// invocation contract (missing connection, non-finite value). Distinct
    /// from non-convergence, which is an expected outcome, not an error.
    #[error("Solver contract violation: {detail}")]
    SolverContract { detail: String },

    /// A converged state could not be turned into performance metrics.
    #[error("Result extraction failed: {detail}")]
    Extraction { detail: String },
}
