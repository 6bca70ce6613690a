//! hp-sweep: the validation sweep.
//!
//! Runs the per-point pipeline (build, specify, solve, extract) over the six
//! canonical brine/water rating points, joins converged points against a
//! manufacturer reference curve, classifies the fit, and persists the result
//! table plus a run manifest.

pub mod persist;
pub mod report;
pub mod sweep;

pub use persist::{SweepManifest, save_report};
pub use report::render_summary;
pub use sweep::{
    FailedPoint, FitClass, STANDARD_TEST_POINTS, SweepReport, SweepStatus, ValidationRow,
    run_sweep, simulate_point,
};

pub type SweepResult<T> = Result<T, SweepError>;

#[derive(thiserror::Error, Debug)]
pub enum SweepError {
    #[error("Model error: {0}")]
    Model(#[from] hp_model::ModelError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
