//! hp-props: thermodynamic property backend contract and a built-in
//! correlation model.
//!
//! The validation pipeline only needs one property from its backend:
//! saturation pressure at a temperature for a named refrigerant. The real
//! equation-of-state backend is an external collaborator; this crate defines
//! its contract (`PropertyModel`) and ships `CorrelationModel`, a two-anchor
//! Clausius-Clapeyron fit that covers the rating-standard temperature range
//! for the common refrigerants.

pub mod correlation;
pub mod error;
pub mod fluid;
pub mod model;

pub use correlation::CorrelationModel;
pub use error::{PropsError, PropsResult};
pub use fluid::{Fluid, FluidFamily, Refrigerant};
pub use model::PropertyModel;
