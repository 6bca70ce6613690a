//! hp-core: shared foundation for the heat-pump validation pipeline.
//!
//! Contains:
//! - units (uom SI types + constructors for the °C / bar / kW domain)
//! - numeric (tolerances + finiteness checks for parsed and solved values)
//! - ids (compact ids for topology components and connections)
//! - error (the numeric-helper error type)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::HpError;
pub use ids::*;
pub use numeric::*;
pub use units::*;
