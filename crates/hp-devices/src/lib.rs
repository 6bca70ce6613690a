//! hp-devices: device database access and reference data.
//!
//! Three concerns live here:
//! - loading the heat-pump device database (CSV) and finding devices by
//!   fuzzy name search,
//! - deriving an immutable `DeviceParams` value from a database record (or
//!   documented defaults when data is missing),
//! - loading or synthesizing manufacturer reference curves for validation.
//!
//! Every degradation (missing device, missing nominal duty, missing
//! datasheet) is recovered with documented defaults and surfaced through a
//! warn-level trace; nothing is substituted silently.

pub mod database;
pub mod error;
pub mod params;
pub mod reference;

pub use database::{DeviceDatabase, DeviceRecord};
pub use error::{DeviceError, DeviceResult};
pub use params::DeviceParams;
pub use reference::{ReferenceCurve, ReferencePoint};
