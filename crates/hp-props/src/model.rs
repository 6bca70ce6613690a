//! Property model trait.

use crate::error::PropsResult;
use crate::fluid::Refrigerant;
use hp_core::units::{Pressure, Temperature};

/// Contract for the thermodynamic property backend.
///
/// Implementations must be thread-safe (Send + Sync). The pipeline treats
/// every failure from this trait as recoverable; implementations should
/// return `PropsError::OutOfRange` rather than extrapolating wildly outside
/// their validity range.
pub trait PropertyModel: Send + Sync {
    /// Backend name (for debugging/logging).
    fn name(&self) -> &str;

    /// Saturation pressure of a refrigerant at the given temperature.
    fn saturation_pressure(
        &self,
        refrigerant: &Refrigerant,
        temperature: Temperature,
    ) -> PropsResult<Pressure>;
}
