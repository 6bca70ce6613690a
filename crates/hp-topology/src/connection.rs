//! Directed flow connections and their boundary specifications.

use hp_core::{CompId, ConnId};
use hp_core::units::{MassRate, Pressure, TempInterval, Temperature};
use hp_props::Fluid;

/// Circuit membership of a connection.
///
/// A connection belongs to exactly one circuit; this is enforced by
/// construction rather than validated after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Circuit {
    Refrigerant,
    Heating,
    Source,
}

impl Circuit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Refrigerant => "refrigerant",
            Self::Heating => "heating",
            Self::Source => "source",
        }
    }
}

/// Boundary values carried by a connection.
///
/// Fixed values count toward the degree-of-freedom budget; the `*_guess`
/// fields are initial guesses only. They do not add solver equations but
/// materially affect convergence.
///
/// Enthalpy is a raw specific value in kJ/kg, matching how the solver
/// exchanges it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionSpec {
    pub fluid: Option<Fluid>,
    pub temperature: Option<Temperature>,
    pub pressure: Option<Pressure>,
    pub mass_flow: Option<MassRate>,
    pub vapor_quality: Option<f64>,
    pub enthalpy_kj_per_kg: Option<f64>,
    pub subcooling: Option<TempInterval>,
    pub superheat: Option<TempInterval>,

    pub pressure_guess: Option<Pressure>,
    pub temperature_guess: Option<Temperature>,
    pub mass_flow_guess: Option<MassRate>,
}

impl ConnectionSpec {
    /// Number of fixed (non-guess) specifications on this connection.
    pub fn fixed_count(&self) -> usize {
        usize::from(self.fluid.is_some())
            + usize::from(self.temperature.is_some())
            + usize::from(self.pressure.is_some())
            + usize::from(self.mass_flow.is_some())
            + usize::from(self.vapor_quality.is_some())
            + usize::from(self.enthalpy_kj_per_kg.is_some())
            + usize::from(self.subcooling.is_some())
            + usize::from(self.superheat.is_some())
    }
}

/// A directed flow edge between two components.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: ConnId,
    pub label: String,
    pub from: CompId,
    pub to: CompId,
    pub circuit: Circuit,
    pub spec: ConnectionSpec,
}
