//! Operating points.

use core::fmt;

use hp_core::units::{Temperature, as_celsius, c};

/// One test condition: source temperature and heating supply temperature.
///
/// Immutable once constructed. The label follows the rating-standard naming,
/// e.g. source -10 °C / supply 35 °C is "B-10/W35".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    t_source: Temperature,
    t_supply: Temperature,
}

impl OperatingPoint {
    pub fn new(t_source: Temperature, t_supply: Temperature) -> Self {
        Self { t_source, t_supply }
    }

    /// Convenience constructor from °C values.
    pub fn from_celsius(t_source_c: f64, t_supply_c: f64) -> Self {
        Self::new(c(t_source_c), c(t_supply_c))
    }

    pub fn t_source(&self) -> Temperature {
        self.t_source
    }

    pub fn t_supply(&self) -> Temperature {
        self.t_supply
    }

    pub fn t_source_c(&self) -> f64 {
        as_celsius(self.t_source)
    }

    pub fn t_supply_c(&self) -> f64 {
        as_celsius(self.t_supply)
    }

    /// Rating-standard test point label.
    pub fn label(&self) -> String {
        format!("B{:.0}/W{:.0}", self.t_source_c(), self.t_supply_c())
    }
}

impl fmt::Display for OperatingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
