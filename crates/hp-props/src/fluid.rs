//! Fluid identity types.
//!
//! The cycle carries exactly two fluids: one refrigerant in the working loop
//! and water in both secondary loops. Mixtures are out of scope.

use core::fmt;

/// A named refrigerant.
///
/// Device databases report refrigerants as free-form strings; `parse` maps
/// the common names onto known variants and keeps everything else as
/// `Other` so a device with an exotic refrigerant still loads (its pressure
/// guesses then come from the family fallback constants).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Refrigerant {
    R410A,
    R32,
    R134a,
    R290,
    Other(String),
}

impl Refrigerant {
    /// Parse a refrigerant name as found in device databases.
    ///
    /// Matching is case-insensitive and tolerant of surrounding whitespace.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "R410A" => Self::R410A,
            "R32" => Self::R32,
            "R134A" => Self::R134a,
            "R290" | "PROPANE" => Self::R290,
            _ => Self::Other(name.trim().to_string()),
        }
    }

    /// Coarse pressure-level family, used only to pick fallback constants
    /// when the property backend cannot answer.
    pub fn family(&self) -> FluidFamily {
        match self {
            Self::R410A | Self::R32 => FluidFamily::MediumPressureHfc,
            Self::R134a | Self::R290 | Self::Other(_) => FluidFamily::Other,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::R410A => "R410A",
            Self::R32 => "R32",
            Self::R134a => "R134a",
            Self::R290 => "R290",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Refrigerant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pressure-level family for fallback initial-guess constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FluidFamily {
    /// Medium-pressure HFC blends (R410A-class).
    MediumPressureHfc,
    /// Everything else.
    Other,
}

/// Fluid carried by a connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Fluid {
    Refrigerant(Refrigerant),
    Water,
}

impl fmt::Display for Fluid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refrigerant(r) => write!(f, "{r}"),
            Self::Water => f.write_str("water"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_names() {
        assert_eq!(Refrigerant::parse("R410A"), Refrigerant::R410A);
        assert_eq!(Refrigerant::parse(" r32 "), Refrigerant::R32);
        assert_eq!(Refrigerant::parse("Propane"), Refrigerant::R290);
        assert_eq!(
            Refrigerant::parse("R1234yf"),
            Refrigerant::Other("R1234yf".into())
        );
    }

    #[test]
    fn family_split() {
        assert_eq!(
            Refrigerant::R410A.family(),
            FluidFamily::MediumPressureHfc
        );
        assert_eq!(Refrigerant::R32.family(), FluidFamily::MediumPressureHfc);
        assert_eq!(Refrigerant::R134a.family(), FluidFamily::Other);
        assert_eq!(
            Refrigerant::parse("R744").family(),
            FluidFamily::Other
        );
    }
}
