//! Component kinds and their capability-specific parameter sets.

use hp_core::CompId;
use hp_core::units::Ratio;

/// Kind of a cycle component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Evaporator,
    Compressor,
    Condenser,
    ExpansionValve,
    /// Breaks the refrigerant loop for the equation system; equalizes
    /// pressure and enthalpy across itself but deliberately not composition.
    CycleCloser,
    /// Secondary-loop inlet endpoint (where the external water loop re-enters).
    FeedSource,
    /// Secondary-loop outlet endpoint.
    DrainSink,
}

impl ComponentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Evaporator => "Evaporator",
            Self::Compressor => "Compressor",
            Self::Condenser => "Condenser",
            Self::ExpansionValve => "ExpansionValve",
            Self::CycleCloser => "CycleCloser",
            Self::FeedSource => "FeedSource",
            Self::DrainSink => "DrainSink",
        }
    }
}

/// Capability-specific fixed parameters.
///
/// Every `Some` value is a fixed specification that counts toward the
/// degree-of-freedom budget. UA values are stored as raw kW/K; they are
/// derived sizing heuristics, not physical measurements (see
/// `hp_devices::DeviceParams`).
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentParams {
    Evaporator {
        /// Pressure ratio on the refrigerant side.
        pr_working: Option<Ratio>,
        /// Pressure ratio on the source-water side.
        pr_secondary: Option<Ratio>,
        /// Heat-transfer coefficient × area [kW/K].
        ua_kw_per_k: Option<f64>,
    },
    Condenser {
        pr_working: Option<Ratio>,
        pr_secondary: Option<Ratio>,
        ua_kw_per_k: Option<f64>,
    },
    Compressor {
        /// Isentropic efficiency.
        eta_s: Option<Ratio>,
    },
    ExpansionValve {
        /// Pressure ratio (1.0 for an ideal valve).
        pr: Option<Ratio>,
    },
    CycleCloser,
    FeedSource,
    DrainSink,
}

impl ComponentParams {
    /// Empty parameter set for a component kind.
    pub fn unset(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Evaporator => Self::Evaporator {
                pr_working: None,
                pr_secondary: None,
                ua_kw_per_k: None,
            },
            ComponentKind::Condenser => Self::Condenser {
                pr_working: None,
                pr_secondary: None,
                ua_kw_per_k: None,
            },
            ComponentKind::Compressor => Self::Compressor { eta_s: None },
            ComponentKind::ExpansionValve => Self::ExpansionValve { pr: None },
            ComponentKind::CycleCloser => Self::CycleCloser,
            ComponentKind::FeedSource => Self::FeedSource,
            ComponentKind::DrainSink => Self::DrainSink,
        }
    }

    /// Number of fixed specifications carried by this parameter set.
    pub fn fixed_count(&self) -> usize {
        match self {
            Self::Evaporator {
                pr_working,
                pr_secondary,
                ua_kw_per_k,
            }
            | Self::Condenser {
                pr_working,
                pr_secondary,
                ua_kw_per_k,
            } => {
                usize::from(pr_working.is_some())
                    + usize::from(pr_secondary.is_some())
                    + usize::from(ua_kw_per_k.is_some())
            }
            Self::Compressor { eta_s } => usize::from(eta_s.is_some()),
            Self::ExpansionValve { pr } => usize::from(pr.is_some()),
            Self::CycleCloser | Self::FeedSource | Self::DrainSink => 0,
        }
    }
}

/// A cycle component: a named device with a parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: CompId,
    pub name: String,
    pub kind: ComponentKind,
    pub params: ComponentParams,
}
