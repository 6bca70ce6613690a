//! Immutable device parameter set.
//!
//! Created once per model instantiation and passed explicitly into the
//! operating-point specifier; never mutated mid-sweep.

use hp_core::units::{Power, Ratio, as_kw, kw, unitless};
use hp_props::Refrigerant;
use tracing::warn;

use crate::database::DeviceRecord;

/// Default isentropic efficiency when no richer compressor data exists.
pub const DEFAULT_ETA_S: f64 = 0.75;

/// Default heat-exchanger pressure ratio (2 % pressure loss per side).
pub const DEFAULT_PRESSURE_RATIO: f64 = 0.98;

/// Default nominal thermal duty [kW] when the database has none.
pub const DEFAULT_NOMINAL_DUTY_KW: f64 = 5.0;

/// UA sizing heuristics: UA ≈ nominal duty / ratio, in kW/K. These are
/// empirical rules of thumb for small brine/water heat pumps, not physical
/// derivations; override them per device when measured data exists.
pub const UA_EVAPORATOR_DUTY_RATIO: f64 = 7.0;
pub const UA_CONDENSER_DUTY_RATIO: f64 = 6.0;

/// Everything the operating-point specifier needs to know about one device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceParams {
    /// Device model name, when loaded from a database.
    pub device_name: Option<String>,
    pub refrigerant: Refrigerant,
    /// Compressor isentropic efficiency.
    pub eta_s: Ratio,
    /// Evaporator pressure ratio (both sides).
    pub pr_evaporator: Ratio,
    /// Condenser pressure ratio (both sides).
    pub pr_condenser: Ratio,
    /// Evaporator UA [kW/K], from the duty/7 heuristic unless overridden.
    pub ua_evaporator_kw_per_k: f64,
    /// Condenser UA [kW/K], from the duty/6 heuristic unless overridden.
    pub ua_condenser_kw_per_k: f64,
    /// Nominal thermal duty.
    pub p_th_nominal: Power,
    /// Rated COP at the nominal point, when known.
    pub cop_nominal: Option<f64>,
}

impl DeviceParams {
    /// Derive parameters from a database record.
    ///
    /// A missing nominal duty falls back to `DEFAULT_NOMINAL_DUTY_KW` with a
    /// warn-level signal; it never propagates as NaN.
    pub fn from_device(record: &DeviceRecord) -> Self {
        let p_th_kw = match record.p_th_nominal_kw {
            Some(v) if v.is_finite() && v > 0.0 => v,
            _ => {
                warn!(
                    device = %record.model,
                    fallback_kw = DEFAULT_NOMINAL_DUTY_KW,
                    "nominal duty missing in database, using default"
                );
                DEFAULT_NOMINAL_DUTY_KW
            }
        };

        Self {
            device_name: Some(record.model.clone()),
            refrigerant: Refrigerant::parse(&record.refrigerant),
            cop_nominal: record.cop_nominal,
            ..Self::with_nominal_duty(p_th_kw)
        }
    }

    /// Default parameter set with UA values derived from a nominal duty.
    pub fn with_nominal_duty(p_th_kw: f64) -> Self {
        Self {
            device_name: None,
            refrigerant: Refrigerant::R410A,
            eta_s: unitless(DEFAULT_ETA_S),
            pr_evaporator: unitless(DEFAULT_PRESSURE_RATIO),
            pr_condenser: unitless(DEFAULT_PRESSURE_RATIO),
            ua_evaporator_kw_per_k: p_th_kw / UA_EVAPORATOR_DUTY_RATIO,
            ua_condenser_kw_per_k: p_th_kw / UA_CONDENSER_DUTY_RATIO,
            p_th_nominal: kw(p_th_kw),
            cop_nominal: None,
        }
    }

    pub fn p_th_nominal_kw(&self) -> f64 {
        as_kw(self.p_th_nominal)
    }
}

impl Default for DeviceParams {
    fn default() -> Self {
        Self::with_nominal_duty(DEFAULT_NOMINAL_DUTY_KW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ua_heuristic_from_duty() {
        let params = DeviceParams::with_nominal_duty(5.0);
        assert!((params.ua_evaporator_kw_per_k - 5.0 / 7.0).abs() < 1e-12);
        assert!((params.ua_condenser_kw_per_k - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn missing_duty_falls_back() {
        let record = DeviceRecord {
            model: "NoDuty 100".into(),
            manufacturer: "Acme".into(),
            refrigerant: "R32".into(),
            p_th_nominal_kw: None,
            cop_nominal: None,
        };
        let params = DeviceParams::from_device(&record);
        assert_eq!(params.p_th_nominal_kw(), DEFAULT_NOMINAL_DUTY_KW);
        assert_eq!(params.refrigerant, Refrigerant::R32);
        assert_eq!(params.device_name.as_deref(), Some("NoDuty 100"));
    }

    #[test]
    fn record_values_carried_over() {
        let record = DeviceRecord {
            model: "Vitocal 200-G".into(),
            manufacturer: "Viessmann".into(),
            refrigerant: "R410A".into(),
            p_th_nominal_kw: Some(5.23),
            cop_nominal: Some(4.6),
        };
        let params = DeviceParams::from_device(&record);
        assert!((params.p_th_nominal_kw() - 5.23).abs() < 1e-12);
        assert_eq!(params.cop_nominal, Some(4.6));
        assert!((params.ua_evaporator_kw_per_k - 5.23 / 7.0).abs() < 1e-12);
    }
}
