//! Two-anchor saturation pressure correlation.
//!
//! This is NOT a general equation of state. It integrates the
//! Clausius-Clapeyron relation between two anchor states per refrigerant,
//! which is accurate to a few percent across the rating-standard range
//! (roughly -20 °C to +45 °C saturation) and strictly monotonic in
//! temperature. That is exactly what initial-guess generation needs; anything
//! more demanding belongs to the external equation-of-state backend.

use crate::error::{PropsError, PropsResult};
use crate::fluid::Refrigerant;
use crate::model::PropertyModel;
use hp_core::units::{Pressure, Temperature, as_kelvin, bar};

/// Anchor states and validity range for one refrigerant.
///
/// `p(T) = p1 · exp(b · (1/t1 − 1/T))` with `b` chosen so the curve passes
/// through both anchors.
#[derive(Debug, Clone, Copy)]
struct SaturationAnchors {
    t1_k: f64,
    p1_bar: f64,
    t2_k: f64,
    p2_bar: f64,
    t_min_k: f64,
    t_max_k: f64,
}

impl SaturationAnchors {
    fn pressure_at(&self, t_k: f64) -> PropsResult<Pressure> {
        if t_k < self.t_min_k || t_k > self.t_max_k {
            return Err(PropsError::OutOfRange {
                what: "saturation temperature",
            });
        }
        let b = (self.p2_bar / self.p1_bar).ln() / (1.0 / self.t1_k - 1.0 / self.t2_k);
        let p_bar = self.p1_bar * (b * (1.0 / self.t1_k - 1.0 / t_k)).exp();
        if !p_bar.is_finite() || p_bar <= 0.0 {
            return Err(PropsError::Backend {
                message: format!("non-physical saturation pressure {p_bar} bar at {t_k} K"),
            });
        }
        Ok(bar(p_bar))
    }
}

// Anchors at 0 °C and 40 °C saturation; validity range stops well below the
// critical point of each fluid.
const R410A_ANCHORS: SaturationAnchors = SaturationAnchors {
    t1_k: 273.15,
    p1_bar: 7.98,
    t2_k: 313.15,
    p2_bar: 24.16,
    t_min_k: 223.15,
    t_max_k: 333.15,
};

const R32_ANCHORS: SaturationAnchors = SaturationAnchors {
    t1_k: 273.15,
    p1_bar: 8.13,
    t2_k: 313.15,
    p2_bar: 24.78,
    t_min_k: 223.15,
    t_max_k: 343.15,
};

const R134A_ANCHORS: SaturationAnchors = SaturationAnchors {
    t1_k: 273.15,
    p1_bar: 2.93,
    t2_k: 313.15,
    p2_bar: 10.16,
    t_min_k: 223.15,
    t_max_k: 353.15,
};

const R290_ANCHORS: SaturationAnchors = SaturationAnchors {
    t1_k: 273.15,
    p1_bar: 4.74,
    t2_k: 313.15,
    p2_bar: 13.69,
    t_min_k: 223.15,
    t_max_k: 343.15,
};

/// Built-in correlation backend.
#[derive(Debug, Clone, Default)]
pub struct CorrelationModel {}

impl CorrelationModel {
    pub fn new() -> Self {
        Self {}
    }

    fn anchors(refrigerant: &Refrigerant) -> PropsResult<SaturationAnchors> {
        match refrigerant {
            Refrigerant::R410A => Ok(R410A_ANCHORS),
            Refrigerant::R32 => Ok(R32_ANCHORS),
            Refrigerant::R134a => Ok(R134A_ANCHORS),
            Refrigerant::R290 => Ok(R290_ANCHORS),
            Refrigerant::Other(name) => Err(PropsError::NotSupported { what: name.clone() }),
        }
    }
}

impl PropertyModel for CorrelationModel {
    fn name(&self) -> &str {
        "two-anchor saturation correlation"
    }

    fn saturation_pressure(
        &self,
        refrigerant: &Refrigerant,
        temperature: Temperature,
    ) -> PropsResult<Pressure> {
        Self::anchors(refrigerant)?.pressure_at(as_kelvin(temperature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hp_core::units::{as_bar, c, k};
    use proptest::prelude::*;

    #[test]
    fn anchors_reproduced() {
        let model = CorrelationModel::new();
        let p0 = model.saturation_pressure(&Refrigerant::R410A, c(0.0)).unwrap();
        assert!((as_bar(p0) - 7.98).abs() < 1e-9);
        let p40 = model.saturation_pressure(&Refrigerant::R410A, c(40.0)).unwrap();
        assert!((as_bar(p40) - 24.16).abs() < 1e-9);
    }

    #[test]
    fn plausible_between_anchors() {
        // R410A at 10 °C saturates near 10.8 bar; the interpolation should
        // land within a few percent.
        let model = CorrelationModel::new();
        let p = model.saturation_pressure(&Refrigerant::R410A, c(10.0)).unwrap();
        let p_bar = as_bar(p);
        assert!(p_bar > 10.0 && p_bar < 11.8, "got {p_bar} bar");
    }

    #[test]
    fn out_of_range_rejected() {
        let model = CorrelationModel::new();
        let err = model
            .saturation_pressure(&Refrigerant::R410A, k(100.0))
            .unwrap_err();
        assert_eq!(
            err,
            PropsError::OutOfRange {
                what: "saturation temperature"
            }
        );
    }

    #[test]
    fn unknown_refrigerant_not_supported() {
        let model = CorrelationModel::new();
        let err = model
            .saturation_pressure(&Refrigerant::parse("R744"), c(0.0))
            .unwrap_err();
        assert!(matches!(err, PropsError::NotSupported { .. }));
    }

    proptest! {
        // Saturation pressure must be strictly increasing in temperature for
        // every supported refrigerant; the initial-guess monotonicity of the
        // specifier rests on this.
        #[test]
        fn saturation_pressure_monotonic(t1 in -40.0f64..40.0, dt in 0.1f64..20.0) {
            let model = CorrelationModel::new();
            for refrigerant in [
                Refrigerant::R410A,
                Refrigerant::R32,
                Refrigerant::R134a,
                Refrigerant::R290,
            ] {
                let lo = model.saturation_pressure(&refrigerant, c(t1));
                let hi = model.saturation_pressure(&refrigerant, c((t1 + dt).min(55.0)));
                if let (Ok(lo), Ok(hi)) = (lo, hi) {
                    prop_assert!(as_bar(hi) > as_bar(lo));
                }
            }
        }
    }
}
