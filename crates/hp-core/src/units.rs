// hp-core/src/units.rs

use uom::si::f64::{
    MassRate as UomMassRate, Power as UomPower, Pressure as UomPressure, Ratio as UomRatio,
    TemperatureInterval as UomTemperatureInterval,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type MassRate = UomMassRate;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

/// Temperature from degrees Celsius, the unit the rating standards use.
#[inline]
pub fn c(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn dk(v: f64) -> TempInterval {
    use uom::si::temperature_interval::kelvin;
    TempInterval::new::<kelvin>(v)
}

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

// Readback helpers for the display units used in reports (°C, bar, kW).

#[inline]
pub fn as_celsius(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    t.get::<degree_celsius>()
}

#[inline]
pub fn as_kelvin(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

#[inline]
pub fn as_bar(p: Pressure) -> f64 {
    use uom::si::pressure::bar;
    p.get::<bar>()
}

#[inline]
pub fn as_kw(p: Power) -> f64 {
    use uom::si::power::kilowatt;
    p.get::<kilowatt>()
}

#[inline]
pub fn as_kgps(m: MassRate) -> f64 {
    use uom::si::mass_rate::kilogram_per_second;
    m.get::<kilogram_per_second>()
}

pub mod constants {
    /// Specific heat capacity of liquid water [kJ/(kg·K)], used for
    /// secondary-loop mass flow sizing.
    pub const CP_WATER_KJ_PER_KG_K: f64 = 4.180;

    /// Zero point of the Celsius scale [K].
    pub const T_CELSIUS_ZERO_K: f64 = 273.15;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _t = k(300.0);
        let _tc = c(35.0);
        let _dt = dk(5.0);
        let _p = bar(5.5);
        let _q = kw(5.0);
        let _mdot = kgps(0.24);
        let _r = unitless(0.75);
    }

    #[test]
    fn celsius_round_trip() {
        let t = c(35.0);
        assert!((as_celsius(t) - 35.0).abs() < 1e-9);
        assert!((as_kelvin(t) - 308.15).abs() < 1e-9);
    }

    #[test]
    fn bar_round_trip() {
        let p = bar(18.0);
        assert!((p.value - 1.8e6).abs() < 1e-6);
        assert!((as_bar(p) - 18.0).abs() < 1e-12);
    }
}
