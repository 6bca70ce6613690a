//! Manufacturer reference curves.
//!
//! A reference curve maps source temperature to rated COP, heating duty and
//! electrical power at a fixed supply temperature. Curves come either from a
//! per-device datasheet CSV or, when none exists, from a synthesized example
//! table; the validation sweep treats both identically and never mutates
//! them.

use std::fs;
use std::path::{Path, PathBuf};

use hp_core::numeric::{Tolerances, nearly_equal};
use tracing::warn;

use crate::error::{DeviceError, DeviceResult};

/// One reference operating point.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePoint {
    pub t_source_c: f64,
    pub t_supply_c: f64,
    pub cop_ref: f64,
    pub p_th_ref_kw: f64,
    pub p_el_ref_kw: Option<f64>,
}

/// A reference curve for one device.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCurve {
    /// Device the curve belongs to; `None` for synthesized example data.
    pub device: Option<String>,
    points: Vec<ReferencePoint>,
}

impl ReferenceCurve {
    /// Load a datasheet for a device from `data_dir`, falling back to the
    /// synthesized example curve when no file exists.
    ///
    /// The fallback is deliberate: the pipeline should always be able to
    /// produce a comparison, but the degradation is made visible.
    pub fn load_or_example(device_name: &str, data_dir: &Path) -> DeviceResult<Self> {
        let path = Self::datasheet_path(device_name, data_dir);
        if !path.exists() {
            warn!(
                device = device_name,
                path = %path.display(),
                "no manufacturer datasheet found, using synthesized example data"
            );
            return Ok(Self::synthetic_example());
        }
        Self::load(&path, Some(device_name.to_string()))
    }

    /// Load a datasheet CSV.
    ///
    /// Expected columns: `Testpoint,T_source,T_supply,COP_ref,P_th_ref_kW,P_el_ref_kW`.
    pub fn load(path: &Path, device: Option<String>) -> DeviceResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut points = Vec::new();
        for (line_no, line) in content.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            let cols: Vec<&str> = line.split(',').collect();
            if cols.len() < 5 {
                return Err(DeviceError::Parse {
                    line: line_no + 1,
                    message: format!("expected at least 5 columns, got {}", cols.len()),
                });
            }
            let num = |idx: usize| -> DeviceResult<f64> {
                cols[idx].trim().parse::<f64>().map_err(|e| DeviceError::Parse {
                    line: line_no + 1,
                    message: format!("column {}: {e}", idx + 1),
                })
            };
            points.push(ReferencePoint {
                t_source_c: num(1)?,
                t_supply_c: num(2)?,
                cop_ref: num(3)?,
                p_th_ref_kw: num(4)?,
                p_el_ref_kw: cols.get(5).and_then(|v| v.trim().parse::<f64>().ok()),
            });
        }
        Ok(Self { device, points })
    }

    /// Synthesized example curve, typical of a 5 kW brine/water unit at W35.
    pub fn synthetic_example() -> Self {
        let table = [
            (-10.0, 2.45, 3.80, 1.55),
            (-7.0, 2.65, 4.20, 1.58),
            (-5.0, 2.80, 4.50, 1.61),
            (0.0, 3.01, 5.23, 1.74),
            (5.0, 3.35, 5.80, 1.73),
            (10.0, 3.60, 6.40, 1.78),
        ];
        Self {
            device: None,
            points: table
                .iter()
                .map(|&(t_source_c, cop_ref, p_th_ref_kw, p_el_ref_kw)| ReferencePoint {
                    t_source_c,
                    t_supply_c: 35.0,
                    cop_ref,
                    p_th_ref_kw,
                    p_el_ref_kw: Some(p_el_ref_kw),
                })
                .collect(),
        }
    }

    pub fn points(&self) -> &[ReferencePoint] {
        &self.points
    }

    /// Exact-match lookup by source temperature. No interpolation.
    pub fn lookup(&self, t_source_c: f64) -> Option<&ReferencePoint> {
        self.points
            .iter()
            .find(|p| nearly_equal(p.t_source_c, t_source_c, Tolerances::default()))
    }

    /// Write an empty datasheet template for a device, ready to be filled in
    /// from the printed datasheet.
    pub fn write_template(device_name: &str, data_dir: &Path) -> DeviceResult<PathBuf> {
        fs::create_dir_all(data_dir)?;
        let path = Self::datasheet_path(device_name, data_dir);
        let mut csv = String::from("Testpoint,T_source,T_supply,COP_ref,P_th_ref_kW,P_el_ref_kW\n");
        for t_source in [-10, -7, -5, 0, 5, 10] {
            csv.push_str(&format!("B{t_source}/W35,{t_source},35,,,\n"));
        }
        fs::write(&path, csv)?;
        Ok(path)
    }

    fn datasheet_path(device_name: &str, data_dir: &Path) -> PathBuf {
        let file = device_name.replace(' ', "_").replace('/', "-") + ".csv";
        data_dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_curve_covers_standard_points() {
        let curve = ReferenceCurve::synthetic_example();
        assert_eq!(curve.points().len(), 6);
        for t in [-10.0, -7.0, -5.0, 0.0, 5.0, 10.0] {
            assert!(curve.lookup(t).is_some(), "missing point at {t} °C");
        }
        assert!(curve.lookup(-3.0).is_none());
    }

    #[test]
    fn lookup_is_exact_match_only() {
        let curve = ReferenceCurve::synthetic_example();
        // -7.5 lies between two points; no interpolation.
        assert!(curve.lookup(-7.5).is_none());
        let p = curve.lookup(0.0).unwrap();
        assert!((p.cop_ref - 3.01).abs() < 1e-12);
        assert!((p.p_th_ref_kw - 5.23).abs() < 1e-12);
    }

    #[test]
    fn template_round_trip() {
        let dir = std::env::temp_dir().join("hp-devices-template-test");
        let path = ReferenceCurve::write_template("Vitocal 200-G", &dir).unwrap();
        assert!(path.file_name().unwrap().to_str().unwrap().contains("Vitocal_200-G"));

        // Template rows have empty reference cells and parse to zero points
        // once the blanks fail the numeric parse.
        let err = ReferenceCurve::load(&path, None);
        assert!(err.is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
