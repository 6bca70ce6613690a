use crate::HpError;

/// Absolute + relative tolerance pair.
///
/// The default is tight on purpose: it is used to match reference-curve
/// temperatures that are written as exact values (−10, −7, …), not to blur
/// genuinely different numbers together.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: f64, b: f64, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Reject NaN and infinities at the boundary where numbers enter the
/// pipeline (datasheet cells, solver state values).
pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, HpError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HpError::NonFinite { what, value: v })
    }
}
