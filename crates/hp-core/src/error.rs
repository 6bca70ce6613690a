use thiserror::Error;

/// Errors raised by the numeric helpers.
///
/// The pipeline crates each carry their own error enum; this one only covers
/// what hp-core itself can detect, which is non-finite values arriving from
/// parsed input or solver output.
#[derive(Error, Debug)]
pub enum HpError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
