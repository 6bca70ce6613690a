//! Property backend errors.

use thiserror::Error;

/// Result type for property operations.
pub type PropsResult<T> = Result<T, PropsError>;

/// Errors that can occur during property lookups.
///
/// All of these are expected, boundary-condition-dependent failures. The
/// specifier recovers from them locally with fallback constants; they are
/// never fatal to the pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropsError {
    /// Temperature outside the fluid's valid saturation range.
    #[error("Value out of range for {what}")]
    OutOfRange { what: &'static str },

    /// No correlation data for this refrigerant.
    #[error("Not supported: {what}")]
    NotSupported { what: String },

    /// Backend-internal error.
    #[error("Backend error: {message}")]
    Backend { message: String },
}
