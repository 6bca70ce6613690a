//! Device data errors.

use thiserror::Error;

pub type DeviceResult<T> = Result<T, DeviceError>;

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Database has no usable header row")]
    MissingHeader,

    #[error("No device found for '{name}'")]
    NotFound { name: String },
}
