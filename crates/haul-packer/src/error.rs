//! Packer error types.

use thiserror::Error;

/// Errors that can occur before packing starts.
#[derive(Debug, Error, PartialEq)]
pub enum PackError {
    #[error("truck capacity must be a positive number, got {0}")]
    InvalidCapacity(f64),
}

pub type PackResult<T> = Result<T, PackError>;
