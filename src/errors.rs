//! All errors that can occur in the alleletrace library.

use std::collections::TryReserveError;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum AlleleTraceError {
    OutOfRange { index: usize, size: usize },
    AllocationFailure(TryReserveError),
    ImplementationError(String),
    InitializationError(String),
    ReadError(String),
    WriteError(String),
}

pub type Result<T> = std::result::Result<T, AlleleTraceError>;

impl fmt::Display for AlleleTraceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlleleTraceError::OutOfRange { index, size } => {
                write!(f, "OutOfRange: index {index} is not below size {size}")
            }
            AlleleTraceError::AllocationFailure(error) => {
                write!(f, "AllocationFailure: {error}")
            }
            AlleleTraceError::ImplementationError(message) => {
                write!(f, "ImplementationError: {}", message)
            }
            AlleleTraceError::InitializationError(message) => {
                write!(f, "InitializationError: {}", message)
            }
            AlleleTraceError::ReadError(message) => write!(f, "ReadError: {}", message),
            AlleleTraceError::WriteError(message) => write!(f, "WriteError: {}", message),
        }
    }
}

impl std::error::Error for AlleleTraceError {}

impl From<TryReserveError> for AlleleTraceError {
    fn from(error: TryReserveError) -> Self {
        AlleleTraceError::AllocationFailure(error)
    }
}
