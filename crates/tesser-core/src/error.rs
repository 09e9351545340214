use thiserror::Error;

/// Errors raised by the geometric primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("grid resolution must be a positive power of two, got {0}")]
    InvalidResolution(i32),
}
