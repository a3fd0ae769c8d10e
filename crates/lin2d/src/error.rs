//! Error types for transform construction and application.

use thiserror::Error;

/// Why an argument was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidArgument {
    /// Scale must be a pair.
    #[error("scale must have exactly 2 components, got {len}")]
    ScaleLength { len: usize },

    /// Scale components must be strictly positive.
    #[error("scale components must be positive, got [{sx} {sy}]")]
    NonPositiveScale { sx: f64, sy: f64 },

    /// Shear within tolerance of `±π/2` makes the matrix singular.
    #[error("shear {shear} is too close to ±π/2 (singular configuration)")]
    SingularShear { shear: f64 },
}

/// Errors raised by `Lin2` setters, constructors and checked application.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Lin2Error {
    /// A setter or constructor argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// A vector operand did not have the expected length.
    #[error("shape mismatch: expected a vector of length {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },
}

impl Lin2Error {
    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Lin2Error::InvalidArgument(_))
    }
    #[inline]
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Lin2Error::ShapeMismatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, Lin2Error>;
