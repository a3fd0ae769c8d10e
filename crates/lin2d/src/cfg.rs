//! Tolerance defaults (internal).
//!
//! Policy
//! - Fixed constants, no runtime knobs. Validation and comparisons share the
//!   same epsilon so a value accepted by one path is accepted by the other.

/// Approximate-equality tolerance used by validation (`±π/2` shear check).
pub const NEAR_EPS: f64 = 1e-6;
/// Below this `|m0|`, moments fall back to zero mean and identity covariance.
pub const MOMENT_EPS: f64 = 1.490_116_119_384_765_6e-8; // sqrt(f64::EPSILON)
