//! Scalar helpers: approximate equality and angle reduction.

use std::f64::consts::{PI, TAU};

/// `|a - b| < eps`.
#[inline]
pub fn nearly_equal(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

/// Magnitude above which [`principal_range`] stops stepping one `π` at a time.
pub const STEP_LIMIT: f64 = 64.0 * PI;

/// Reduce `x` into `[-π, π)` by repeatedly stepping by `π`.
///
/// This is a linear reduction with period `π`, not `2π`: it is intended for
/// inputs already within a few multiples of `π` of the range, and it is what
/// `set_angle`/`set_shear` use to canonicalize user input. For instance
/// `principal_range(10.0) == 10.0 - 3π`. Use [`wrap_angle`] for a
/// rotation-preserving reduction.
///
/// Non-finite input yields NaN. Beyond [`STEP_LIMIT`] whole multiples of `π`
/// are removed in one go, so huge finite input still terminates; positive
/// input still lands in `[0, π)` and negative input in `[-π, 0]`.
pub fn principal_range(x: f64) -> f64 {
    if !x.is_finite() {
        return f64::NAN;
    }
    let mut x = x;
    if x.abs() > STEP_LIMIT {
        // exact remainder, sign of x kept
        x %= PI;
    }
    while x >= PI {
        x -= PI;
    }
    while x < -PI {
        x += PI;
    }
    x
}

/// Reduce `x` into `[-π, π)` modulo `2π` (same rotation).
#[inline]
pub fn wrap_angle(x: f64) -> f64 {
    let y = (x + PI).rem_euclid(TAU) - PI;
    // rem_euclid may round up to TAU
    if y >= PI {
        y - TAU
    } else {
        y
    }
}
