//! Matrix <-> canonical parameters.
//!
//! Inverse formulas for `M = [[a0, a1], [a2, a3]]`:
//! - `sx = hypot(a0, a2)`, `sy = hypot(a1, a3)`
//! - `r = atan2(a2, a0)`, `h = atan2(-a1, a3) - r`
//!
//! Both angles are wrapped modulo `2π`; a `π` step here would negate a column.

use nalgebra::Matrix2;

use super::types::Lin2;
use crate::error::{Lin2Error, Result};
use crate::scalar::wrap_angle;

#[inline]
fn params_of(m: &Matrix2<f64>) -> (f64, f64, f64, f64) {
    let (a0, a1, a2, a3) = (m[(0, 0)], m[(0, 1)], m[(1, 0)], m[(1, 1)]);
    let sx = a0.hypot(a2);
    let sy = a1.hypot(a3);
    let r = wrap_angle(a2.atan2(a0));
    let h = wrap_angle((-a1).atan2(a3) - r);
    (sx, sy, r, h)
}

impl Lin2 {
    /// `[[sx·cos r, -sy·sin(r+h)], [sx·sin r, sy·cos(r+h)]]`.
    #[inline]
    pub fn to_matrix(&self) -> Matrix2<f64> {
        let (s_r, c_r) = self.r.sin_cos();
        let (s_rh, c_rh) = (self.r + self.h).sin_cos();
        Matrix2::new(
            self.sx * c_r,
            -self.sy * s_rh, //
            self.sx * s_r,
            self.sy * c_rh,
        )
    }

    /// Canonicalize a matrix and validate the result.
    ///
    /// A zero column is reported as a non-positive scale, a singular (or
    /// near-singular) matrix as a singular shear.
    pub fn from_matrix(m: &Matrix2<f64>) -> Result<Self> {
        let (sx, sy, r, h) = params_of(m);
        Self::new([sx, sy], r, h)
    }

    /// Canonicalize a matrix without any checks.
    ///
    /// Pre: `m` is non-singular with no zero column. Otherwise the returned
    /// value breaks the `Lin2` invariants (unspecified, not an error).
    #[inline]
    pub fn from_matrix_unchecked(m: &Matrix2<f64>) -> Self {
        let (sx, sy, r, h) = params_of(m);
        debug_assert!(sx > 0.0 && sy > 0.0, "from_matrix_unchecked: zero column");
        Self::from_parts_unchecked(sx, sy, r, h)
    }

    /// `det M = sx·sy·cos h`.
    #[inline]
    pub fn det(&self) -> f64 {
        self.sx * self.sy * self.h.cos()
    }

    /// Max-abs distance between the two matrices is below `eps`.
    pub fn approx_eq(&self, other: &Lin2, eps: f64) -> bool {
        (self.to_matrix() - other.to_matrix()).amax() < eps
    }
}

impl From<Lin2> for Matrix2<f64> {
    #[inline]
    fn from(t: Lin2) -> Self {
        t.to_matrix()
    }
}

impl TryFrom<Matrix2<f64>> for Lin2 {
    type Error = Lin2Error;
    fn try_from(m: Matrix2<f64>) -> Result<Self> {
        Lin2::from_matrix(&m)
    }
}
