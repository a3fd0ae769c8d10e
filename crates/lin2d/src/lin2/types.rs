//! Canonical parametrization `(sx, sy, r, h)` and its row-polar cache.
//!
//! - `Lin2`: validated value type; setters re-check the one field they touch.
//! - `Polar`: `(lx, qx, ly, qy)` with row 1 = `lx·(cos qx, -sin qx)` and
//!   row 2 = `ly·(sin qy, cos qy)`. Refreshed eagerly, so a `Lin2` never
//!   carries a stale cache and needs no interior mutability.

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use nalgebra::Vector2;

use crate::cfg::NEAR_EPS;
use crate::error::{InvalidArgument, Result};
use crate::scalar::{nearly_equal, principal_range};

/// Row-polar form of the matrix, read by composition and inversion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Polar {
    pub(crate) lx: f64,
    pub(crate) qx: f64,
    pub(crate) ly: f64,
    pub(crate) qy: f64,
}

impl Polar {
    #[inline]
    pub(crate) fn of(sx: f64, sy: f64, r: f64, h: f64) -> Self {
        let (s_r, c_r) = r.sin_cos();
        let (s_rh, c_rh) = (r + h).sin_cos();
        let c0 = sx * c_r;
        let s0 = sy * s_rh;
        let c1 = sy * c_rh;
        let s1 = sx * s_r;
        Self {
            lx: c0.hypot(s0),
            qx: s0.atan2(c0),
            ly: c1.hypot(s1),
            qy: s1.atan2(c1),
        }
    }
}

/// Non-singular 2D linear map in canonical form.
///
/// Matrix: `[[sx·cos r, -sy·sin(r+h)], [sx·sin r, sy·cos(r+h)]]` with
/// `sx, sy > 0`, `r, h ∈ [-π, π)` and `h` away from `±π/2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lin2 {
    pub(crate) sx: f64,
    pub(crate) sy: f64,
    pub(crate) r: f64,
    pub(crate) h: f64,
    pub(crate) polar: Polar,
}

impl Default for Lin2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Lin2 {
    /// Identity: `scale=(1,1), angle=0, shear=0`.
    #[inline]
    pub fn identity() -> Self {
        Self::from_parts_unchecked(1.0, 1.0, 0.0, 0.0)
    }

    /// Validated constructor; angle and shear are canonicalized.
    pub fn new(scale: [f64; 2], angle: f64, shear: f64) -> Result<Self> {
        let mut out = Self::identity();
        out.set_scale(&scale)?;
        out.set_angle(angle);
        out.set_shear(shear)?;
        Ok(out)
    }

    /// Pure rotation by `angle` (canonicalized like `set_angle`).
    pub fn rotation(angle: f64) -> Self {
        let mut out = Self::identity();
        out.set_angle(angle);
        out
    }

    /// Axis-aligned scaling.
    pub fn scaling(sx: f64, sy: f64) -> Result<Self> {
        Self::new([sx, sy], 0.0, 0.0)
    }

    /// Build from already-canonical parts, skipping validation.
    #[inline]
    pub(crate) fn from_parts_unchecked(sx: f64, sy: f64, r: f64, h: f64) -> Self {
        Self {
            sx,
            sy,
            r,
            h,
            polar: Polar::of(sx, sy, r, h),
        }
    }

    #[inline]
    fn refresh_polar(&mut self) {
        self.polar = Polar::of(self.sx, self.sy, self.r, self.h);
    }

    // ----- accessors -----

    #[inline]
    pub fn scale(&self) -> Vector2<f64> {
        Vector2::new(self.sx, self.sy)
    }
    #[inline]
    pub fn sx(&self) -> f64 {
        self.sx
    }
    #[inline]
    pub fn sy(&self) -> f64 {
        self.sy
    }
    /// Rotation angle in `[-π, π)`.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.r
    }
    /// Shear angle in `[-π, π)`.
    #[inline]
    pub fn shear(&self) -> f64 {
        self.h
    }

    // ----- setters -----

    /// Set `(sx, sy)`. Fails unless `scale` has two strictly positive entries.
    pub fn set_scale(&mut self, scale: &[f64]) -> Result<()> {
        let &[sx, sy] = scale else {
            tracing::debug!(len = scale.len(), "rejected scale: wrong length");
            return Err(InvalidArgument::ScaleLength { len: scale.len() }.into());
        };
        // `!(x > 0)` also rejects NaN
        if !(sx > 0.0) || !(sy > 0.0) {
            tracing::debug!(sx, sy, "rejected scale: not positive");
            return Err(InvalidArgument::NonPositiveScale { sx, sy }.into());
        }
        self.sx = sx;
        self.sy = sy;
        self.refresh_polar();
        Ok(())
    }

    /// Set the rotation angle, canonicalized with [`principal_range`].
    pub fn set_angle(&mut self, angle: f64) {
        self.r = principal_range(angle);
        self.refresh_polar();
    }

    /// Set the shear angle, canonicalized with [`principal_range`].
    ///
    /// Fails if the canonical value is within `NEAR_EPS` of `±π/2`.
    pub fn set_shear(&mut self, shear: f64) -> Result<()> {
        let h = principal_range(shear);
        if nearly_equal(h, FRAC_PI_2, NEAR_EPS) || nearly_equal(h, -FRAC_PI_2, NEAR_EPS) {
            tracing::debug!(shear, canonical = h, "rejected shear: singular");
            return Err(InvalidArgument::SingularShear { shear }.into());
        }
        self.h = h;
        self.refresh_polar();
        Ok(())
    }

    pub fn with_scale(mut self, sx: f64, sy: f64) -> Result<Self> {
        self.set_scale(&[sx, sy])?;
        Ok(self)
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.set_angle(angle);
        self
    }

    pub fn with_shear(mut self, shear: f64) -> Result<Self> {
        self.set_shear(shear)?;
        Ok(self)
    }
}

impl fmt::Display for Lin2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lin2(scale=[{:?} {:?}], angle={:?}, shear={:?})",
            self.sx, self.sy, self.r, self.h
        )
    }
}
