//! Group operations in closed form over the row-polar cache.
//!
//! - `multiply`: `a·b` from `a.polar` and the raw parameters of `b`.
//! - `invert`: no matrix inverse; branches on the sign of `cos(qx - qy)`,
//!   which equals the sign of `det = sx·sy·cos h`.
//! - Derived: `divide = a·b⁻¹`, `left_divide = a⁻¹·b`, `conjugate = a·b·a⁻¹`.

use std::f64::consts::PI;
use std::ops::{Div, Mul};

use nalgebra::{Matrix2, Vector2};

use super::types::Lin2;
use crate::error::{Lin2Error, Result};
use crate::scalar::wrap_angle;

#[inline]
fn vector_of(v: &[f64]) -> Result<Vector2<f64>> {
    match *v {
        [x, y] => Ok(Vector2::new(x, y)),
        _ => Err(Lin2Error::ShapeMismatch {
            expected: 2,
            got: v.len(),
        }),
    }
}

impl Lin2 {
    /// Composition `self ∘ other` (apply `other` first). Not commutative.
    pub fn multiply(&self, other: &Lin2) -> Lin2 {
        let a = &self.polar;
        let (br, bh) = (other.r, other.h);
        let c0 = a.lx * other.sx * (a.qx + br).cos();
        let c1 = -a.lx * other.sy * (a.qx + br + bh).sin();
        let c2 = a.ly * other.sx * (a.qy + br).sin();
        let c3 = a.ly * other.sy * (a.qy + br + bh).cos();
        Lin2::from_matrix_unchecked(&Matrix2::new(c0, c1, c2, c3))
    }

    /// Closed-form inverse.
    ///
    /// With `d = qx - qy`, `det M = lx·ly·cos d`. The two branches pick the
    /// rotation so that both scales stay positive.
    pub fn invert(&self) -> Lin2 {
        let p = &self.polar;
        let cos_d = (p.qx - p.qy).cos();
        let (r, g) = if cos_d > 0.0 {
            (wrap_angle(-p.qy), 1.0 / cos_d)
        } else {
            (wrap_angle(PI - p.qy), -1.0 / cos_d)
        };
        let h = wrap_angle(p.qy - p.qx);
        Lin2::from_parts_unchecked(g / p.lx, g / p.ly, r, h)
    }

    /// `self · other⁻¹`.
    #[inline]
    pub fn divide(&self, other: &Lin2) -> Lin2 {
        self.multiply(&other.invert())
    }

    /// `self⁻¹ · other`.
    #[inline]
    pub fn left_divide(&self, other: &Lin2) -> Lin2 {
        self.invert().multiply(other)
    }

    /// `self · other · self⁻¹`.
    #[inline]
    pub fn conjugate(&self, other: &Lin2) -> Lin2 {
        self.multiply(&other.divide(self))
    }

    /// Lie action `M·v`.
    #[inline]
    pub fn apply(&self, v: Vector2<f64>) -> Vector2<f64> {
        self.to_matrix() * v
    }

    /// `M⁻¹·v`.
    #[inline]
    pub fn apply_inverse(&self, v: Vector2<f64>) -> Vector2<f64> {
        self.invert().apply(v)
    }

    /// Like [`Lin2::apply`] for a dynamically sized operand.
    pub fn apply_slice(&self, v: &[f64]) -> Result<Vector2<f64>> {
        Ok(self.apply(vector_of(v)?))
    }

    /// Like [`Lin2::apply_inverse`] for a dynamically sized operand.
    pub fn apply_inverse_slice(&self, v: &[f64]) -> Result<Vector2<f64>> {
        Ok(self.apply_inverse(vector_of(v)?))
    }

    /// Map a point list; the matrix is built once.
    pub fn apply_points(&self, pts: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
        let m = self.to_matrix();
        pts.iter().map(|p| m * p).collect()
    }
}

impl Mul for Lin2 {
    type Output = Lin2;
    #[inline]
    fn mul(self, rhs: Lin2) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl Div for Lin2 {
    type Output = Lin2;
    #[inline]
    fn div(self, rhs: Lin2) -> Self::Output {
        self.divide(&rhs)
    }
}

impl Mul<Vector2<f64>> for Lin2 {
    type Output = Vector2<f64>;
    #[inline]
    fn mul(self, rhs: Vector2<f64>) -> Self::Output {
        self.apply(rhs)
    }
}
