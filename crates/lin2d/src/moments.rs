//! Raw moments up to 2nd order of 2D point sets, and their push-forward
//! under a `Lin2`.
//!
//! For points `p_i` (optionally weighted by area, see `m0`):
//! `m0 = Σ 1`, `m1 = Σ p_i`, `m2 = Σ p_i p_iᵀ`.

use nalgebra::{Matrix2, Vector2};

use crate::cfg::MOMENT_EPS;
use crate::lin2::Lin2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Moments2 {
    pub m0: f64,
    pub m1: Vector2<f64>,
    pub m2: Matrix2<f64>,
}

impl Moments2 {
    #[inline]
    pub fn new(m0: f64, m1: Vector2<f64>, m2: Matrix2<f64>) -> Self {
        Self { m0, m1, m2 }
    }

    pub fn from_points(pts: &[Vector2<f64>]) -> Self {
        let mut m1 = Vector2::zeros();
        let mut m2 = Matrix2::zeros();
        for p in pts {
            m1 += p;
            m2 += p * p.transpose();
        }
        Self::new(pts.len() as f64, m1, m2)
    }

    /// `m1 / m0`, or zero when `m0` is negligible.
    pub fn mean(&self) -> Vector2<f64> {
        if self.m0.abs() < MOMENT_EPS {
            Vector2::zeros()
        } else {
            self.m1 / self.m0
        }
    }

    /// `m2 / m0 - mean meanᵀ`, or identity when `m0` is negligible.
    pub fn cov(&self) -> Matrix2<f64> {
        if self.m0.abs() < MOMENT_EPS {
            Matrix2::identity()
        } else {
            let mean = self.mean();
            self.m2 / self.m0 - mean * mean.transpose()
        }
    }

    pub fn negate(&self) -> Self {
        Self::new(-self.m0, -self.m1, -self.m2)
    }

    /// Moments of the image set under `t`; mass scales by `|det t|`.
    pub fn transform(&self, t: &Lin2) -> Self {
        let a = t.to_matrix();
        let mean = a * self.mean();
        let cov = a * self.cov() * a.transpose();
        let m0 = self.m0 * t.det().abs();
        Self::new(m0, mean * m0, (mean * mean.transpose() + cov) * m0)
    }
}
