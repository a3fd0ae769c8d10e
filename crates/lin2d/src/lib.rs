//! Canonical 2D linear transforms with a closed-form group algebra.
//!
//! A non-singular 2×2 matrix is stored as `(sx, sy, r, h)`: positive scales,
//! rotation angle and shear angle, both in `[-π, π)`. Composition and
//! inversion work on a cached row-polar form instead of a matrix
//! decomposition.
//!
//! Modules
//! - `lin2`: the `Lin2` type, matrix conversion, group operations.
//! - `scalar`: `nearly_equal`, `principal_range`, `wrap_angle`.
//! - `moments`: raw 2nd-order moments and their push-forward.
//! - `sample`: seeded sampler of well-conditioned transforms.

pub mod cfg;
pub mod error;
pub mod lin2;
pub mod moments;
pub mod sample;
pub mod scalar;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{InvalidArgument, Lin2Error, Result};
pub use lin2::Lin2;
pub use moments::Moments2;
pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{Lin2Error, Result};
    pub use crate::lin2::Lin2;
    pub use crate::moments::Moments2;
    pub use crate::sample::{draw_lin2, draw_lin2_batch, ReplayToken, SampleCfg};
    pub use crate::scalar::{nearly_equal, principal_range, wrap_angle};
    pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};
}
