//! Canonical 2D linear transforms and their closed-form group algebra.
//!
//! Purpose
//! - Represent every non-singular 2×2 matrix by a unique `(sx, sy, r, h)`
//!   (scale, rotation, shear) and compose/invert without a general matrix
//!   decomposition per operation.
//!
//! Layout
//! - `types`: the `Lin2` value type, validation, row-polar cache.
//! - `convert`: `to_matrix` / `from_matrix` and the determinant.
//! - `algebra`: `multiply`, `invert`, derived operators, vector action.

mod algebra;
mod convert;
mod types;

pub use types::Lin2;

#[cfg(test)]
mod tests;
