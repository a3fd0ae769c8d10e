//! Print a few transforms next to their closed-form inverses and the
//! residual `‖a·a⁻¹ − I‖∞`.
//!
//! Run: cargo run -p lin2d --example inverse_table

use lin2d::prelude::*;

fn main() -> Result<()> {
    let cases = [
        Lin2::scaling(0.4, 5.0)?,
        Lin2::rotation(10.0),
        Lin2::identity().with_shear(1.0)?,
        Lin2::new([1.5, 0.7], -2.0, 2.5)?,
    ];
    for a in cases {
        let inv = a.invert();
        let resid = (a.multiply(&inv).to_matrix() - Mat2::identity()).amax();
        println!("{a}\n  inverse  {inv}\n  residual {resid:.3e}");
    }
    Ok(())
}
