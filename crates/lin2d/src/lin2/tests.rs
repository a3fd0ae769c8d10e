use super::*;
use crate::error::{InvalidArgument, Lin2Error};
use nalgebra::{matrix, vector, Matrix2};
use proptest::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI};

fn lin2_strategy(shear_margin: f64) -> impl Strategy<Value = Lin2> {
    (0.2f64..5.0, 0.2f64..5.0, -PI..PI, -PI..PI)
        .prop_filter("shear too close to ±π/2", move |&(_, _, _, h)| {
            (h.abs() - FRAC_PI_2).abs() >= shear_margin
        })
        .prop_map(|(sx, sy, r, h)| Lin2::new([sx, sy], r, h).unwrap())
}

fn close(a: &Matrix2<f64>, b: &Matrix2<f64>, eps: f64) -> bool {
    (a - b).amax() < eps
}

#[test]
fn identity_defaults() {
    let id = Lin2::default();
    assert_eq!(id, Lin2::identity());
    assert_eq!(id.scale(), vector![1.0, 1.0]);
    assert_eq!(id.angle(), 0.0);
    assert_eq!(id.shear(), 0.0);
    assert_eq!(id.to_matrix(), Matrix2::identity());
    assert_eq!(id.invert(), id);
    assert_eq!(id.det(), 1.0);
}

#[test]
fn invert_scaling_literal() {
    let a = Lin2::scaling(0.4, 5.0).unwrap();
    let inv = a.invert();
    assert!((inv.sx() - 2.5).abs() < 1e-12);
    assert!((inv.sy() - 0.2).abs() < 1e-12);
    assert!(inv.angle().abs() < 1e-12);
    assert!(inv.shear().abs() < 1e-12);
}

#[test]
fn angle_canonicalization_literal() {
    let a = Lin2::rotation(10.0);
    assert!((a.angle() - 0.5752220392306207).abs() < 1e-12);
    let inv = a.invert();
    assert!((inv.angle() + 0.5752220392306207).abs() < 1e-12);
    assert!((inv.sx() - 1.0).abs() < 1e-12 && (inv.sy() - 1.0).abs() < 1e-12);
    assert!(inv.shear().abs() < 1e-12);
}

#[test]
fn invert_shear_literal() {
    let a = Lin2::identity().with_shear(1.0).unwrap();
    let inv = a.invert();
    assert!((inv.sx() - 1.0).abs() < 1e-8);
    assert!((inv.sy() - 2.41889182).abs() < 1e-8);
    assert!(inv.angle().abs() < 1e-12);
    // column 2 of M⁻¹ is (tan 1, 1/cos 1) = sy'·(-sin h', cos h')
    assert!((inv.shear() + 1f64.sin().atan2(1.0)).abs() < 1e-12);
    let expected = matrix![1.0, 1f64.tan(); 0.0, 1.0 / 1f64.cos()];
    assert!(close(&inv.to_matrix(), &expected, 1e-12));
}

#[test]
fn invert_handles_obtuse_shear() {
    // cos h < 0 takes the second branch
    let a = Lin2::new([1.5, 0.7], -2.0, 2.5).unwrap();
    assert!(a.det() < 0.0);
    let inv = a.invert();
    assert!(inv.sx() > 0.0 && inv.sy() > 0.0);
    let expected = a.to_matrix().try_inverse().unwrap();
    assert!(close(&inv.to_matrix(), &expected, 1e-12));
    assert!(close(&a.multiply(&inv).to_matrix(), &Matrix2::identity(), 1e-12));
}

#[test]
fn validation_rejects_bad_scale_and_shear() {
    let err = Lin2::new([0.0, 1.0], 0.0, 0.0).unwrap_err();
    assert!(err.is_invalid_argument());
    let err = Lin2::new([-1.0, 2.0], 0.0, 0.0).unwrap_err();
    assert_eq!(
        err,
        Lin2Error::InvalidArgument(InvalidArgument::NonPositiveScale { sx: -1.0, sy: 2.0 })
    );
    assert!(Lin2::new([1.0, f64::NAN], 0.0, 0.0).is_err());
    let err = Lin2::new([1.0, 1.0], 0.0, FRAC_PI_2).unwrap_err();
    assert!(matches!(
        err,
        Lin2Error::InvalidArgument(InvalidArgument::SingularShear { .. })
    ));
    assert!(Lin2::new([1.0, 1.0], 0.0, -FRAC_PI_2 + 1e-7).is_err());
    // 3π/2 canonicalizes onto π/2
    assert!(Lin2::new([1.0, 1.0], 0.0, 3.0 * FRAC_PI_2).is_err());
    assert!(Lin2::new([1.0, 1.0], 0.0, FRAC_PI_2 - 1e-5).is_ok());

    let mut a = Lin2::identity();
    let err = a.set_scale(&[1.0, 2.0, 3.0]).unwrap_err();
    assert_eq!(
        err,
        Lin2Error::InvalidArgument(InvalidArgument::ScaleLength { len: 3 })
    );
}

#[test]
fn failed_setter_leaves_value_untouched() {
    let mut a = Lin2::new([2.0, 3.0], 0.5, 0.25).unwrap();
    let before = a;
    assert!(a.set_scale(&[1.0, 0.0]).is_err());
    assert!(a.set_shear(-FRAC_PI_2).is_err());
    assert_eq!(a, before);
}

#[test]
fn setters_refresh_cache() {
    let mut a = Lin2::new([2.0, 3.0], 0.5, 0.25).unwrap();
    a.set_scale(&[0.5, 4.0]).unwrap();
    a.set_angle(-1.0);
    a.set_shear(2.0).unwrap();
    let fresh = Lin2::new([0.5, 4.0], -1.0, 2.0).unwrap();
    assert_eq!(a, fresh);
    // composition reads the cache of the left operand
    let b = Lin2::new([1.2, 0.8], 0.3, -0.4).unwrap();
    let expected = a.to_matrix() * b.to_matrix();
    assert!(close(&a.multiply(&b).to_matrix(), &expected, 1e-12));
}

#[test]
fn apply_rejects_wrong_length() {
    let a = Lin2::rotation(0.3);
    let err = a.apply_slice(&[1.0, 2.0, 3.0]).unwrap_err();
    assert!(err.is_shape_mismatch());
    assert_eq!(err, Lin2Error::ShapeMismatch { expected: 2, got: 3 });
    assert!(a.apply_inverse_slice(&[1.0]).is_err());
    let v = a.apply_slice(&[1.0, 0.0]).unwrap();
    assert!((v - vector![0.3f64.cos(), 0.3f64.sin()]).norm() < 1e-12);
}

#[test]
fn apply_and_apply_inverse() {
    let a = Lin2::new([2.0, 0.5], 0.7, -0.3).unwrap();
    let v = vector![0.25, -1.5];
    let w = a * v;
    assert!((a.apply_inverse(w) - v).norm() < 1e-12);
    let pts = a.apply_points(&[v, vector![1.0, 0.0]]);
    assert_eq!(pts.len(), 2);
    assert!((pts[0] - w).norm() < 1e-15);
}

#[test]
fn derived_operators_match_definitions() {
    let a = Lin2::new([1.3, 0.6], 2.2, 0.4).unwrap();
    let b = Lin2::new([0.9, 2.1], -0.8, -2.7).unwrap();
    let (ma, mb) = (a.to_matrix(), b.to_matrix());
    let ia = ma.try_inverse().unwrap();
    let ib = mb.try_inverse().unwrap();
    assert!(close(&(a / b).to_matrix(), &(ma * ib), 1e-10));
    assert!(close(&a.left_divide(&b).to_matrix(), &(ia * mb), 1e-10));
    assert!(close(&a.conjugate(&b).to_matrix(), &(ma * mb * ia), 1e-10));
    assert!(a.divide(&a).approx_eq(&Lin2::identity(), 1e-12));
    assert!(a.left_divide(&a).approx_eq(&Lin2::identity(), 1e-12));
    // composition order matters
    assert!(!(a * b).approx_eq(&(b * a), 1e-3));
}

#[test]
fn from_matrix_validates() {
    let zero_col = matrix![0.0, 1.0; 0.0, 2.0];
    let err = Lin2::from_matrix(&zero_col).unwrap_err();
    assert!(matches!(
        err,
        Lin2Error::InvalidArgument(InvalidArgument::NonPositiveScale { .. })
    ));
    let singular = matrix![1.0, 2.0; 2.0, 4.0];
    let err = Lin2::try_from(singular).unwrap_err();
    assert!(matches!(
        err,
        Lin2Error::InvalidArgument(InvalidArgument::SingularShear { .. })
    ));
    let shear = matrix![1.0, 1.0; 0.0, 1.0];
    let t = Lin2::from_matrix(&shear).unwrap();
    assert!((t.sy() - 2f64.sqrt()).abs() < 1e-12);
    assert!((t.shear() + PI / 4.0).abs() < 1e-12);
    assert!(close(&Matrix2::from(t), &shear, 1e-12));
}

#[test]
fn display_form() {
    assert_eq!(
        Lin2::identity().to_string(),
        "Lin2(scale=[1.0 1.0], angle=0.0, shear=0.0)"
    );
    let s = Lin2::new([0.4, 5.0], 0.0, 0.0).unwrap().to_string();
    assert!(s.starts_with("Lin2(scale=[0.4 5.0]"));
}

#[test]
fn lin2_is_thread_safe_value() {
    fn assert_send_sync<T: Send + Sync + Copy>() {}
    assert_send_sync::<Lin2>();
}

proptest! {
    #[test]
    fn prop_invert_round_trip(a in lin2_strategy(1e-2)) {
        let p = a.multiply(&a.invert()).to_matrix();
        prop_assert!(close(&p, &Matrix2::identity(), 1e-6), "{a}: {p}");
        let q = a.invert().multiply(&a).to_matrix();
        prop_assert!(close(&q, &Matrix2::identity(), 1e-6), "{a}: {q}");
    }

    #[test]
    fn prop_matrix_round_trip(a in lin2_strategy(1e-4)) {
        let m = a.to_matrix();
        let back = Lin2::from_matrix(&m).unwrap();
        prop_assert!(close(&back.to_matrix(), &m, 1e-6));
        prop_assert!((back.sx() - a.sx()).abs() < 1e-9);
        prop_assert!((back.sy() - a.sy()).abs() < 1e-9);
    }

    #[test]
    fn prop_compose_matches_matrix_product(a in lin2_strategy(1e-2), b in lin2_strategy(1e-2)) {
        let expected = a.to_matrix() * b.to_matrix();
        prop_assert!(close(&a.multiply(&b).to_matrix(), &expected, 1e-6));
    }

    #[test]
    fn prop_associative(
        a in lin2_strategy(1e-2),
        b in lin2_strategy(1e-2),
        c in lin2_strategy(1e-2),
    ) {
        let left = a.multiply(&b).multiply(&c).to_matrix();
        let right = a.multiply(&b.multiply(&c)).to_matrix();
        prop_assert!(close(&left, &right, 1e-6));
    }

    #[test]
    fn prop_action_consistent(
        a in lin2_strategy(1e-2),
        b in lin2_strategy(1e-2),
        x in -10.0f64..10.0,
        y in -10.0f64..10.0,
    ) {
        let v = vector![x, y];
        let lhs = a.multiply(&b).apply(v);
        let rhs = a.apply(b.apply(v));
        prop_assert!((lhs - rhs).amax() < 1e-6);
    }

    #[test]
    fn prop_invert_matches_nalgebra(a in lin2_strategy(1e-2)) {
        let inv = a.invert();
        prop_assert!(inv.sx() > 0.0 && inv.sy() > 0.0);
        prop_assert!((-PI..PI).contains(&inv.angle()));
        prop_assert!((-PI..PI).contains(&inv.shear()));
        let expected = a.to_matrix().try_inverse().unwrap();
        prop_assert!(close(&inv.to_matrix(), &expected, 1e-6));
    }
}
