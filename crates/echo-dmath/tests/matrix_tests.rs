// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use echo_dmath::{DFloat, Mat2, Mat3, Mat4, MathError, Quat, Vec2, Vec3, Vec4};

fn d(v: f32) -> DFloat {
    DFloat::from_f32(v)
}

fn v3(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(d(x), d(y), d(z))
}

fn approx_eq_mat4(a: &Mat4, b: &Mat4, tol: f32) {
    for (i, (ca, cb)) in a.to_cols_array().into_iter().zip(b.to_cols_array()).enumerate() {
        for (j, (x, y)) in ca.to_array().into_iter().zip(cb.to_array()).enumerate() {
            let diff = (x.to_f32() - y.to_f32()).abs();
            assert!(diff <= tol, "c{i}[{j}]: {x:?} vs {y:?} (diff {diff})\n{a:?}\n{b:?}");
        }
    }
}

fn sample_transform() -> Mat4 {
    Mat4::from_scale_rotation_translation(
        v3(2.0, 3.0, 0.5),
        Quat::from_axis_angle(v3(1.0, 2.0, 2.0).normalize(), d(0.9)),
        v3(-4.0, 1.5, 10.0),
    )
}

#[test]
fn rows_and_columns() {
    let m = Mat3::from_rows(v3(1.0, 2.0, 3.0), v3(4.0, 5.0, 6.0), v3(7.0, 8.0, 9.0));
    assert_eq!(m.c0, v3(1.0, 4.0, 7.0));
    assert_eq!(m.row(1), v3(4.0, 5.0, 6.0));
    assert_eq!(m.col(2), v3(3.0, 6.0, 9.0));
    assert_eq!(m.transpose().transpose(), m);
    assert_eq!(m[1], m.c1);
    assert_eq!(m * Vec3::X, m.c0);
}

#[test]
fn fallible_column_access() {
    assert_eq!(Mat4::IDENTITY.get_col(3), Ok(Vec4::W));
    assert_eq!(
        Mat4::IDENTITY.get_col(4),
        Err(MathError::ComponentIndex { index: 4, len: 4 })
    );
    assert_eq!(
        Mat2::IDENTITY.get_col(2),
        Err(MathError::ComponentIndex { index: 2, len: 2 })
    );
}

#[test]
#[should_panic(expected = "component index 3 out of range for a 3-wide value")]
fn column_index_out_of_range_panics() {
    let _ = Mat3::IDENTITY[3];
}

#[test]
fn default_is_identity() {
    assert_eq!(Mat2::default(), Mat2::IDENTITY);
    assert_eq!(Mat3::default(), Mat3::IDENTITY);
    assert_eq!(Mat4::default(), Mat4::IDENTITY);
}

#[test]
fn componentwise_add_sub_neg() {
    let two = Mat3::IDENTITY + Mat3::IDENTITY;
    assert_eq!(two, Mat3::IDENTITY * DFloat::TWO);
    assert_eq!(two - Mat3::IDENTITY, Mat3::IDENTITY);
    assert_eq!(-Mat3::IDENTITY + Mat3::IDENTITY, Mat3::ZERO);
}

#[test]
fn matrix_product_applies_right_operand_first() {
    let t = Mat4::from_translation(v3(1.0, 0.0, 0.0));
    let s = Mat4::from_scale(Vec3::splat(d(2.0)));
    let p = v3(1.0, 1.0, 1.0);
    assert_eq!((t * s).transform_point(p), v3(3.0, 2.0, 2.0));
    assert_eq!((s * t).transform_point(p), v3(4.0, 2.0, 2.0));
}

#[test]
fn trs_with_identity_rotation_is_translate_times_scale() {
    let s = v3(2.0, 3.0, 4.0);
    let t = v3(-1.0, 5.0, 0.5);
    let trs = Mat4::from_scale_rotation_translation(s, Quat::IDENTITY, t);
    assert_eq!(trs, Mat4::from_translation(t) * Mat4::from_scale(s));
}

#[test]
fn transform_point_vs_direction() {
    let m = Mat4::from_translation(v3(5.0, -3.0, 2.0));
    assert_eq!(m.transform_point(v3(2.0, 4.0, -1.0)), v3(7.0, 1.0, 1.0));
    assert_eq!(m.transform_direction(v3(2.0, 4.0, -1.0)), v3(2.0, 4.0, -1.0));
}

#[test]
fn determinants() {
    assert_eq!(Mat4::from_scale(v3(2.0, 3.0, 4.0)).determinant(), d(24.0));
    assert_eq!(Mat3::from_scale(v3(2.0, -3.0, 4.0)).determinant(), d(-24.0));
    assert_eq!(Mat2::from_scale(Vec2::new(d(2.0), d(5.0))).determinant(), d(10.0));
    let r = Mat3::from_euler_default(v3(0.3, 0.2, 0.1));
    assert!((r.determinant().to_f32() - 1.0).abs() < 1e-6);
    assert!((sample_transform().determinant().to_f32() - 3.0).abs() < 1e-4);
}

#[test]
fn inverse_of_diagonal_is_exact() {
    let m = Mat3::from_scale(v3(2.0, 4.0, 8.0));
    assert_eq!(m.inverse(), Mat3::from_scale(v3(0.5, 0.25, 0.125)));
    let m2 = Mat2::from_scale(Vec2::new(d(4.0), d(0.5)));
    assert_eq!(m2.inverse(), Mat2::from_scale(Vec2::new(d(0.25), d(2.0))));
}

#[test]
fn mat4_inverse_times_m_is_identity() {
    let m = sample_transform();
    approx_eq_mat4(&(m.inverse() * m), &Mat4::IDENTITY, 1e-5);
    approx_eq_mat4(&(m * m.inverse()), &Mat4::IDENTITY, 1e-5);

    let p = Mat4::perspective_fov(d(1.0), d(1.5), d(0.1), d(100.0));
    approx_eq_mat4(&(p.inverse() * p), &Mat4::IDENTITY, 1e-4);
}

#[test]
fn singular_inverse_is_not_finite() {
    assert!(!Mat4::ZERO.inverse().is_finite());
    assert!(!Mat3::from_cols(Vec3::X, Vec3::X, Vec3::Z).inverse().is_finite());
    assert!(!Mat2::ZERO.inverse().is_finite());
}

#[test]
fn fast_inverse_matches_general_inverse_for_rigid_transforms() {
    let rigid = Mat4::from_mat3_translation(
        Mat3::from_euler_default(v3(0.5, -1.2, 2.2)),
        v3(3.0, -7.0, 0.25),
    );
    approx_eq_mat4(&rigid.fast_inverse(), &rigid.inverse(), 1e-5);
    approx_eq_mat4(&(rigid.fast_inverse() * rigid), &Mat4::IDENTITY, 1e-5);
}

#[test]
fn look_at_places_and_orients_the_viewer() {
    let eye = v3(0.0, 0.0, 5.0);
    let m = Mat4::look_at(eye, Vec3::ZERO, Vec3::Y);
    assert_eq!(m.transform_point(Vec3::ZERO), eye);
    assert_eq!(m.transform_point(Vec3::Z), v3(0.0, 0.0, 4.0));
    assert_eq!(m.transform_direction(Vec3::Y), Vec3::Y);
    let view = m.fast_inverse();
    assert_eq!(view.transform_point(Vec3::ZERO), v3(0.0, 0.0, 5.0));
}

#[test]
fn mat2_rotation() {
    let r = Mat2::from_angle(DFloat::FRAC_PI_2);
    let y = r * Vec2::X;
    assert!(y.x.abs().lt(d(1e-7)));
    assert_eq!(y.y, DFloat::ONE);
}

#[test]
fn orthographic_maps_box_corners_exactly() {
    // 4 × 2 box between z = -1 and z = -5.
    let m = Mat4::orthographic(d(4.0), d(2.0), d(1.0), d(5.0));
    assert_eq!(m.project_point(v3(2.0, 1.0, -1.0)), v3(1.0, 1.0, -1.0));
    assert_eq!(m.project_point(v3(-2.0, -1.0, -5.0)), v3(-1.0, -1.0, 1.0));
    assert_eq!(m.project_point(v3(0.0, 0.0, -3.0)), v3(0.0, 0.0, 0.0));
}

#[test]
fn orthographic_off_center_maps_box_corners_exactly() {
    let m = Mat4::orthographic_off_center(d(-1.0), d(3.0), d(0.0), d(2.0), d(0.5), d(2.5));
    assert_eq!(m.project_point(v3(3.0, 2.0, -0.5)), v3(1.0, 1.0, -1.0));
    assert_eq!(m.project_point(v3(-1.0, 0.0, -2.5)), v3(-1.0, -1.0, 1.0));
}

#[test]
fn perspective_maps_near_and_far_planes() {
    let m = Mat4::perspective_fov(DFloat::FRAC_PI_2, d(2.0), d(1.0), d(3.0));
    assert_eq!(m.project_point(v3(0.0, 0.0, -1.0)).z, DFloat::NEG_ONE);
    assert_eq!(m.project_point(v3(0.0, 0.0, -3.0)).z, DFloat::ONE);
    // tan(π/4) is within an ulp of 1, so the frustum corner lands near (1, 1).
    let corner = m.project_point(v3(2.0, 1.0, -1.0));
    assert!((corner.x.to_f32() - 1.0).abs() < 1e-6);
    assert!((corner.y.to_f32() - 1.0).abs() < 1e-6);
    // Clip w is the negated view-space depth.
    assert_eq!(m.mul_vec(Vec4::new(d(0.0), d(0.0), d(-3.0), d(1.0))).w, d(3.0));
}

#[test]
fn perspective_off_center_maps_near_rectangle_exactly() {
    let m = Mat4::perspective_off_center(d(-1.0), d(3.0), d(-1.0), d(1.0), d(1.0), d(3.0));
    assert_eq!(m.project_point(v3(3.0, 1.0, -1.0)), v3(1.0, 1.0, -1.0));
    assert_eq!(m.project_point(v3(-1.0, -1.0, -1.0)), v3(-1.0, -1.0, -1.0));
    assert_eq!(m.project_point(v3(0.0, 0.0, -3.0)).z, DFloat::ONE);
}
