// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use echo_dmath::{DFloat, Mat3, Mat4, MathError, Quat, RotationOrder, Vec3};

const ABS_TOL: f32 = 1e-6;
const REL_TOL: f32 = 1e-6;

fn d(v: f32) -> DFloat {
    DFloat::from_f32(v)
}

fn v3(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(d(x), d(y), d(z))
}

fn approx_eq3(a: Vec3, b: Vec3) {
    let a = a.to_array().map(DFloat::to_f32);
    let b = b.to_array().map(DFloat::to_f32);
    for i in 0..3 {
        let diff = (a[i] - b[i]).abs();
        let scale = a[i].abs().max(b[i].abs());
        let tol = ABS_TOL.max(REL_TOL * scale);
        assert!(
            diff <= tol,
            "index {i}: {a:?} vs {b:?}, diff={diff}, tol={tol} (scale={scale})"
        );
    }
}

fn approx_eq_mat3(a: &Mat3, b: &Mat3) {
    approx_eq3(a.c0, b.c0);
    approx_eq3(a.c1, b.c1);
    approx_eq3(a.c2, b.c2);
}

fn approx_eq_quat(a: Quat, b: Quat) {
    // q and -q are the same rotation.
    let b = if a.dot(b).lt(DFloat::ZERO) {
        Quat::from_vec4(-b.to_vec4())
    } else {
        b
    };
    approx_eq3(a.xyz(), b.xyz());
    approx_eq3(Vec3::splat(a.w), Vec3::splat(b.w));
}

fn assert_orthonormal(m: &Mat3) {
    approx_eq_mat3(&(*m * m.transpose()), &Mat3::IDENTITY);
    let det = m.determinant().to_f32();
    assert!((det - 1.0).abs() <= 1e-5, "det = {det}");
}

fn sample_angles() -> Vec<Vec3> {
    vec![
        v3(0.3, -1.1, 2.0),
        v3(-2.9, 0.7, -0.4),
        v3(1.5, 1.5, 1.5),
        v3(0.0, core::f32::consts::FRAC_PI_2, 0.25),
        v3(-0.01, 3.0, -3.1),
    ]
}

fn sample_quats() -> Vec<Quat> {
    sample_angles()
        .into_iter()
        .map(Quat::from_euler_default)
        .chain([
            Quat::IDENTITY,
            Quat::from_rotation_x(DFloat::PI),
            Quat::from_xyzw(d(0.1), d(-0.7), d(0.7), d(0.05)).normalize(),
        ])
        .collect()
}

#[test]
fn rot_z_maps_x_to_y() {
    let y = Mat3::from_rotation_z(DFloat::FRAC_PI_2) * Vec3::X;
    approx_eq3(y, Vec3::Y);
}

#[test]
fn rot_y_maps_z_to_x() {
    let x = Mat3::from_rotation_y(DFloat::FRAC_PI_2) * Vec3::Z;
    approx_eq3(x, Vec3::X);
}

#[test]
fn rot_x_maps_y_to_z() {
    let z = Mat4::from_rotation_x(DFloat::FRAC_PI_2).transform_direction(Vec3::Y);
    approx_eq3(z, Vec3::Z);
}

#[test]
fn axis_angle_matches_axis_specific_rotation() {
    let angle = d(0.8);
    approx_eq_mat3(&Mat3::from_axis_angle(Vec3::Y, angle), &Mat3::from_rotation_y(angle));
    approx_eq_mat3(
        &Quat::from_axis_angle(Vec3::Z, angle).to_mat3(),
        &Mat3::from_rotation_z(angle),
    );
    let axis = v3(1.0, 2.0, -2.0).normalize();
    approx_eq_mat3(
        &Mat3::from_axis_angle(axis, angle),
        &Quat::from_axis_angle(axis, angle).to_mat3(),
    );
}

fn composed(order: RotationOrder, a: Vec3) -> Mat3 {
    let (rx, ry, rz) = (
        Mat3::from_rotation_x(a.x),
        Mat3::from_rotation_y(a.y),
        Mat3::from_rotation_z(a.z),
    );
    match order {
        RotationOrder::XYZ => rz * ry * rx,
        RotationOrder::XZY => ry * rz * rx,
        RotationOrder::YXZ => rz * rx * ry,
        RotationOrder::YZX => rx * rz * ry,
        RotationOrder::ZXY => ry * rx * rz,
        RotationOrder::ZYX => rx * ry * rz,
    }
}

#[test]
fn euler_closed_forms_match_composed_products() {
    for angles in sample_angles() {
        for order in RotationOrder::ALL {
            approx_eq_mat3(&Mat3::from_euler(order, angles), &composed(order, angles));
        }
    }
}

#[test]
fn default_order_is_zxy() {
    let angles = v3(0.4, -0.9, 1.7);
    assert_eq!(Mat3::from_euler_default(angles), Mat3::from_euler_zxy(angles));
    let expected = Mat3::from_rotation_y(angles.y)
        * Mat3::from_rotation_x(angles.x)
        * Mat3::from_rotation_z(angles.z);
    approx_eq_mat3(&Mat3::from_euler_default(angles), &expected);
}

#[test]
fn quaternion_euler_matches_matrix_euler() {
    for angles in sample_angles() {
        for order in RotationOrder::ALL {
            let q = Quat::from_euler(order, angles);
            approx_eq_mat3(&q.to_mat3(), &Mat3::from_euler(order, angles));
        }
    }
}

#[test]
fn mat4_euler_embeds_mat3_euler() {
    let angles = v3(0.1, 0.2, 0.3);
    let m = Mat4::from_euler(RotationOrder::YZX, angles);
    assert_eq!(Mat3::from_mat4(&m), Mat3::from_euler_yzx(angles));
    assert_eq!(m.c3, echo_dmath::Vec4::W);
}

#[test]
fn rotation_order_rejects_unknown_discriminants() {
    assert_eq!(RotationOrder::try_from(4), Ok(RotationOrder::ZXY));
    assert_eq!(RotationOrder::try_from(255), Err(MathError::UnknownRotationOrder(255)));
    assert_eq!(u8::from(RotationOrder::ZYX), 5);
}

#[test]
fn quat_to_mat3_is_orthonormal() {
    for q in sample_quats() {
        assert_orthonormal(&q.to_mat3());
    }
}

#[test]
fn mat3_to_quat_round_trips() {
    for q in sample_quats() {
        approx_eq_quat(Quat::from_mat3(&q.to_mat3()), q);
    }
    assert_eq!(Quat::from_mat3(&Mat3::IDENTITY), Quat::IDENTITY);
}

#[test]
fn hamilton_product_composes_rotations() {
    let qs = sample_quats();
    for a in &qs {
        for b in &qs {
            approx_eq_mat3(&(*a * *b).to_mat3(), &(a.to_mat3() * b.to_mat3()));
        }
    }
}

#[test]
fn mul_vec3_matches_matrix() {
    let v = v3(0.5, -2.0, 3.0);
    for q in sample_quats() {
        approx_eq3(q * v, q.to_mat3() * v);
    }
}

#[test]
fn inverse_and_conjugate() {
    for q in sample_quats() {
        approx_eq_quat(q * q.inverse(), Quat::IDENTITY);
        approx_eq_quat(q.conjugate(), q.inverse());
    }
    let q = Quat::from_xyzw(d(1.0), d(-2.0), d(3.0), d(4.0));
    assert_eq!(q.conjugate(), Quat::from_xyzw(d(-1.0), d(2.0), d(-3.0), d(4.0)));
}

#[test]
fn normalize_or_identity_handles_degenerate_input() {
    assert_eq!(Quat::from_vec4(echo_dmath::Vec4::ZERO).normalize_or_identity(), Quat::IDENTITY);
    assert_eq!(Quat::from_vec4(echo_dmath::Vec4::NAN).normalize_or_identity(), Quat::IDENTITY);
    let q = Quat::from_xyzw(d(0.0), d(0.0), d(2.0), d(0.0)).normalize_or_identity();
    assert_eq!(q, Quat::from_xyzw(d(0.0), d(0.0), d(1.0), d(0.0)));
}

#[test]
fn nlerp_takes_the_short_arc() {
    let a = Quat::IDENTITY;
    let b = Quat::from_vec4(-Quat::from_rotation_z(d(0.5)).to_vec4());
    let mid = a.nlerp(b, DFloat::HALF);
    approx_eq_quat(mid, Quat::from_rotation_z(d(0.25)));
    assert!(mid.w.gt(DFloat::ZERO));
}

#[test]
fn look_rotation_points_the_third_column_forward() {
    let forward = v3(1.0, 0.0, 1.0).normalize();
    let m = Mat3::look_rotation(forward, Vec3::Y);
    assert_orthonormal(&m);
    approx_eq3(m.c2, forward);
    assert!(m.c1.dot(Vec3::Y).gt(DFloat::ZERO));
    assert_eq!(Mat3::look_rotation(Vec3::Z, Vec3::Y), Mat3::IDENTITY);
    approx_eq_quat(Quat::look_rotation(forward, Vec3::Y), Quat::from_mat3(&m));
}

#[test]
fn look_rotation_safe_normalizes_its_inputs() {
    let m = Mat3::look_rotation_safe(v3(0.0, 0.0, 5.0), v3(0.0, 3.0, 0.0));
    approx_eq_mat3(&m, &Mat3::IDENTITY);

    let m = Mat3::look_rotation_safe(v3(2.0, 1.0, -3.0), v3(0.1, 4.0, 0.2));
    assert_orthonormal(&m);
    approx_eq3(m.c2, v3(2.0, 1.0, -3.0).normalize());
}

#[test]
fn look_rotation_safe_degenerate_input_is_identity() {
    let cases = [
        (Vec3::ZERO, Vec3::Y),
        (Vec3::Z, Vec3::ZERO),
        (Vec3::Y, Vec3::Y),
        (Vec3::Y, -Vec3::Y),
        (v3(0.0, 2.0, 0.0), v3(0.0, 7.0, 0.0)),
        (Vec3::NAN, Vec3::Y),
        (Vec3::splat(DFloat::INFINITY), Vec3::Y),
        (v3(1.0e-20, 0.0, 0.0), Vec3::Y),
    ];
    for (forward, up) in cases {
        let m = Mat3::look_rotation_safe(forward, up);
        assert_eq!(m, Mat3::IDENTITY, "forward={forward:?} up={up:?}");
        assert_eq!(Quat::look_rotation_safe(forward, up), Quat::IDENTITY);
    }
}

#[test]
fn orthonormalize_is_idempotent() {
    let skewed = Mat3::from_cols(v3(2.0, 0.1, 0.0), v3(0.3, 1.5, 0.2), v3(9.0, 9.0, 9.0));
    let once = skewed.orthonormalize();
    assert_orthonormal(&once);
    approx_eq3(once.c0, v3(2.0, 0.1, 0.0).normalize());
    approx_eq_mat3(&once.orthonormalize(), &once);
}

#[test]
fn orthonormalize_ignores_the_third_column() {
    let a = Mat3::from_cols(Vec3::X, Vec3::Y, Vec3::NAN);
    assert_eq!(a.orthonormalize(), Mat3::IDENTITY);
    let b = Mat3::from_cols(Vec3::Y, Vec3::X, Vec3::Z);
    assert_eq!(b.orthonormalize().c2, -Vec3::Z);
}

#[test]
fn orthonormalize_degenerate_input_is_identity() {
    let cases = [
        Mat3::ZERO,
        Mat3::from_cols(Vec3::X, Vec3::X, Vec3::Z),
        Mat3::from_cols(Vec3::ZERO, Vec3::Y, Vec3::Z),
        Mat3::NAN,
    ];
    for m in cases {
        assert_eq!(m.orthonormalize(), Mat3::IDENTITY, "{m:?}");
    }
}
