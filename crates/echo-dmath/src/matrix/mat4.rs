// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Affine and projective 4×4 matrices.

use bytemuck::{Pod, Zeroable};

use super::impl_matrix_core;
use crate::bits::{NPNP, PNPN};
use crate::{DFloat, Mat3, Quat, Vec3, Vec4};

/// Column-major 4×4 matrix.
///
/// - Affine transforms keep the translation in `c3` and `(0, 0, 0, 1)` in
///   the last row.
/// - Use [`Mat4::transform_point`] for points (`w = 1`) and
///   [`Mat4::transform_direction`] for directions (`w = 0`); neither divides
///   by `w`. [`Mat4::project_point`] does.
///
/// # Examples
/// ```
/// use echo_dmath::{DFloat, Mat4, Vec3};
/// let d = |v: f32| DFloat::from_f32(v);
/// let t = Mat4::from_translation(Vec3::new(d(5.0), d(-3.0), d(2.0)));
/// let p = t.transform_point(Vec3::new(d(2.0), d(4.0), d(-1.0)));
/// assert_eq!(p, Vec3::new(d(7.0), d(1.0), d(1.0)));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Mat4 {
    /// First column.
    pub c0: Vec4,
    /// Second column.
    pub c1: Vec4,
    /// Third column.
    pub c2: Vec4,
    /// Fourth column (translation for affine transforms).
    pub c3: Vec4,
}

impl_matrix_core!(Mat4, Vec4, 4; c0(r0): 0 => X, c1(r1): 1 => Y, c2(r2): 2 => Z, c3(r3): 3 => W);

impl Mat4 {
    /// Affine transform with linear part `m` and translation `t`.
    pub const fn from_mat3_translation(m: Mat3, t: Vec3) -> Self {
        Self::from_cols(
            m.c0.extend(DFloat::ZERO),
            m.c1.extend(DFloat::ZERO),
            m.c2.extend(DFloat::ZERO),
            t.extend(DFloat::ONE),
        )
    }

    /// Pure translation.
    pub const fn from_translation(t: Vec3) -> Self {
        Self::from_mat3_translation(Mat3::IDENTITY, t)
    }

    /// Non-uniform scale.
    pub const fn from_scale(scale: Vec3) -> Self {
        Self::from_mat3_translation(Mat3::from_scale(scale), Vec3::ZERO)
    }

    /// Rotation from a (unit) quaternion; see [`Mat3::from_quat`].
    pub fn from_quat(q: Quat) -> Self {
        Self::from_mat3_translation(Mat3::from_quat(q), Vec3::ZERO)
    }

    /// Rotation about a unit axis; see [`Mat3::from_axis_angle`].
    pub fn from_axis_angle(axis: Vec3, angle: DFloat) -> Self {
        Self::from_mat3_translation(Mat3::from_axis_angle(axis, angle), Vec3::ZERO)
    }

    /// Rotation about +X by `angle` radians.
    pub fn from_rotation_x(angle: DFloat) -> Self {
        Self::from_mat3_translation(Mat3::from_rotation_x(angle), Vec3::ZERO)
    }

    /// Rotation about +Y by `angle` radians.
    pub fn from_rotation_y(angle: DFloat) -> Self {
        Self::from_mat3_translation(Mat3::from_rotation_y(angle), Vec3::ZERO)
    }

    /// Rotation about +Z by `angle` radians.
    pub fn from_rotation_z(angle: DFloat) -> Self {
        Self::from_mat3_translation(Mat3::from_rotation_z(angle), Vec3::ZERO)
    }

    /// `T · R · S`: scale first, then rotate, then translate.
    pub fn from_scale_rotation_translation(scale: Vec3, rotation: Quat, translation: Vec3) -> Self {
        let r = Mat3::from_quat(rotation);
        Self::from_cols(
            (r.c0 * scale.x).extend(DFloat::ZERO),
            (r.c1 * scale.y).extend(DFloat::ZERO),
            (r.c2 * scale.z).extend(DFloat::ZERO),
            translation.extend(DFloat::ONE),
        )
    }

    /// Transform placed at `eye` and oriented toward `target`.
    ///
    /// This is the object-to-world transform of a viewer (its third column
    /// points at the target), not a view matrix; invert it (cheaply, with
    /// [`Mat4::fast_inverse`]) for world-to-view. Uses the unchecked
    /// [`Mat3::look_rotation`], so `eye == target` or a direction parallel to
    /// `up` gives NaN.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let rotation = Mat3::look_rotation((target - eye).normalize(), up);
        Self::from_mat3_translation(rotation, eye)
    }

    /// `self * (p, 1)` truncated to `xyz`; no perspective divide.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (self.c0 * p.x + self.c1 * p.y + self.c2 * p.z + self.c3).xyz()
    }

    /// `self * (d, 0)` truncated to `xyz`; translation is ignored.
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        (self.c0 * d.x + self.c1 * d.y + self.c2 * d.z).xyz()
    }

    /// `self * (p, 1)` followed by the homogeneous divide.
    pub fn project_point(&self, p: Vec3) -> Vec3 {
        let clip = self.mul_vec(p.extend(DFloat::ONE));
        clip.xyz() / clip.w
    }

    /// Inverse of a rigid transform (orthonormal rotation plus translation).
    ///
    /// Only the transposed rotation and the back-rotated translation are
    /// computed; any scale, shear, or projective part gives a wrong result.
    #[must_use]
    pub fn fast_inverse(&self) -> Self {
        let r = Mat3::from_mat4(self).transpose();
        let pos = self.c3.xyz();
        let t = -(r.c0 * pos.x + r.c1 * pos.y + r.c2 * pos.z);
        Self::from_mat3_translation(r, t)
    }

    /// Laplace expansion along the first column.
    pub fn determinant(&self) -> DFloat {
        let [m00, m01, m02, m03] = self.c0.to_array();
        let [m10, m11, m12, m13] = self.c1.to_array();
        let [m20, m21, m22, m23] = self.c2.to_array();
        let [m30, m31, m32, m33] = self.c3.to_array();

        let a2323 = m22 * m33 - m23 * m32;
        let a1323 = m21 * m33 - m23 * m31;
        let a1223 = m21 * m32 - m22 * m31;
        let a0323 = m20 * m33 - m23 * m30;
        let a0223 = m20 * m32 - m22 * m30;
        let a0123 = m20 * m31 - m21 * m30;

        m00 * (m11 * a2323 - m12 * a1323 + m13 * a1223)
            - m01 * (m10 * a2323 - m12 * a0323 + m13 * a0223)
            + m02 * (m10 * a1323 - m11 * a0323 + m13 * a0123)
            - m03 * (m10 * a1223 - m11 * a0223 + m12 * a0123)
    }

    /// General inverse via 2×2 cofactors; singular input yields NaN/∞
    /// entries.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let [m00, m01, m02, m03] = self.c0.to_array();
        let [m10, m11, m12, m13] = self.c1.to_array();
        let [m20, m21, m22, m23] = self.c2.to_array();
        let [m30, m31, m32, m33] = self.c3.to_array();

        let coef00 = m22 * m33 - m32 * m23;
        let coef02 = m12 * m33 - m32 * m13;
        let coef03 = m12 * m23 - m22 * m13;

        let coef04 = m21 * m33 - m31 * m23;
        let coef06 = m11 * m33 - m31 * m13;
        let coef07 = m11 * m23 - m21 * m13;

        let coef08 = m21 * m32 - m31 * m22;
        let coef10 = m11 * m32 - m31 * m12;
        let coef11 = m11 * m22 - m21 * m12;

        let coef12 = m20 * m33 - m30 * m23;
        let coef14 = m10 * m33 - m30 * m13;
        let coef15 = m10 * m23 - m20 * m13;

        let coef16 = m20 * m32 - m30 * m22;
        let coef18 = m10 * m32 - m30 * m12;
        let coef19 = m10 * m22 - m20 * m12;

        let coef20 = m20 * m31 - m30 * m21;
        let coef22 = m10 * m31 - m30 * m11;
        let coef23 = m10 * m21 - m20 * m11;

        let fac0 = Vec4::new(coef00, coef00, coef02, coef03);
        let fac1 = Vec4::new(coef04, coef04, coef06, coef07);
        let fac2 = Vec4::new(coef08, coef08, coef10, coef11);
        let fac3 = Vec4::new(coef12, coef12, coef14, coef15);
        let fac4 = Vec4::new(coef16, coef16, coef18, coef19);
        let fac5 = Vec4::new(coef20, coef20, coef22, coef23);

        let vec0 = Vec4::new(m10, m00, m00, m00);
        let vec1 = Vec4::new(m11, m01, m01, m01);
        let vec2 = Vec4::new(m12, m02, m02, m02);
        let vec3 = Vec4::new(m13, m03, m03, m03);

        let inv0 = vec1 * fac0 - vec2 * fac1 + vec3 * fac2;
        let inv1 = vec0 * fac0 - vec2 * fac3 + vec3 * fac4;
        let inv2 = vec0 * fac1 - vec1 * fac3 + vec3 * fac5;
        let inv3 = vec0 * fac2 - vec1 * fac4 + vec2 * fac5;

        let adjugate = Self::from_cols(
            inv0.xor_sign(PNPN),
            inv1.xor_sign(NPNP),
            inv2.xor_sign(PNPN),
            inv3.xor_sign(NPNP),
        );

        let row0 = adjugate.row(0);
        let det = self.c0.dot(row0);
        adjugate.mul_scalar(det.recip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_scale_is_diagonal() {
        let two = DFloat::TWO;
        let m = Mat4::from_scale(Vec3::splat(two));
        assert_eq!(m.c0, Vec4::new(two, DFloat::ZERO, DFloat::ZERO, DFloat::ZERO));
        assert_eq!(m.c3, Vec4::W);
    }
}
